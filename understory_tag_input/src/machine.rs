// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state machine: raw input events in, tag mutations out.
//!
//! [`TagInput`] is the only type that consumes key, paste, blur, focus, and
//! click events. It runs candidates through the
//! [constraint pipeline](crate::constraints), commits through the
//! [`TagStore`], and reports what happened as a list of [`TagInputEvent`]s.
//!
//! ## Keyboard contract
//!
//! | Key | Condition | Effect |
//! |---|---|---|
//! | Enter / delimiter | input non-empty | commit input as a tag |
//! | Backspace | input empty, tag focused | remove it, focus moves one left (or clears at 0) |
//! | Backspace | input empty, nothing focused | focus the last tag |
//! | Delete | input empty, tag focused | remove it, focus stays at the same position |
//! | ArrowLeft | caret at 0 | focus previous tag, wrapping; last tag if none focused |
//! | ArrowRight | | focus next tag, wrapping; first tag if none focused |
//! | Home / End | | focus first / last tag |
//! | Escape | | clear focus, ask the host to blur the field |
//! | any character | | clear focused and active tag |
//!
//! ```
//! use understory_tag_input::machine::{InteractionMode, TagInput, TagInputConfig};
//! use understory_tag_input::{Key, KeyEvent, TagStore};
//!
//! let mut input = TagInput::new(TagStore::uncontrolled(Vec::new()), TagInputConfig::default());
//! input.add_tag("a");
//! input.add_tag("b");
//! input.on_key_down(&mut KeyEvent::new(Key::End));
//! assert_eq!(input.mode(), InteractionMode::TagFocused(1));
//! input.on_key_down(&mut KeyEvent::new(Key::Character(',')));
//! assert_eq!(input.mode(), InteractionMode::Idle);
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::autocomplete::{Autocomplete, Suggestion};
use crate::constraints::{
    ConfigError, Rejection, TagConstraints, check_batch, check_candidate, check_clear,
    check_removal,
};
use crate::keys::{BlurBehavior, Key, KeyEvent, PasteEvent};
use crate::navigation::{Navigation, step};
use crate::store::TagStore;
use crate::tag::Tag;
use crate::view::{self, DisplayOptions, TagView};

/// Everything a [`TagInput`] is configured with.
#[derive(Clone, Debug, Default)]
pub struct TagInputConfig {
    /// Admission and removal rules.
    pub constraints: TagConstraints,
    /// What happens to pending input on blur.
    pub blur_behavior: BlurBehavior,
    /// Split pasted text into tags instead of pasting it into the field.
    pub add_on_paste: bool,
    /// Autocomplete options.
    pub autocomplete: Autocomplete,
    /// Presentation-only options.
    pub display: DisplayOptions,
    /// Placeholder for the text field.
    pub placeholder: String,
    /// Placeholder once `max_tags` is reached; falls back to `placeholder` when empty.
    pub placeholder_when_full: String,
}

impl TagInputConfig {
    /// Set the constraint record.
    #[must_use]
    pub fn with_constraints(mut self, constraints: TagConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Set the blur behavior.
    #[must_use]
    pub fn with_blur_behavior(mut self, blur_behavior: BlurBehavior) -> Self {
        self.blur_behavior = blur_behavior;
        self
    }

    /// Enable or disable paste splitting.
    #[must_use]
    pub fn with_add_on_paste(mut self, add_on_paste: bool) -> Self {
        self.add_on_paste = add_on_paste;
        self
    }

    /// Set the autocomplete options.
    #[must_use]
    pub fn with_autocomplete(mut self, autocomplete: Autocomplete) -> Self {
        self.autocomplete = autocomplete;
        self
    }

    /// Set display options.
    #[must_use]
    pub fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    /// Set both placeholders.
    #[must_use]
    pub fn with_placeholders(
        mut self,
        placeholder: impl Into<String>,
        when_full: impl Into<String>,
    ) -> Self {
        self.placeholder = placeholder.into();
        self.placeholder_when_full = when_full.into();
        self
    }
}

/// Notification produced by a [`TagInput`] handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagInputEvent {
    /// A tag was added (or proposed, in controlled mode).
    TagAdded(Tag),
    /// A tag was removed (or proposed for removal).
    TagRemoved(Tag),
    /// The whole collection was cleared.
    ClearedAll,
    /// A tag was clicked.
    TagClicked(Tag),
    /// The next full collection. Controlled owners feed it back through
    /// [`TagInput::set_value`] to accept it.
    ValueChange(Vec<Tag>),
    /// The user edited the text field.
    InputChange(String),
    /// A candidate or mutation was refused.
    Rejected(Rejection),
    /// The host should blur the text field.
    BlurInput,
}

/// Coarse interaction mode, derived from the current state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// No pending text and no focused or active tag.
    Idle,
    /// The user is typing; the text field holds pending text.
    Composing,
    /// The keyboard cursor sits on the tag at this position.
    TagFocused(usize),
    /// The tag at this position is selected.
    TagActive(usize),
}

/// A tag input control's interaction state.
///
/// ```
/// use understory_tag_input::{Key, KeyEvent, TagInput, TagInputConfig, TagInputEvent, TagStore};
///
/// let mut input = TagInput::new(TagStore::uncontrolled(Vec::new()), TagInputConfig::default());
/// input.on_input_change("rust");
/// let events = input.on_key_down(&mut KeyEvent::new(Key::Enter));
/// assert!(matches!(&events[0], TagInputEvent::TagAdded(t) if t.text == "rust"));
/// assert_eq!(input.input_value(), "");
/// assert_eq!(input.tags().len(), 1);
/// ```
#[derive(Debug)]
pub struct TagInput {
    store: TagStore,
    config: TagInputConfig,
    input_value: String,
    focused_index: Option<usize>,
    active_index: Option<usize>,
    is_invalid_input: bool,
    config_error: Option<ConfigError>,
}

impl TagInput {
    /// Build a control, refusing an invalid configuration.
    pub fn try_new(store: TagStore, config: TagInputConfig) -> Result<Self, ConfigError> {
        config.constraints.validate()?;
        Ok(Self::build(store, config, None))
    }

    /// Build a control.
    ///
    /// An invalid configuration is logged as a warning and yields a control
    /// that shows no tags, reports itself disabled, and ignores every event.
    pub fn new(store: TagStore, config: TagInputConfig) -> Self {
        let config_error = config.constraints.validate().err();
        if let Some(err) = &config_error {
            log::warn!("tag input disabled: {err}");
        }
        Self::build(store, config, config_error)
    }

    fn build(store: TagStore, config: TagInputConfig, config_error: Option<ConfigError>) -> Self {
        Self {
            store,
            config,
            input_value: String::new(),
            focused_index: None,
            active_index: None,
            is_invalid_input: false,
            config_error,
        }
    }

    /// Replace the configuration, re-validating it.
    pub fn set_config(&mut self, config: TagInputConfig) {
        self.config_error = config.constraints.validate().err();
        if let Some(err) = &self.config_error {
            log::warn!("tag input disabled: {err}");
        }
        self.config = config;
    }

    /// The configuration.
    pub fn config(&self) -> &TagInputConfig {
        &self.config
    }

    /// The configuration error, if the control is misconfigured.
    pub fn config_error(&self) -> Option<ConfigError> {
        self.config_error
    }

    /// The underlying store.
    pub fn store(&self) -> &TagStore {
        &self.store
    }

    /// The visible collection. Empty while misconfigured.
    pub fn tags(&self) -> &[Tag] {
        if self.config_error.is_some() {
            return &[];
        }
        self.store.tags()
    }

    /// Pending text in the field.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// Keyboard cursor over tags.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    /// Selected tag.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Whether the last commit attempt was refused for its content.
    pub fn is_invalid_input(&self) -> bool {
        self.is_invalid_input
    }

    /// Coarse mode, for hosts that want a single state to style against.
    pub fn mode(&self) -> InteractionMode {
        match (self.focused_index, self.active_index) {
            (Some(i), _) => InteractionMode::TagFocused(i),
            (None, Some(i)) => InteractionMode::TagActive(i),
            (None, None) if !self.input_value.is_empty() => InteractionMode::Composing,
            (None, None) => InteractionMode::Idle,
        }
    }

    /// Whether the whole control is disabled (configured so, or misconfigured).
    pub fn is_disabled(&self) -> bool {
        self.config_error.is_some() || self.config.constraints.disabled
    }

    /// Whether the collection is at `max_tags`.
    pub fn is_full(&self) -> bool {
        self.config.constraints.is_full(self.tags().len())
    }

    /// Whether the text field should refuse typing.
    pub fn is_input_disabled(&self) -> bool {
        self.is_disabled() || self.is_full()
    }

    /// Placeholder for the text field.
    pub fn placeholder(&self) -> &str {
        if self.is_full() && !self.config.placeholder_when_full.is_empty() {
            &self.config.placeholder_when_full
        } else {
            &self.config.placeholder
        }
    }

    /// `"n/max"` or `"n"`.
    pub fn count_label(&self) -> String {
        view::count_label(self.tags().len(), self.config.constraints.max_tags)
    }

    /// Tags in display order with their interaction flags.
    pub fn tag_views(&self) -> Vec<TagView<'_>> {
        view::tag_views(
            self.tags(),
            &self.config.display,
            self.focused_index,
            self.active_index,
            self.is_disabled() || self.config.constraints.read_only,
        )
    }

    /// Autocomplete suggestions for the pending text.
    pub fn suggestions(&self) -> Vec<Suggestion<'_>> {
        if self.config_error.is_some() {
            return Vec::new();
        }
        self.config
            .autocomplete
            .suggestions(&self.input_value, self.store.tags())
    }

    /// Re-supply the authoritative collection (controlled owners).
    pub fn set_value(&mut self, tags: Vec<Tag>) {
        self.store.set_value(tags);
        let len = self.store.len();
        self.focused_index = clamp(self.focused_index, len);
        self.active_index = clamp(self.active_index, len);
    }

    /// Move the keyboard cursor. Out-of-range positions clear it.
    pub fn set_focused_index(&mut self, index: Option<usize>) {
        self.focused_index = index.filter(|&i| i < self.tags().len());
    }

    /// Select a tag. Out-of-range positions clear the selection.
    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.active_index = index.filter(|&i| i < self.tags().len());
    }

    /// Handle a key press in the text field.
    pub fn on_key_down(&mut self, event: &mut KeyEvent) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if event.default_prevented || self.config_error.is_some() {
            return out;
        }
        log::trace!("key down {:?} at caret {}", event.key, event.caret);

        if self.config.constraints.delimiters.commits(event.key) {
            event.prevent_default();
            if !self.input_value.is_empty() {
                self.commit_input_into(&mut out);
            }
            if matches!(event.key, Key::Character(_)) {
                self.focused_index = None;
                self.active_index = None;
            }
            return out;
        }

        match event.key {
            Key::Backspace | Key::Delete if self.input_value.is_empty() => {
                self.remove_focused(event, &mut out);
            }
            Key::ArrowLeft if event.caret == 0 => self.navigate(Navigation::Prev, event),
            Key::ArrowRight => self.navigate(Navigation::Next, event),
            Key::Home => self.navigate(Navigation::First, event),
            Key::End => self.navigate(Navigation::Last, event),
            Key::Escape => {
                self.focused_index = None;
                out.push(TagInputEvent::BlurInput);
            }
            Key::Character(_) => {
                self.focused_index = None;
                self.active_index = None;
            }
            _ => {}
        }
        out
    }

    /// Handle an edit of the text field's contents.
    ///
    /// Text ending in a delimiter commits what precedes it. With
    /// `add_on_paste`, text containing the primary delimiter is committed as
    /// a batch, trailing delimiter or not.
    pub fn on_input_change(&mut self, text: impl Into<String>) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_some() || self.config.constraints.is_locked() {
            return out;
        }
        let text = text.into();
        self.is_invalid_input = false;
        out.push(TagInputEvent::InputChange(text.clone()));

        let primary = self.config.constraints.delimiters.primary();
        let stripped = self.config.constraints.delimiters.strip_trailing(&text);
        let pending = stripped.unwrap_or(&text);
        if self.config.add_on_paste && pending.contains(primary) {
            let pending = String::from(pending);
            if self.add_batch(&pending, &mut out) {
                self.input_value.clear();
            } else {
                self.input_value = pending;
            }
        } else if let Some(prefix) = stripped {
            self.input_value = String::from(prefix);
            if !prefix.trim().is_empty() {
                self.commit_input_into(&mut out);
            }
        } else {
            self.input_value = text;
        }
        out
    }

    /// Handle the text field gaining focus.
    pub fn on_input_focus(&mut self) {
        self.focused_index = None;
        self.active_index = None;
    }

    /// Handle the text field losing focus.
    pub fn on_input_blur(&mut self) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_some() {
            return out;
        }
        match self.config.blur_behavior {
            BlurBehavior::Add if !self.input_value.trim().is_empty() => {
                self.commit_input_into(&mut out);
            }
            BlurBehavior::Clear => self.input_value.clear(),
            BlurBehavior::Add | BlurBehavior::None => {}
        }
        out
    }

    /// Handle a paste into the text field.
    ///
    /// Without `add_on_paste` the event is left to the platform.
    pub fn on_paste(&mut self, event: &mut PasteEvent) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if event.default_prevented || self.config_error.is_some() || !self.config.add_on_paste {
            return out;
        }
        event.default_prevented = true;
        if event.text.is_empty() {
            return out;
        }
        if self.add_batch(&event.text, &mut out) {
            self.active_index = None;
        }
        out
    }

    /// Handle a click on the tag at `index`.
    pub fn on_tag_click(&mut self, index: usize) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_some() || self.config.constraints.is_locked() {
            return out;
        }
        if let Some(tag) = self.store.get(index) {
            out.push(TagInputEvent::TagClicked(tag.clone()));
            self.active_index = Some(index);
        }
        out
    }

    /// Remove the tag with `id`, as from a tag's delete control.
    ///
    /// Refused when locked or when the collection is at `min_tags`. An
    /// unknown id is a silent no-op.
    pub fn remove_tag(&mut self, id: &str) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_some() {
            return out;
        }
        let Some(index) = self.store.position(id) else {
            return out;
        };
        self.remove_at(index, &mut out);
        out
    }

    /// Add `text` as a tag, through the full pipeline.
    pub fn add_tag(&mut self, text: &str) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_none() {
            self.try_add(text, &mut out);
        }
        out
    }

    /// Commit the pending text, as if a delimiter had been pressed.
    pub fn commit_input(&mut self) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_none() && !self.input_value.is_empty() {
            self.commit_input_into(&mut out);
        }
        out
    }

    /// Remove every tag. Refused when locked, when `min_tags > 0`, or when
    /// already empty.
    pub fn clear_all(&mut self) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_some() {
            return out;
        }
        if let Err(rejection) = check_clear(self.store.len(), &self.config.constraints) {
            refuse(rejection, &mut out);
            return out;
        }
        self.store.clear();
        self.focused_index = None;
        self.active_index = None;
        out.push(TagInputEvent::ClearedAll);
        self.flush(&mut out);
        out
    }

    /// Move the tag at `from` to `to`, as at the end of a drag gesture.
    ///
    /// Out-of-range indices are refused. Focused and active positions follow
    /// the tags they point at.
    pub fn reorder(&mut self, from: usize, to: usize) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_some() {
            return out;
        }
        if self.config.constraints.is_locked() {
            refuse(Rejection::Locked, &mut out);
            return out;
        }
        if self.store.reorder(from, to) {
            self.focused_index = self.focused_index.map(|i| follow(i, from, to));
            self.active_index = self.active_index.map(|i| follow(i, from, to));
            self.flush(&mut out);
        }
        out
    }

    /// Add the autocomplete option at `index` (an index into the options).
    ///
    /// The option's text goes through the full pipeline and the new tag gets
    /// a fresh id.
    pub fn select_suggestion(&mut self, index: usize) -> Vec<TagInputEvent> {
        let mut out = Vec::new();
        if self.config_error.is_some() {
            return out;
        }
        let Some(text) = self.config.autocomplete.offered(index).map(|o| o.text.clone()) else {
            return out;
        };
        if self.try_add(&text, &mut out) {
            self.input_value.clear();
            self.focused_index = None;
            self.active_index = None;
        }
        out
    }

    fn commit_input_into(&mut self, out: &mut Vec<TagInputEvent>) {
        let text = mem::take(&mut self.input_value);
        if self.try_add(&text, out) {
            self.focused_index = None;
            self.active_index = None;
        } else {
            self.input_value = text;
        }
    }

    fn try_add(&mut self, text: &str, out: &mut Vec<TagInputEvent>) -> bool {
        let verdict = check_candidate(
            text,
            self.store.tags(),
            &self.config.constraints,
            self.config.autocomplete.options(),
        );
        match verdict {
            Ok(trimmed) => {
                let tag = self.store.add(trimmed);
                self.is_invalid_input = false;
                out.push(TagInputEvent::TagAdded(tag));
                self.flush(out);
                true
            }
            Err(rejection) => {
                log::debug!("tag {text:?} rejected: {rejection}");
                if rejection.marks_input_invalid() {
                    self.is_invalid_input = true;
                }
                out.push(TagInputEvent::Rejected(rejection));
                false
            }
        }
    }

    fn add_batch(&mut self, text: &str, out: &mut Vec<TagInputEvent>) -> bool {
        let verdict = check_batch(
            text,
            self.store.tags(),
            &self.config.constraints,
            self.config.autocomplete.options(),
        );
        match verdict {
            Ok(texts) => {
                for tag in self.store.extend(texts) {
                    out.push(TagInputEvent::TagAdded(tag));
                }
                self.is_invalid_input = false;
                self.flush(out);
                true
            }
            Err(rejection) => {
                log::debug!("paste {text:?} rejected: {rejection}");
                if rejection.marks_input_invalid() {
                    self.is_invalid_input = true;
                }
                out.push(TagInputEvent::Rejected(rejection));
                false
            }
        }
    }

    fn remove_focused(&mut self, event: &mut KeyEvent, out: &mut Vec<TagInputEvent>) {
        match self.focused_index {
            Some(index) if index < self.store.len() => {
                event.prevent_default();
                let Some(len) = self.remove_at(index, out) else {
                    return;
                };
                self.focused_index = if event.key == Key::Backspace {
                    index.checked_sub(1)
                } else {
                    clamp(Some(index), len)
                };
            }
            Some(_) => self.focused_index = None,
            None if event.key == Key::Backspace && !self.store.is_empty() => {
                event.prevent_default();
                self.focused_index = Some(self.store.len() - 1);
            }
            None => {}
        }
    }

    /// Remove the tag at `index`, returning the collection length after the
    /// removal (the proposed length, in controlled mode).
    ///
    /// Focused and active positions keep pointing at the same tags.
    fn remove_at(&mut self, index: usize, out: &mut Vec<TagInputEvent>) -> Option<usize> {
        let len = self.store.len();
        if let Err(rejection) = check_removal(len, &self.config.constraints) {
            refuse(rejection, out);
            return None;
        }
        let id = self.store.get(index)?.id.clone();
        let removed = self.store.remove(&id)?;
        self.focused_index = after_removal(self.focused_index, index, len - 1);
        self.active_index = after_removal(self.active_index, index, len - 1);
        out.push(TagInputEvent::TagRemoved(removed));
        self.flush(out);
        Some(len - 1)
    }

    fn navigate(&mut self, direction: Navigation, event: &mut KeyEvent) {
        if let Some(next) = step(self.focused_index, self.store.len(), direction) {
            event.prevent_default();
            self.focused_index = Some(next);
        }
    }

    fn flush(&mut self, out: &mut Vec<TagInputEvent>) {
        if let Some(next) = self.store.take_change() {
            out.push(TagInputEvent::ValueChange(next));
        }
    }
}

fn refuse(rejection: Rejection, out: &mut Vec<TagInputEvent>) {
    log::debug!("mutation refused: {rejection}");
    out.push(TagInputEvent::Rejected(rejection));
}

fn clamp(index: Option<usize>, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)?;
    index.map(|i| i.min(last))
}

/// Where `position` ends up once the tag at `removed` is gone from a
/// collection that now holds `len` tags.
fn after_removal(position: Option<usize>, removed: usize, len: usize) -> Option<usize> {
    let shifted = position.map(|i| if i > removed { i - 1 } else { i });
    clamp(shifted, len)
}

/// Where position `i` ends up after moving the element at `from` to `to`.
fn follow(i: usize, from: usize, to: usize) -> usize {
    if i == from {
        to
    } else if from < to && i > from && i <= to {
        i - 1
    } else if to < from && i >= to && i < from {
        i + 1
    } else {
        i
    }
}
