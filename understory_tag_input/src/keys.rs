// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard and clipboard input types.
//!
//! Hosts translate their platform events into [`KeyEvent`] and [`PasteEvent`]
//! and feed them to [`TagInput`](crate::TagInput). Default prevention lives on
//! the event payload: the core sets `default_prevented` when it consumes an
//! event, and an event that arrives already prevented (for example by a host
//! keydown hook) is left alone.

use alloc::string::String;

use smallvec::{SmallVec, smallvec};

/// A logical key, after platform translation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return. Always commits the current input.
    Enter,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Escape.
    Escape,
    /// A key that produces a single printable character.
    Character(char),
    /// Anything else (Tab, modifiers, function keys, ...).
    Other,
}

/// A key press delivered to the text field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Caret position (selection start) in the text field, in characters.
    pub caret: usize,
    /// Whether the platform default action should be suppressed.
    pub default_prevented: bool,
}

impl KeyEvent {
    /// A key press with the caret at the start of the field.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            caret: 0,
            default_prevented: false,
        }
    }

    /// A key press with an explicit caret position.
    pub fn with_caret(key: Key, caret: usize) -> Self {
        Self {
            key,
            caret,
            default_prevented: false,
        }
    }

    /// Mark the default action as suppressed.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Text arriving through the platform paste event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteEvent {
    /// Clipboard text.
    pub text: String,
    /// Whether the platform default paste should be suppressed.
    pub default_prevented: bool,
}

impl PasteEvent {
    /// Wrap clipboard text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            default_prevented: false,
        }
    }
}

/// What happens to pending input when the text field loses focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlurBehavior {
    /// Try to commit the pending text as a tag.
    Add,
    /// Discard the pending text.
    Clear,
    /// Leave the pending text untouched.
    #[default]
    None,
}

/// Characters that end composition of the current input.
///
/// The first character is the *primary* delimiter, used to split pasted
/// text. Enter always commits and is not listed here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delimiters(SmallVec<[char; 2]>);

impl Delimiters {
    /// Primary delimiter used when none are configured.
    pub const DEFAULT: char = ',';

    /// Build a delimiter set from characters, in priority order.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self(chars.into_iter().collect())
    }

    /// Whether `c` commits the current input.
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// The character used to split pasted text.
    pub fn primary(&self) -> char {
        self.0.first().copied().unwrap_or(Self::DEFAULT)
    }

    /// Whether `key` commits the current input.
    pub fn commits(&self, key: Key) -> bool {
        match key {
            Key::Enter => true,
            Key::Character(c) => self.contains(c),
            _ => false,
        }
    }

    /// If `text` ends with a delimiter, return the text before it.
    pub fn strip_trailing<'a>(&self, text: &'a str) -> Option<&'a str> {
        let last = text.chars().next_back()?;
        self.contains(last)
            .then(|| &text[..text.len() - last.len_utf8()])
    }

    /// Iterate the configured characters.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self(smallvec![Self::DEFAULT])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn enter_always_commits() {
        let d = Delimiters::new([';']);
        assert!(d.commits(Key::Enter));
        assert!(d.commits(Key::Character(';')));
        assert!(!d.commits(Key::Character(',')));
        assert!(!d.commits(Key::Backspace));
    }

    #[test]
    fn primary_falls_back_to_comma() {
        assert_eq!(Delimiters::default().primary(), ',');
        assert_eq!(Delimiters::new([]).primary(), ',');
        assert_eq!(Delimiters::new(['|', ',']).primary(), '|');
        assert_eq!(Delimiters::new(['|', ',']).iter().collect::<Vec<_>>(), ['|', ',']);
    }

    #[test]
    fn strip_trailing_delimiter() {
        let d = Delimiters::new([',', '、']);
        assert_eq!(d.strip_trailing("abc,"), Some("abc"));
        assert_eq!(d.strip_trailing("日本、"), Some("日本"));
        assert_eq!(d.strip_trailing("abc"), None);
        assert_eq!(d.strip_trailing(""), None);
    }

    #[test]
    fn prevent_default_sets_flag() {
        let mut ev = KeyEvent::with_caret(Key::Home, 3);
        assert!(!ev.default_prevented);
        ev.prevent_default();
        assert!(ev.default_prevented);
        assert_eq!(ev.caret, 3);
    }
}
