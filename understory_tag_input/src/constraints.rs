// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint pipeline: decide whether candidate text may become a tag.
//!
//! Every check here is a pure function of the candidate text, the current
//! collection, and a [`TagConstraints`] record passed in on every call. No
//! check ever panics; failures come back as a [`Rejection`].
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. the control is disabled or read-only ([`Rejection::Locked`]),
//! 2. the trimmed text is blank ([`Rejection::Empty`]),
//! 3. the collection is at `max_tags` ([`Rejection::AtCapacity`]),
//! 4. `min_length` / `max_length` ([`Rejection::TooShort`], [`Rejection::TooLong`]),
//! 5. the custom predicate ([`Rejection::Invalid`]),
//! 6. autocomplete restriction ([`Rejection::NotAnOption`]),
//! 7. duplicates, unless allowed ([`Rejection::Duplicate`]).
//!
//! ```
//! use understory_tag_input::constraints::{Rejection, TagConstraints, check_candidate};
//! use understory_tag_input::Tag;
//!
//! let tags = [Tag::new("1", "Sports")];
//! let constraints = TagConstraints::default().with_min_length(3);
//!
//! assert_eq!(check_candidate("  Music ", &tags, &constraints, &[]), Ok("Music"));
//! assert_eq!(check_candidate("Sports", &tags, &constraints, &[]), Err(Rejection::Duplicate));
//! assert_eq!(check_candidate("ab", &tags, &constraints, &[]), Err(Rejection::TooShort { min: 3 }));
//! ```

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::keys::Delimiters;
use crate::tag::Tag;

/// Host-supplied validation predicate over trimmed tag text.
#[derive(Clone)]
pub struct TagPredicate(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl TagPredicate {
    /// Wrap a predicate. It receives the trimmed candidate text.
    pub fn new(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate the predicate.
    pub fn test(&self, text: &str) -> bool {
        (self.0)(text)
    }
}

impl fmt::Debug for TagPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TagPredicate(..)")
    }
}

/// Rules applied to every candidate tag.
///
/// This is a passive record: nothing here is cached between calls, so a host
/// may swap it out between events and the next check sees the new rules.
#[derive(Clone, Debug, Default)]
pub struct TagConstraints {
    /// Upper bound on the collection size; `None` means unbounded.
    pub max_tags: Option<usize>,
    /// Floor under which removals are refused. `0` disables the floor.
    pub min_tags: usize,
    /// Admit tags whose text already exists in the collection.
    pub allow_duplicates: bool,
    /// Minimum trimmed length, in characters.
    pub min_length: Option<usize>,
    /// Maximum trimmed length, in characters.
    pub max_length: Option<usize>,
    /// Custom validation predicate.
    pub validate_tag: Option<TagPredicate>,
    /// Only admit text that exactly matches an autocomplete option.
    pub restrict_to_autocomplete_options: bool,
    /// Characters that commit the current input (Enter always commits).
    pub delimiters: Delimiters,
    /// Disabled controls reject every mutation.
    pub disabled: bool,
    /// Read-only controls reject every mutation.
    pub read_only: bool,
}

impl TagConstraints {
    /// Set [`max_tags`](Self::max_tags).
    #[must_use]
    pub fn with_max_tags(mut self, max: usize) -> Self {
        self.max_tags = Some(max);
        self
    }

    /// Set [`min_tags`](Self::min_tags).
    #[must_use]
    pub fn with_min_tags(mut self, min: usize) -> Self {
        self.min_tags = min;
        self
    }

    /// Set [`allow_duplicates`](Self::allow_duplicates).
    #[must_use]
    pub fn with_allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Set [`min_length`](Self::min_length).
    #[must_use]
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set [`max_length`](Self::max_length).
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set the custom validation predicate.
    #[must_use]
    pub fn with_validator(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.validate_tag = Some(TagPredicate::new(f));
        self
    }

    /// Set [`restrict_to_autocomplete_options`](Self::restrict_to_autocomplete_options).
    #[must_use]
    pub fn with_restrict_to_autocomplete_options(mut self, restrict: bool) -> Self {
        self.restrict_to_autocomplete_options = restrict;
        self
    }

    /// Set the delimiter characters.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Set [`disabled`](Self::disabled).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set [`read_only`](Self::read_only).
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Whether the control refuses all mutations.
    pub fn is_locked(&self) -> bool {
        self.disabled || self.read_only
    }

    /// Whether a collection of `len` tags is at capacity.
    pub fn is_full(&self, len: usize) -> bool {
        self.max_tags.is_some_and(|max| len >= max)
    }

    /// Check the record for developer errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max) = self.max_tags {
            if self.min_tags > max {
                return Err(ConfigError::TagRange {
                    min: self.min_tags,
                    max,
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(ConfigError::LengthRange { min, max });
            }
        }
        Ok(())
    }
}

/// Why a candidate or mutation was refused.
///
/// Rejections are expected and frequent; hosts typically surface them only
/// as an "invalid input" style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The control is disabled or read-only.
    #[error("the tag input is disabled or read-only")]
    Locked,
    /// The trimmed candidate is empty, or there is nothing to act on.
    #[error("tag text is empty")]
    Empty,
    /// Admitting the candidate would exceed `max_tags`.
    #[error("at most {max} tags are allowed")]
    AtCapacity {
        /// Configured maximum.
        max: usize,
    },
    /// The trimmed candidate is shorter than `min_length`.
    #[error("tag text must be at least {min} characters")]
    TooShort {
        /// Configured minimum length.
        min: usize,
    },
    /// The trimmed candidate is longer than `max_length`.
    #[error("tag text must be at most {max} characters")]
    TooLong {
        /// Configured maximum length.
        max: usize,
    },
    /// The custom predicate returned `false`.
    #[error("tag text failed validation")]
    Invalid,
    /// The candidate is not one of the autocomplete options.
    #[error("tag text is not an autocomplete option")]
    NotAnOption,
    /// A tag with the same text already exists.
    #[error("tag already exists")]
    Duplicate,
    /// Removing would drop the collection below `min_tags`.
    #[error("at least {min} tags are required")]
    BelowMinimum {
        /// Configured floor.
        min: usize,
    },
}

impl Rejection {
    /// Whether this rejection should flag the typed text as invalid.
    ///
    /// Locked controls and blank input give no feedback.
    pub fn marks_input_invalid(&self) -> bool {
        !matches!(self, Self::Locked | Self::Empty)
    }
}

/// Developer error in a [`TagConstraints`] record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `min_tags` is greater than `max_tags`.
    #[error("min_tags ({min}) exceeds max_tags ({max})")]
    TagRange {
        /// Configured `min_tags`.
        min: usize,
        /// Configured `max_tags`.
        max: usize,
    },
    /// `min_length` is greater than `max_length`.
    #[error("min_length ({min}) exceeds max_length ({max})")]
    LengthRange {
        /// Configured `min_length`.
        min: usize,
        /// Configured `max_length`.
        max: usize,
    },
}

/// Check a single candidate against the current collection.
///
/// On success returns the trimmed text that should be stored.
pub fn check_candidate<'a>(
    candidate: &'a str,
    tags: &[Tag],
    constraints: &TagConstraints,
    options: &[Tag],
) -> Result<&'a str, Rejection> {
    admit(
        candidate,
        tags.len(),
        |text| tags.iter().any(|t| t.text == text),
        constraints,
        options,
    )
}

/// Check pasted text, split on the primary delimiter, as one batch.
///
/// Segments are trimmed and blank ones dropped. If the batch would push the
/// collection past `max_tags` the whole batch is refused. Otherwise every
/// segment runs through the single-candidate checks against the projected
/// collection (so duplicates inside the batch are caught too) and failing
/// segments are skipped. Refused when no segment survives, reporting the
/// first segment's rejection.
pub fn check_batch(
    pasted: &str,
    tags: &[Tag],
    constraints: &TagConstraints,
    options: &[Tag],
) -> Result<Vec<String>, Rejection> {
    if constraints.is_locked() {
        return Err(Rejection::Locked);
    }
    let segments: Vec<&str> = pasted
        .split(constraints.delimiters.primary())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return Err(Rejection::Empty);
    }
    if let Some(max) = constraints.max_tags {
        if tags.len() + segments.len() > max {
            return Err(Rejection::AtCapacity { max });
        }
    }

    let mut accepted: Vec<String> = Vec::with_capacity(segments.len());
    let mut first_rejection = None;
    for segment in segments {
        let verdict = admit(
            segment,
            tags.len() + accepted.len(),
            |text| tags.iter().any(|t| t.text == text) || accepted.iter().any(|a| a == text),
            constraints,
            options,
        );
        match verdict {
            Ok(text) => accepted.push(text.to_string()),
            Err(rejection) => {
                log::debug!("paste segment {segment:?} rejected: {rejection}");
                first_rejection.get_or_insert(rejection);
            }
        }
    }
    if accepted.is_empty() {
        return Err(first_rejection.unwrap_or(Rejection::Empty));
    }
    Ok(accepted)
}

/// Check whether a tag may be removed from a collection of `len` tags.
pub fn check_removal(len: usize, constraints: &TagConstraints) -> Result<(), Rejection> {
    if constraints.is_locked() {
        return Err(Rejection::Locked);
    }
    if constraints.min_tags > 0 && len <= constraints.min_tags {
        return Err(Rejection::BelowMinimum {
            min: constraints.min_tags,
        });
    }
    Ok(())
}

/// Check whether a collection of `len` tags may be cleared in one step.
///
/// Clearing is only possible when there is no floor at all.
pub fn check_clear(len: usize, constraints: &TagConstraints) -> Result<(), Rejection> {
    if constraints.is_locked() {
        return Err(Rejection::Locked);
    }
    if constraints.min_tags > 0 {
        return Err(Rejection::BelowMinimum {
            min: constraints.min_tags,
        });
    }
    if len == 0 {
        return Err(Rejection::Empty);
    }
    Ok(())
}

fn admit<'a>(
    candidate: &'a str,
    len: usize,
    exists: impl Fn(&str) -> bool,
    constraints: &TagConstraints,
    options: &[Tag],
) -> Result<&'a str, Rejection> {
    if constraints.is_locked() {
        return Err(Rejection::Locked);
    }
    let text = candidate.trim();
    if text.is_empty() {
        return Err(Rejection::Empty);
    }
    if let Some(max) = constraints.max_tags {
        if len >= max {
            return Err(Rejection::AtCapacity { max });
        }
    }
    let chars = text.chars().count();
    if let Some(min) = constraints.min_length {
        if chars < min {
            return Err(Rejection::TooShort { min });
        }
    }
    if let Some(max) = constraints.max_length {
        if chars > max {
            return Err(Rejection::TooLong { max });
        }
    }
    if let Some(predicate) = &constraints.validate_tag {
        if !predicate.test(text) {
            return Err(Rejection::Invalid);
        }
    }
    if constraints.restrict_to_autocomplete_options && !options.iter().any(|o| o.text == text) {
        return Err(Rejection::NotAnOption);
    }
    if !constraints.allow_duplicates && exists(text) {
        return Err(Rejection::Duplicate);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tags(texts: &[&str]) -> Vec<Tag> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Tag::new(alloc::format!("{i}"), *t))
            .collect()
    }

    #[test]
    fn accepts_and_trims() {
        let c = TagConstraints::default();
        assert_eq!(check_candidate("  rust  ", &[], &c, &[]), Ok("rust"));
    }

    #[test]
    fn blank_is_always_rejected() {
        let c = TagConstraints::default().with_allow_duplicates(true);
        assert_eq!(check_candidate("   ", &[], &c, &[]), Err(Rejection::Empty));
        assert_eq!(check_candidate("", &[], &c, &[]), Err(Rejection::Empty));
    }

    #[test]
    fn locked_wins_over_everything() {
        let existing = tags(&["a"]);
        let c = TagConstraints::default().with_max_tags(1).with_read_only(true);
        assert_eq!(check_candidate("a", &existing, &c, &[]), Err(Rejection::Locked));
        let c = TagConstraints::default().with_disabled(true);
        assert_eq!(check_candidate("", &[], &c, &[]), Err(Rejection::Locked));
    }

    #[test]
    fn duplicate_rejection_is_case_sensitive() {
        let existing = tags(&["Sports"]);
        let c = TagConstraints::default();
        assert_eq!(
            check_candidate("Sports", &existing, &c, &[]),
            Err(Rejection::Duplicate)
        );
        assert_eq!(check_candidate("sports", &existing, &c, &[]), Ok("sports"));
        let c = c.with_allow_duplicates(true);
        assert_eq!(check_candidate("Sports", &existing, &c, &[]), Ok("Sports"));
    }

    #[test]
    fn capacity_boundary() {
        let c = TagConstraints::default().with_max_tags(2);
        let full = tags(&["a", "b"]);
        assert_eq!(
            check_candidate("c", &full, &c, &[]),
            Err(Rejection::AtCapacity { max: 2 })
        );
        assert_eq!(check_candidate("c", &full[..1], &c, &[]), Ok("c"));
    }

    #[test]
    fn length_bounds_use_trimmed_chars() {
        let c = TagConstraints::default().with_min_length(3).with_max_length(4);
        assert_eq!(
            check_candidate("ab", &[], &c, &[]),
            Err(Rejection::TooShort { min: 3 })
        );
        assert_eq!(check_candidate(" abc ", &[], &c, &[]), Ok("abc"));
        assert_eq!(check_candidate("äöüß", &[], &c, &[]), Ok("äöüß"));
        assert_eq!(
            check_candidate("abcde", &[], &c, &[]),
            Err(Rejection::TooLong { max: 4 })
        );
    }

    #[test]
    fn predicate_sees_trimmed_text() {
        let c = TagConstraints::default().with_validator(|t| !t.starts_with(' ') && t.len() < 5);
        assert_eq!(check_candidate("  ok", &[], &c, &[]), Ok("ok"));
        assert_eq!(check_candidate("toolong", &[], &c, &[]), Err(Rejection::Invalid));
    }

    #[test]
    fn restriction_requires_exact_option() {
        let options = tags(&["Rust", "Zig"]);
        let c = TagConstraints::default().with_restrict_to_autocomplete_options(true);
        assert_eq!(check_candidate("Rust", &[], &c, &options), Ok("Rust"));
        assert_eq!(
            check_candidate("rust", &[], &c, &options),
            Err(Rejection::NotAnOption)
        );
    }

    #[test]
    fn first_failing_check_wins() {
        // Too short, invalid, and duplicate at once: length is checked first.
        let existing = tags(&["a"]);
        let c = TagConstraints::default()
            .with_min_length(2)
            .with_validator(|_| false);
        assert_eq!(
            check_candidate("a", &existing, &c, &[]),
            Err(Rejection::TooShort { min: 2 })
        );
        // Predicate runs before the duplicate guard.
        let c = TagConstraints::default().with_validator(|_| false);
        assert_eq!(check_candidate("a", &existing, &c, &[]), Err(Rejection::Invalid));
    }

    #[test]
    fn batch_splits_and_trims() {
        let c = TagConstraints::default();
        assert_eq!(
            check_batch("Tag 1, Tag 2", &[], &c, &[]),
            Ok(vec!["Tag 1".to_string(), "Tag 2".to_string()])
        );
    }

    #[test]
    fn batch_uses_primary_delimiter() {
        let c = TagConstraints::default().with_delimiters(Delimiters::new([';', ',']));
        assert_eq!(
            check_batch("a;b,c", &[], &c, &[]),
            Ok(vec!["a".to_string(), "b,c".to_string()])
        );
    }

    #[test]
    fn batch_is_all_or_nothing_on_capacity() {
        let c = TagConstraints::default().with_max_tags(3);
        let existing = tags(&["a", "b"]);
        assert_eq!(
            check_batch("c, d", &existing, &c, &[]),
            Err(Rejection::AtCapacity { max: 3 })
        );
        assert_eq!(
            check_batch("c", &existing, &c, &[]),
            Ok(vec!["c".to_string()])
        );
    }

    #[test]
    fn batch_skips_failing_segments() {
        let existing = tags(&["a"]);
        let c = TagConstraints::default();
        assert_eq!(
            check_batch("a, b, b, , c", &existing, &c, &[]),
            Ok(vec!["b".to_string(), "c".to_string()])
        );
        assert_eq!(check_batch("a, a", &existing, &c, &[]), Err(Rejection::Duplicate));
        assert_eq!(check_batch(" , ", &existing, &c, &[]), Err(Rejection::Empty));
    }

    #[test]
    fn removal_respects_floor() {
        let c = TagConstraints::default().with_min_tags(1);
        assert_eq!(check_removal(1, &c), Err(Rejection::BelowMinimum { min: 1 }));
        assert_eq!(check_removal(2, &c), Ok(()));
        assert_eq!(check_removal(1, &TagConstraints::default()), Ok(()));
    }

    #[test]
    fn clear_requires_no_floor() {
        let c = TagConstraints::default();
        assert_eq!(check_clear(2, &c), Ok(()));
        assert_eq!(check_clear(0, &c), Err(Rejection::Empty));
        assert_eq!(
            check_clear(5, &c.clone().with_min_tags(1)),
            Err(Rejection::BelowMinimum { min: 1 })
        );
        assert_eq!(check_clear(5, &c.with_disabled(true)), Err(Rejection::Locked));
    }

    #[test]
    fn config_validation() {
        assert_eq!(TagConstraints::default().validate(), Ok(()));
        assert_eq!(
            TagConstraints::default().with_max_tags(1).with_min_tags(2).validate(),
            Err(ConfigError::TagRange { min: 2, max: 1 })
        );
        assert_eq!(
            TagConstraints::default()
                .with_min_length(5)
                .with_max_length(2)
                .validate(),
            Err(ConfigError::LengthRange { min: 5, max: 2 })
        );
    }
}
