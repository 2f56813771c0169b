// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autocomplete options and suggestion filtering.
//!
//! Presentation of the dropdown is left to the host; this module only
//! decides which options to show for the current input and whether each one
//! is already in the collection.

use alloc::string::String;
use alloc::vec::Vec;

use crate::constraints::TagPredicate;
use crate::tag::Tag;

/// Autocomplete options plus an optional host filter.
#[derive(Clone, Debug, Default)]
pub struct Autocomplete {
    options: Vec<Tag>,
    filter: Option<TagPredicate>,
}

/// One visible suggestion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Suggestion<'a> {
    /// Position of the option in [`Autocomplete::options`].
    pub index: usize,
    /// The option itself.
    pub option: &'a Tag,
    /// Whether a tag with the same text is already in the collection.
    pub selected: bool,
}

impl Autocomplete {
    /// Options in display order.
    pub fn new(options: Vec<Tag>) -> Self {
        Self {
            options,
            filter: None,
        }
    }

    /// Only offer options whose text passes `f`.
    #[must_use]
    pub fn with_filter(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(TagPredicate::new(f));
        self
    }

    /// All configured options, unfiltered.
    pub fn options(&self) -> &[Tag] {
        &self.options
    }

    /// Whether there are no options at all.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Option at `index`, if it exists and passes the host filter.
    pub fn offered(&self, index: usize) -> Option<&Tag> {
        self.options.get(index).filter(|o| self.passes_filter(o))
    }

    /// Options to show for `query`, given the current collection.
    ///
    /// An option is shown when it passes the host filter and its text
    /// contains `query` (trimmed, case-insensitive). A blank query shows
    /// every filtered option.
    pub fn suggestions<'a>(&'a self, query: &str, tags: &[Tag]) -> Vec<Suggestion<'a>> {
        let needle: String = query.trim().to_lowercase();
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| self.passes_filter(o))
            .filter(|(_, o)| needle.is_empty() || o.text.to_lowercase().contains(&needle))
            .map(|(index, option)| Suggestion {
                index,
                option,
                selected: tags.iter().any(|t| t.text == option.text),
            })
            .collect()
    }

    fn passes_filter(&self, option: &Tag) -> bool {
        self.filter.as_ref().is_none_or(|f| f.test(&option.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn options() -> Autocomplete {
        Autocomplete::new(vec![
            Tag::new("o1", "Sports"),
            Tag::new("o2", "Programming"),
            Tag::new("o3", "Travel"),
        ])
    }

    fn texts<'a>(s: &[Suggestion<'a>]) -> Vec<&'a str> {
        s.iter().map(|s| s.option.text.as_str()).collect()
    }

    #[test]
    fn blank_query_shows_everything() {
        let ac = options();
        assert_eq!(texts(&ac.suggestions("  ", &[])), ["Sports", "Programming", "Travel"]);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let ac = options();
        let s = ac.suggestions("R", &[]);
        assert_eq!(texts(&s), ["Sports", "Programming", "Travel"]);
        let s = ac.suggestions("gram", &[]);
        assert_eq!(texts(&s), ["Programming"]);
        assert_eq!(s[0].index, 1);
    }

    #[test]
    fn host_filter_applies_first() {
        let ac = options().with_filter(|t| t != "Travel");
        assert_eq!(texts(&ac.suggestions("", &[])), ["Sports", "Programming"]);
        assert!(ac.offered(2).is_none());
        assert_eq!(ac.offered(0).map(|o| o.text.as_str()), Some("Sports"));
    }

    #[test]
    fn marks_options_already_present() {
        let ac = options();
        let tags = [Tag::new("t1", "Travel")];
        let s = ac.suggestions("", &tags);
        assert_eq!(
            s.iter().map(|s| s.selected).collect::<Vec<_>>(),
            [false, false, true]
        );
    }
}
