// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived view data for presentation layers.
//!
//! Nothing in here mutates state. A renderer reads [`TagView`]s and the
//! labels produced by [`TagInput`](crate::TagInput) and decides on the
//! concrete elements.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use bitflags::bitflags;

use crate::tag::Tag;

bitflags! {
    /// Per-tag interaction state.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TagFlags: u8 {
        /// The keyboard cursor sits on this tag.
        const FOCUSED = 1 << 0;
        /// The tag is selected/highlighted (for example after a click).
        const ACTIVE = 1 << 1;
        /// The tag cannot be interacted with.
        const DISABLED = 1 << 2;
    }
}

/// How tags are presented. Display only; the collection order is untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayOptions {
    /// Present tags sorted by text.
    pub sort: bool,
    /// Truncate display text longer than this many characters, appending `...`.
    pub truncate: Option<usize>,
}

/// A tag as a renderer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagView<'a> {
    /// Position in the collection (not in the display order).
    pub index: usize,
    /// The underlying tag.
    pub tag: &'a Tag,
    /// Text to show, possibly truncated.
    pub display_text: Cow<'a, str>,
    /// Interaction state.
    pub flags: TagFlags,
}

/// Build views for `tags`, in display order.
pub(crate) fn tag_views<'a>(
    tags: &'a [Tag],
    options: &DisplayOptions,
    focused: Option<usize>,
    active: Option<usize>,
    disabled: bool,
) -> Vec<TagView<'a>> {
    let mut views: Vec<TagView<'a>> = tags
        .iter()
        .enumerate()
        .map(|(index, tag)| {
            let mut flags = TagFlags::empty();
            flags.set(TagFlags::FOCUSED, focused == Some(index));
            flags.set(TagFlags::ACTIVE, active == Some(index));
            flags.set(TagFlags::DISABLED, disabled);
            TagView {
                index,
                tag,
                display_text: truncate(&tag.text, options.truncate),
                flags,
            }
        })
        .collect();
    if options.sort {
        views.sort_by(|a, b| a.tag.text.cmp(&b.tag.text));
    }
    views
}

/// Shorten `text` to `limit` characters plus `...`.
pub fn truncate(text: &str, limit: Option<usize>) -> Cow<'_, str> {
    match limit {
        Some(limit) if text.chars().count() > limit => {
            let cut: String = text.chars().take(limit).collect();
            Cow::Owned(format!("{cut}..."))
        }
        _ => Cow::Borrowed(text),
    }
}

/// `"n/max"` when bounded, `"n"` otherwise.
pub fn count_label(len: usize, max_tags: Option<usize>) -> String {
    match max_tags {
        Some(max) => format!("{len}/{max}"),
        None => format!("{len}"),
    }
}
