// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag store: the ordered tag collection and the only place it is mutated.
//!
//! The store performs no business-rule checks; those belong to
//! [`constraints`](crate::constraints). It assigns ids, appends, removes,
//! reorders, and clears.
//!
//! ## Ownership
//!
//! Ownership is chosen once, at construction:
//!
//! - [`Ownership::Uncontrolled`]: the store owns the collection and every
//!   mutation is applied in place.
//! - [`Ownership::Controlled`]: an external owner holds the authoritative
//!   collection. Mutations only *propose* the next collection; the store
//!   keeps showing the owner's value until the owner re-supplies it through
//!   [`TagStore::set_value`].
//!
//! In both modes the next full collection is recorded and can be collected
//! with [`TagStore::take_change`], so callers never branch on ownership.
//!
//! ```
//! use understory_tag_input::{SequentialIds, TagStore};
//!
//! let mut store = TagStore::uncontrolled(Vec::new()).with_id_source(SequentialIds::new());
//! let a = store.add(" rust ");
//! assert_eq!((a.id.as_str(), a.text.as_str()), ("tag-1", "rust"));
//! assert_eq!(store.take_change().map(|c| c.len()), Some(1));
//!
//! let mut controlled = TagStore::controlled(Vec::new());
//! controlled.add("zig");
//! // Still the owner's (empty) value until it is re-supplied.
//! assert!(controlled.tags().is_empty());
//! let proposal = controlled.take_change().unwrap();
//! controlled.set_value(proposal);
//! assert_eq!(controlled.tags()[0].text, "zig");
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::tag::{IdSource, Tag, duplicate_id, mint_id};

/// Who owns the authoritative collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The store owns the collection.
    Uncontrolled,
    /// An external owner holds the collection; the store proposes changes.
    Controlled,
}

/// Ordered tag collection with controlled/uncontrolled ownership.
pub struct TagStore {
    tags: Vec<Tag>,
    ownership: Ownership,
    ids: Box<dyn IdSource>,
    change: Option<Vec<Tag>>,
}

impl fmt::Debug for TagStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagStore")
            .field("tags", &self.tags)
            .field("ownership", &self.ownership)
            .field("change", &self.change)
            .finish_non_exhaustive()
    }
}

impl TagStore {
    /// Create a store that owns its collection, seeded with `initial`.
    pub fn uncontrolled(initial: Vec<Tag>) -> Self {
        Self::with_ownership(initial, Ownership::Uncontrolled)
    }

    /// Create a store whose collection is owned by the caller.
    pub fn controlled(value: Vec<Tag>) -> Self {
        Self::with_ownership(value, Ownership::Controlled)
    }

    fn with_ownership(tags: Vec<Tag>, ownership: Ownership) -> Self {
        warn_on_duplicate_ids(&tags);
        Self {
            tags,
            ownership,
            ids: default_id_source(),
            change: None,
        }
    }

    /// Replace the id generator.
    #[must_use]
    pub fn with_id_source(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Who owns the authoritative collection.
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// The visible collection.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Number of visible tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the visible collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tag at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    /// Position of the tag with `id`, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.id == id)
    }

    /// Re-supply the authoritative collection.
    ///
    /// In controlled mode this is how the owner accepts (or overrides) a
    /// proposal. In uncontrolled mode it resets the owned collection.
    pub fn set_value(&mut self, tags: Vec<Tag>) {
        warn_on_duplicate_ids(&tags);
        self.tags = tags;
    }

    /// Append a tag with trimmed `text` and a fresh id.
    pub fn add(&mut self, text: &str) -> Tag {
        let tag = {
            let taken: HashSet<&str> = self.tags.iter().map(|t| t.id.as_str()).collect();
            Tag {
                id: mint_id(&mut *self.ids, |id| taken.contains(id)),
                text: String::from(text.trim()),
            }
        };
        let mut next = self.tags.clone();
        next.push(tag.clone());
        self.commit(next);
        tag
    }

    /// Append one tag per text in a single commit.
    ///
    /// Returns the new tags in order. Nothing is committed for an empty input.
    pub fn extend<I, S>(&mut self, texts: I) -> Vec<Tag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added: Vec<Tag> = Vec::new();
        {
            let taken: HashSet<&str> = self.tags.iter().map(|t| t.id.as_str()).collect();
            for text in texts {
                let id = mint_id(&mut *self.ids, |id| {
                    taken.contains(id) || added.iter().any(|t| t.id == id)
                });
                added.push(Tag {
                    id,
                    text: String::from(text.as_ref().trim()),
                });
            }
        }
        if !added.is_empty() {
            let mut next = self.tags.clone();
            next.extend(added.iter().cloned());
            self.commit(next);
        }
        added
    }

    /// Remove the tag with `id`.
    ///
    /// An unknown id is a silent no-op and returns `None`.
    pub fn remove(&mut self, id: &str) -> Option<Tag> {
        let index = self.position(id)?;
        let mut next = self.tags.clone();
        let removed = next.remove(index);
        self.commit(next);
        Some(removed)
    }

    /// Move the tag at `from` so that it ends up at `to`.
    ///
    /// Both indices must be in `0..len`; anything else is refused without
    /// touching the collection and returns `false`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.tags.len();
        if from >= len || to >= len {
            log::debug!("reorder {from} -> {to} out of range for {len} tags");
            return false;
        }
        let mut next = self.tags.clone();
        let tag = next.remove(from);
        next.insert(to, tag);
        self.commit(next);
        true
    }

    /// Empty the collection in one commit, returning what was removed.
    ///
    /// The store does not consult `min_tags`; callers must.
    pub fn clear(&mut self) -> Vec<Tag> {
        let removed = self.tags.clone();
        self.commit(Vec::new());
        removed
    }

    /// Take the most recent committed (or proposed) collection, if any.
    pub fn take_change(&mut self) -> Option<Vec<Tag>> {
        self.change.take()
    }

    fn commit(&mut self, next: Vec<Tag>) {
        if self.ownership == Ownership::Uncontrolled {
            self.tags.clone_from(&next);
        }
        self.change = Some(next);
    }
}

fn warn_on_duplicate_ids(tags: &[Tag]) {
    if let Some(id) = duplicate_id(tags) {
        log::warn!("tag collection contains duplicate id {id:?}");
    }
}

#[cfg(feature = "std")]
fn default_id_source() -> Box<dyn IdSource> {
    Box::new(crate::tag::RandomIds)
}

#[cfg(not(feature = "std"))]
fn default_id_source() -> Box<dyn IdSource> {
    Box::new(crate::tag::SequentialIds::new())
}
