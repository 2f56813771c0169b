// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tags and tag id generation.

use alloc::format;
use alloc::string::String;

use hashbrown::HashSet;

/// A single chip in a tag collection.
///
/// `id` is assigned when the tag is created and stays stable for the tag's
/// lifetime; `text` is the user-visible payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// Identifier, unique within a collection.
    pub id: String,
    /// User-visible text.
    pub text: String,
}

impl Tag {
    /// Create a tag from an id and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Source of fresh tag identifiers.
///
/// The host may inject any generator; the store only guarantees that the ids
/// it finally assigns never collide with ids already in the collection.
pub trait IdSource {
    /// Produce the next candidate identifier.
    fn next_id(&mut self) -> String;
}

impl<F> IdSource for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Deterministic ids of the form `{prefix}{n}`, counting up from 1.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Create a generator yielding `tag-1`, `tag-2`, ...
    pub fn new() -> Self {
        Self::with_prefix("tag-")
    }

    /// Create a generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Random UUID v4 ids.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

#[cfg(feature = "std")]
impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        use alloc::string::ToString;
        uuid::Uuid::new_v4().to_string()
    }
}

/// Attempts made against the source before falling back to suffixing.
const MAX_DRAWS: usize = 8;

/// Draw an id from `source` for which `taken` returns `false`.
///
/// A misbehaving source (for example one that always returns the same value)
/// is tolerated: after a few collisions the last draw is suffixed with a
/// counter until it is free.
pub(crate) fn mint_id(source: &mut dyn IdSource, taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = source.next_id();
    for _ in 1..MAX_DRAWS {
        if !taken(&candidate) {
            return candidate;
        }
        candidate = source.next_id();
    }
    if !taken(&candidate) {
        return candidate;
    }
    log::warn!("id source keeps colliding on {candidate:?}, suffixing");
    let mut n: u64 = 1;
    loop {
        let suffixed = format!("{candidate}-{n}");
        if !taken(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}

/// Returns the first id that occurs more than once in `tags`, if any.
pub(crate) fn duplicate_id(tags: &[Tag]) -> Option<&str> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(tags.len());
    tags.iter()
        .map(|t| t.id.as_str())
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "tag-1");
        assert_eq!(ids.next_id(), "tag-2");
        let mut custom = SequentialIds::with_prefix("t");
        assert_eq!(custom.next_id(), "t1");
    }

    #[test]
    fn closures_are_id_sources() {
        let mut n = 0;
        let mut source = move || {
            n += 1;
            n.to_string()
        };
        assert_eq!(IdSource::next_id(&mut source), "1");
        assert_eq!(IdSource::next_id(&mut source), "2");
    }

    #[test]
    fn mint_skips_taken_ids() {
        let mut ids = SequentialIds::new();
        let taken: HashSet<&str> = ["tag-1", "tag-2"].into_iter().collect();
        assert_eq!(mint_id(&mut ids, |id| taken.contains(id)), "tag-3");
    }

    #[test]
    fn mint_survives_constant_source() {
        let mut constant = || "same".to_string();
        let taken: HashSet<&str> = ["same", "same-1"].into_iter().collect();
        assert_eq!(mint_id(&mut constant, |id| taken.contains(id)), "same-2");
    }

    #[test]
    fn duplicate_id_detection() {
        let tags = [Tag::new("a", "x"), Tag::new("b", "y"), Tag::new("a", "z")];
        assert_eq!(duplicate_id(&tags), Some("a"));
        assert_eq!(duplicate_id(&tags[..2]), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn random_ids_are_distinct() {
        let mut ids = RandomIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
