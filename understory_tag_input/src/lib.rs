// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Tag Input: a headless interaction engine for tag input controls.
//!
//! A tag input is a text field that turns typed or pasted text into an
//! ordered collection of discrete tags. This crate owns the behavior and none
//! of the rendering:
//!
//! - **Tags and ids** ([`Tag`], [`IdSource`]): every tag carries an id that is
//!   unique within its collection, independent of its text.
//! - **Store** ([`TagStore`]): the ordered collection, either owned by the
//!   store ([`Ownership::Uncontrolled`]) or by the host
//!   ([`Ownership::Controlled`]), in which case mutations are only proposed.
//! - **Constraints** ([`TagConstraints`]): the admission pipeline for new
//!   tags (capacity, length bounds, custom predicate, autocomplete
//!   restriction, duplicates) and the removal floor.
//! - **Interaction** ([`TagInput`]): keyboard, paste, blur, focus, and click
//!   handling. Each handler returns the [`TagInputEvent`]s it produced.
//! - **View data** ([`TagView`], [`TagFlags`]): per-tag render state, with
//!   optional sorting and truncation for display.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_tag_input::{
//!     Key, KeyEvent, PasteEvent, Rejection, TagConstraints, TagInput, TagInputConfig,
//!     TagInputEvent, TagStore,
//! };
//!
//! let config = TagInputConfig::default()
//!     .with_add_on_paste(true)
//!     .with_constraints(TagConstraints::default().with_max_tags(3));
//! let mut input = TagInput::new(TagStore::uncontrolled(Vec::new()), config);
//!
//! // Type a tag and press Enter.
//! input.on_input_change("rust");
//! input.on_key_down(&mut KeyEvent::new(Key::Enter));
//!
//! // Paste two more in one go.
//! let mut paste = PasteEvent::new("zig, go");
//! input.on_paste(&mut paste);
//! assert!(paste.default_prevented);
//! assert_eq!(input.count_label(), "3/3");
//!
//! // The collection is full now.
//! let events = input.add_tag("c");
//! assert_eq!(events, [TagInputEvent::Rejected(Rejection::AtCapacity { max: 3 })]);
//!
//! // Backspace on an empty field focuses the last tag, a second one removes it.
//! input.on_key_down(&mut KeyEvent::new(Key::Backspace));
//! assert_eq!(input.focused_index(), Some(2));
//! input.on_key_down(&mut KeyEvent::new(Key::Backspace));
//! let texts: Vec<_> = input.tags().iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["rust", "zig"]);
//! ```
//!
//! ## Controlled collections
//!
//! With [`TagStore::controlled`] the host keeps the authoritative collection.
//! Every mutation still yields [`TagInputEvent::ValueChange`] with the next
//! collection, but [`TagInput::tags`] keeps showing the host's value until the
//! host hands one back through [`TagInput::set_value`].
//!
//! ## Features
//!
//! - `std` (default): fresh ids come from random v4 UUIDs ([`RandomIds`]).
//!   Without it, [`SequentialIds`] is the default source.
//! - `serde`: `Serialize`/`Deserialize` for [`Tag`], [`Delimiters`],
//!   [`BlurBehavior`], and [`DisplayOptions`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod autocomplete;
pub mod constraints;
pub mod keys;
pub mod machine;
pub mod navigation;
pub mod store;
pub mod tag;
pub mod view;

pub use autocomplete::{Autocomplete, Suggestion};
pub use constraints::{ConfigError, Rejection, TagConstraints, TagPredicate};
pub use keys::{BlurBehavior, Delimiters, Key, KeyEvent, PasteEvent};
pub use machine::{InteractionMode, TagInput, TagInputConfig, TagInputEvent};
pub use navigation::Navigation;
pub use store::{Ownership, TagStore};
#[cfg(feature = "std")]
pub use tag::RandomIds;
pub use tag::{IdSource, SequentialIds, Tag};
pub use view::{DisplayOptions, TagFlags, TagView};
