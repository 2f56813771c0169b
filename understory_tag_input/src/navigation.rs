// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard traversal over the tags of a collection.
//!
//! Traversal is linear over positions `0..len` and wraps at both ends. An
//! origin of `None` means "no tag focused yet": forward steps land on the
//! first tag and backward steps on the last.

/// Navigation intent over the tag row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Previous tag (ArrowLeft), wrapping from the first to the last.
    Prev,
    /// Next tag (ArrowRight), wrapping from the last to the first.
    Next,
    /// First tag (Home).
    First,
    /// Last tag (End).
    Last,
}

/// Compute the next focused position.
///
/// Returns `None` only when `len == 0`. A stale origin at or beyond `len` is
/// treated as if nothing were focused.
pub fn step(origin: Option<usize>, len: usize, direction: Navigation) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    let origin = origin.filter(|&i| i < len);
    let next = match direction {
        Navigation::First => 0,
        Navigation::Last => last,
        Navigation::Next => match origin {
            Some(pos) if pos < last => pos + 1,
            Some(_) => 0,
            None => 0,
        },
        Navigation::Prev => match origin {
            Some(pos) if pos > 0 => pos - 1,
            Some(_) => last,
            None => last,
        },
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_prev_wrap() {
        assert_eq!(step(Some(0), 3, Navigation::Next), Some(1));
        assert_eq!(step(Some(2), 3, Navigation::Next), Some(0));
        assert_eq!(step(Some(1), 3, Navigation::Prev), Some(0));
        assert_eq!(step(Some(0), 3, Navigation::Prev), Some(2));
    }

    #[test]
    fn unfocused_origin_enters_from_the_ends() {
        assert_eq!(step(None, 3, Navigation::Next), Some(0));
        assert_eq!(step(None, 3, Navigation::Prev), Some(2));
    }

    #[test]
    fn home_end_jump() {
        assert_eq!(step(Some(1), 4, Navigation::First), Some(0));
        assert_eq!(step(None, 4, Navigation::Last), Some(3));
    }

    #[test]
    fn empty_row_has_no_target() {
        for nav in [
            Navigation::Prev,
            Navigation::Next,
            Navigation::First,
            Navigation::Last,
        ] {
            assert_eq!(step(None, 0, nav), None);
            assert_eq!(step(Some(0), 0, nav), None);
        }
    }

    #[test]
    fn stale_origin_is_ignored() {
        assert_eq!(step(Some(9), 2, Navigation::Prev), Some(1));
        assert_eq!(step(Some(9), 2, Navigation::Next), Some(0));
    }

    #[test]
    fn single_tag_wraps_onto_itself() {
        assert_eq!(step(Some(0), 1, Navigation::Next), Some(0));
        assert_eq!(step(Some(0), 1, Navigation::Prev), Some(0));
    }
}
