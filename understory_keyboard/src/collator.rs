// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! String comparison for typeahead search.

use core::cmp::Ordering;

/// Compares strings for typeahead matching.
///
/// Locale-aware collation is out of scope; plug one in by implementing this
/// trait (closures of type `Fn(&str, &str) -> Ordering` already do).
pub trait Collator {
    /// Compares `a` with `b`.
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// Returns `true` if `text` starts with `prefix` under this collation.
    ///
    /// The prefix is compared against the first `prefix.chars().count()`
    /// characters of `text`.
    fn is_prefix(&self, prefix: &str, text: &str) -> bool {
        let chars = prefix.chars().count();
        let end = text
            .char_indices()
            .nth(chars)
            .map_or(text.len(), |(idx, _)| idx);
        self.compare(&text[..end], prefix) == Ordering::Equal
    }
}

/// Case-insensitive comparison using Unicode lowercase mappings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl Collator for CaseInsensitive {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
    }
}

impl<F> Collator for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}
