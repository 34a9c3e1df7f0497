// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead: jump to an item by typing the start of its text.
//!
//! [`TypeSelect`] accumulates printable characters into a search buffer and
//! resolves it through [`KeyboardDelegate::key_for_search`]. Time is supplied
//! by the caller in milliseconds, so the buffer has no hidden timer and is
//! easy to test.
//!
//! ```
//! use understory_collection::{Collection, ItemSpec};
//! use understory_keyboard::{KeyboardConfig, ListKeyboardDelegate, TypeSelect, TypeSelectOutcome};
//!
//! let c = Collection::from_items([
//!     ItemSpec::item(1, "Apple", ()),
//!     ItemSpec::item(2, "Banana", ()),
//!     ItemSpec::item(3, "Blueberry", ()),
//! ])
//! .unwrap();
//! let delegate = ListKeyboardDelegate::new(&c, KeyboardConfig::default());
//! let mut typeahead = TypeSelect::new();
//!
//! assert_eq!(typeahead.input('b', None, &delegate, 0), TypeSelectOutcome::Focus(2));
//! assert_eq!(typeahead.input('l', Some(&2), &delegate, 100), TypeSelectOutcome::Focus(3));
//! // After a second of silence the buffer starts over.
//! assert_eq!(typeahead.input('a', Some(&3), &delegate, 1200), TypeSelectOutcome::Focus(1));
//! ```

use alloc::string::String;

use crate::delegate::KeyboardDelegate;

/// Default inactivity timeout, in milliseconds.
pub const TYPEAHEAD_TIMEOUT_MS: u64 = 1000;

/// What a keystroke did to the typeahead state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSelectOutcome<K> {
    /// The character was not used for search; let other handlers see it.
    Ignored,
    /// The character was consumed but no item matches.
    NoMatch,
    /// Focus should move to this key.
    Focus(K),
}

/// Typeahead buffer with an inactivity timeout.
#[derive(Clone, Debug)]
pub struct TypeSelect {
    search: String,
    last_input_ms: Option<u64>,
    timeout_ms: u64,
}

impl Default for TypeSelect {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSelect {
    /// Creates an empty buffer with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(TYPEAHEAD_TIMEOUT_MS)
    }

    /// Creates an empty buffer with a custom timeout.
    #[must_use]
    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self {
            search: String::new(),
            last_input_ms: None,
            timeout_ms,
        }
    }

    /// The current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns `true` if a search is in progress at `now_ms`.
    #[must_use]
    pub fn is_active(&self, now_ms: u64) -> bool {
        !self.search.is_empty() && !self.expired(now_ms)
    }

    /// Clears the buffer.
    pub fn reset(&mut self) {
        if !self.search.is_empty() {
            log::debug!("typeahead reset");
        }
        self.search.clear();
        self.last_input_ms = None;
    }

    fn expired(&self, now_ms: u64) -> bool {
        self.last_input_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.timeout_ms)
    }

    /// Feeds one typed character.
    ///
    /// Control characters are ignored. A space that would start a new search
    /// is ignored too, so it can toggle selection instead. While a search is
    /// running, a key that still matches the longer text keeps focus. A
    /// character that matches nothing restarts the search from that character
    /// alone before giving up.
    pub fn input<K, D>(
        &mut self,
        ch: char,
        focused: Option<&K>,
        delegate: &D,
        now_ms: u64,
    ) -> TypeSelectOutcome<K>
    where
        K: Clone,
        D: KeyboardDelegate<K> + ?Sized,
    {
        if ch.is_control() {
            return TypeSelectOutcome::Ignored;
        }
        if self.expired(now_ms) {
            self.reset();
        }
        if ch == ' ' && self.search.trim().is_empty() {
            return TypeSelectOutcome::Ignored;
        }

        let continuing = !self.search.is_empty();
        self.search.push(ch);
        self.last_input_ms = Some(now_ms);

        if continuing
            && let Some(current) = focused
            && delegate.key_matches_search(current, &self.search)
        {
            return TypeSelectOutcome::Focus(current.clone());
        }
        if let Some(key) = delegate.key_for_search(&self.search, focused) {
            return TypeSelectOutcome::Focus(key);
        }

        if continuing {
            self.search.clear();
            self.search.push(ch);
            if let Some(key) = delegate.key_for_search(&self.search, focused) {
                log::debug!("typeahead restarted");
                return TypeSelectOutcome::Focus(key);
            }
        }
        self.reset();
        TypeSelectOutcome::NoMatch
    }
}
