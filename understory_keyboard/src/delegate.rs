// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The keyboard delegate trait.

/// A navigation intent, independent of the physical key that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Arrow down.
    Below,
    /// Arrow up.
    Above,
    /// Arrow left.
    LeftOf,
    /// Arrow right.
    RightOf,
    /// Page down.
    PageBelow,
    /// Page up.
    PageAbove,
    /// Home.
    First,
    /// End.
    Last,
}

/// Maps navigation intents to target keys.
///
/// Every method returns `None` when there is no valid target: the collection
/// is empty, the source key is unknown, or the move leaves the collection.
/// Only `key_below`, `key_above`, `first_key`, and `last_key` are required;
/// layouts that do not support the other moves can rely on the defaults.
pub trait KeyboardDelegate<K> {
    /// The key below `key`.
    fn key_below(&self, key: &K) -> Option<K>;

    /// The key above `key`.
    fn key_above(&self, key: &K) -> Option<K>;

    /// The key to the left of `key`.
    fn key_left_of(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// The key to the right of `key`.
    fn key_right_of(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// The key one page below `key`.
    fn key_page_below(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// The key one page above `key`.
    fn key_page_above(&self, key: &K) -> Option<K> {
        let _ = key;
        None
    }

    /// The first focusable key.
    fn first_key(&self) -> Option<K>;

    /// The last focusable key.
    fn last_key(&self) -> Option<K>;

    /// The first key whose text starts with `search`, scanning after `from`.
    fn key_for_search(&self, search: &str, from: Option<&K>) -> Option<K> {
        let _ = (search, from);
        None
    }

    /// Returns `true` if `key` is a valid search result for `search`.
    ///
    /// Typeahead uses this to keep focus on the current key while the typed
    /// text still matches it.
    fn key_matches_search(&self, key: &K, search: &str) -> bool {
        let _ = (key, search);
        false
    }

    /// Dispatches `navigation` from `key`.
    ///
    /// [`Navigation::First`] and [`Navigation::Last`] ignore `key`.
    fn navigate(&self, key: &K, navigation: Navigation) -> Option<K> {
        match navigation {
            Navigation::Below => self.key_below(key),
            Navigation::Above => self.key_above(key),
            Navigation::LeftOf => self.key_left_of(key),
            Navigation::RightOf => self.key_right_of(key),
            Navigation::PageBelow => self.key_page_below(key),
            Navigation::PageAbove => self.key_page_above(key),
            Navigation::First => self.first_key(),
            Navigation::Last => self.last_key(),
        }
    }
}
