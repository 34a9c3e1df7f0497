// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete selected-key sets and the `All` sentinel.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

/// An ordered set of selected keys plus the anchor and current keys.
///
/// `KeySet` only requires equality on `K`. Keys live in a `Vec<K>` with
/// uniqueness enforced by scanning, which keeps it easy to use with any id type.
/// Hashable keys also get bulk operations (the `*_hashed` methods) that stay
/// linear on large sets.
///
/// - The **anchor** is the pivot for range extension (shift-click).
/// - The **current** key is the most recently interacted-with key.
///
/// Neither has to be a member of the set: toggling a key off leaves it as the
/// anchor so a following shift-click extends from there.
///
/// Equality compares set membership only; order, anchor, and current key are
/// ignored.
#[derive(Clone, Debug)]
pub struct KeySet<K> {
    items: Vec<K>,
    anchor: Option<K>,
    current: Option<K>,
}

impl<K> Default for KeySet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> KeySet<K> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            anchor: None,
            current: None,
        }
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the keys in insertion order.
    #[must_use]
    pub fn items(&self) -> &[K] {
        &self.items
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.items.iter()
    }

    /// Returns the anchor key, if any.
    #[must_use]
    pub fn anchor_key(&self) -> Option<&K> {
        self.anchor.as_ref()
    }

    /// Returns the current key, if any.
    #[must_use]
    pub fn current_key(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Sets the anchor key.
    pub fn set_anchor_key(&mut self, key: Option<K>) {
        self.anchor = key;
    }

    /// Sets the current key.
    pub fn set_current_key(&mut self, key: Option<K>) {
        self.current = key;
    }

    /// Keeps only the keys for which `keep` returns `true`.
    ///
    /// The anchor and current keys are cleared when they fail the predicate.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.items.retain(|key| keep(key));
        if self.anchor.as_ref().is_some_and(|key| !keep(key)) {
            self.anchor = None;
        }
        if self.current.as_ref().is_some_and(|key| !keep(key)) {
            self.current = None;
        }
    }
}

impl<K> KeySet<K>
where
    K: PartialEq,
{
    /// Builds a set from `keys`, ignoring duplicates.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut set = Self::new();
        for key in keys {
            set.insert(key);
        }
        set
    }

    /// Creates a set holding `key`, which also becomes anchor and current key.
    pub fn single(key: K) -> Self
    where
        K: Clone,
    {
        Self {
            items: alloc::vec![key.clone()],
            anchor: Some(key.clone()),
            current: Some(key),
        }
    }

    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.position_of(key).is_some()
    }

    /// Adds `key`; returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.items.push(key);
        true
    }

    /// Removes `key`; returns `false` if it was not present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.position_of(key) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if both sets hold the same keys, in any order.
    #[must_use]
    pub fn same_keys(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|key| other.contains(key))
    }

    fn position_of(&self, key: &K) -> Option<usize> {
        self.items.iter().position(|k| k == key)
    }
}

impl<K> KeySet<K>
where
    K: Clone + Eq + Hash,
{
    /// Builds a set from `keys`, ignoring duplicates, using hashing for de-duplication.
    pub fn from_keys_hashed<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut set = Self::new();
        set.extend_hashed(keys);
        set
    }

    /// Adds every key of `keys` that is not already present, in iteration order.
    pub fn extend_hashed<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        let mut seen: HashSet<K> = self.items.iter().cloned().collect();
        for key in keys {
            if seen.insert(key.clone()) {
                self.items.push(key);
            }
        }
    }

    /// Removes every key of `keys` that is present; anchor and current key are kept.
    pub fn remove_all_hashed<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        let gone: HashSet<K> = keys.into_iter().collect();
        if !gone.is_empty() {
            self.items.retain(|key| !gone.contains(key));
        }
    }

    /// Same result as [`KeySet::same_keys`], in linear time.
    #[must_use]
    pub fn same_keys_hashed(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mine: HashSet<&K> = self.items.iter().collect();
        other.items.iter().all(|key| mine.contains(key))
    }
}

impl<K: PartialEq> PartialEq for KeySet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.same_keys(other)
    }
}

impl<K: Eq> Eq for KeySet<K> {}

impl<K: PartialEq> FromIterator<K> for KeySet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl<'a, K> IntoIterator for &'a KeySet<K> {
    type Item = &'a K;
    type IntoIter = core::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The selection value: every selectable key, or a concrete set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<K> {
    /// Every selectable item, including items loaded later.
    All,
    /// An explicit set of keys.
    Keys(KeySet<K>),
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self::Keys(KeySet::new())
    }
}

impl<K> Selection<K> {
    /// An empty selection.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Keys(KeySet::new())
    }

    /// Returns `true` for the `All` sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns `true` for an empty concrete set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::All => false,
            Self::Keys(keys) => keys.is_empty(),
        }
    }

    /// Returns the concrete set, or `None` for `All`.
    #[must_use]
    pub fn keys(&self) -> Option<&KeySet<K>> {
        match self {
            Self::All => None,
            Self::Keys(keys) => Some(keys),
        }
    }
}

impl<K> From<KeySet<K>> for Selection<K> {
    fn from(keys: KeySet<K>) -> Self {
        Self::Keys(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_report_changes() {
        let mut set = KeySet::new();
        assert!(set.insert(1));
        assert!(!set.insert(1));
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert!(set.is_empty());
    }

    #[test]
    fn equality_ignores_order_and_roles() {
        let mut a = KeySet::from_keys([1, 2, 3]);
        let b = KeySet::from_keys([3, 1, 2, 2]);
        a.set_anchor_key(Some(2));
        assert_eq!(a, b);
        assert_ne!(a, KeySet::from_keys([1, 2]));
    }

    #[test]
    fn hashed_bulk_operations_match_scanning_ones() {
        let mut set = KeySet::from_keys_hashed([4, 1, 4, 2, 1]);
        assert_eq!(set.items(), &[4, 1, 2]);
        assert_eq!(set, KeySet::from_keys([4, 1, 2]));

        set.set_anchor_key(Some(1));
        set.extend_hashed([2, 7, 7, 3]);
        assert_eq!(set.items(), &[4, 1, 2, 7, 3]);

        set.remove_all_hashed([1, 3, 9]);
        assert_eq!(set.items(), &[4, 2, 7]);
        assert_eq!(set.anchor_key(), Some(&1));

        assert!(set.same_keys_hashed(&KeySet::from_keys([7, 2, 4])));
        assert!(!set.same_keys_hashed(&KeySet::from_keys([7, 2, 5])));
        assert!(!set.same_keys_hashed(&KeySet::from_keys([7, 2])));
    }

    #[test]
    fn retain_clears_roles_that_fail() {
        let mut set = KeySet::single(5);
        set.insert(6);
        set.retain(|k| *k != 5);
        assert_eq!(set.items(), &[6]);
        assert_eq!(set.anchor_key(), None);
        assert_eq!(set.current_key(), None);
    }
}
