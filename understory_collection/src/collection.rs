// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable keyed collection.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::builder::{CollectionBuilder, CollectionError, ItemSpec};
use crate::node::{Node, NodeKind};

/// An ordered, read-only view over keyed nodes with hierarchy links.
///
/// Nodes are stored in document (pre-order) order: a section is followed by its
/// children, then by its next sibling. A collection is never mutated after
/// construction; operations such as [`Collection::filter`] return a new
/// instance. Share it behind an `Arc` so that owners can detect a swap by
/// pointer equality.
///
/// Lookups of unknown keys return `None`; the collection is a read view, not a
/// validator.
#[derive(Clone, Debug)]
pub struct Collection<K, T> {
    nodes: Vec<Node<K, T>>,
    index: HashMap<K, usize>,
    item_count: usize,
}

impl<K, T> Default for Collection<K, T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            item_count: 0,
        }
    }
}

impl<K, T> Collection<K, T> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        nodes: Vec<Node<K, T>>,
        index: HashMap<K, usize>,
        item_count: usize,
    ) -> Self {
        Self {
            nodes,
            index,
            item_count,
        }
    }

    /// Number of nodes, sections included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the collection has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of [`NodeKind::Item`] nodes.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Returns the node at `index` in document order.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Node<K, T>> {
        self.nodes.get(index)
    }

    /// Iterates over all nodes in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, Node<K, T>> {
        self.nodes.iter()
    }

    /// Iterates over all keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.nodes.iter().map(|node| &node.key)
    }

    /// Iterates over the top-level nodes.
    pub fn root_nodes(&self) -> Siblings<'_, K, T> {
        Siblings {
            nodes: &self.nodes,
            next: if self.nodes.is_empty() { None } else { Some(0) },
            index: &self.index,
        }
    }

    /// Key of the first node in document order.
    #[must_use]
    pub fn first_key(&self) -> Option<&K> {
        self.nodes.first().map(|node| &node.key)
    }

    /// Key of the last node in document order.
    #[must_use]
    pub fn last_key(&self) -> Option<&K> {
        self.nodes.last().map(|node| &node.key)
    }
}

impl<K, T> Collection<K, T>
where
    K: Clone + Eq + Hash,
{
    /// Builds a collection from top-level item specs.
    pub fn from_items<I>(items: I) -> Result<Self, CollectionError<K>>
    where
        I: IntoIterator<Item = ItemSpec<K, T>>,
    {
        CollectionBuilder::new().extend(items).build()
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns the node for `key`, if present.
    #[must_use]
    pub fn get_item(&self, key: &K) -> Option<&Node<K, T>> {
        self.index_of(key).map(|idx| &self.nodes[idx])
    }

    /// Returns `true` if `key` is part of this collection.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Key of the node following `key` in document order.
    ///
    /// Entering a section yields the section's first child; leaving the last
    /// child of a section yields the section's next sibling (or an ancestor's).
    #[must_use]
    pub fn key_after(&self, key: &K) -> Option<&K> {
        let idx = self.index_of(key)?;
        self.nodes.get(idx + 1).map(|node| &node.key)
    }

    /// Key of the node preceding `key` in document order.
    #[must_use]
    pub fn key_before(&self, key: &K) -> Option<&K> {
        let idx = self.index_of(key)?;
        idx.checked_sub(1).map(|prev| &self.nodes[prev].key)
    }

    /// First key of the scope containing `from`.
    ///
    /// With `global` set (or no `from`), this is [`Collection::first_key`].
    /// Otherwise it is the first child of the nearest section enclosing `from`,
    /// or the collection's first key when `from` is not inside a section.
    #[must_use]
    pub fn first_key_from(&self, from: Option<&K>, global: bool) -> Option<&K> {
        match from.and_then(|key| self.enclosing_section(key)) {
            Some(section) if !global => section.first_child_key.as_ref(),
            _ => self.first_key(),
        }
    }

    /// Last key of the scope containing `from`.
    ///
    /// With `global` set (or no `from`), this is [`Collection::last_key`].
    /// Otherwise it is the last descendant of the nearest section enclosing
    /// `from`, or the collection's last key when `from` is not inside a section.
    #[must_use]
    pub fn last_key_from(&self, from: Option<&K>, global: bool) -> Option<&K> {
        match from.and_then(|key| self.enclosing_section(key)) {
            Some(section) if !global => self.last_descendant(section).map(|node| &node.key),
            _ => self.last_key(),
        }
    }

    /// Returns the parent node of `key`, if any.
    #[must_use]
    pub fn parent(&self, key: &K) -> Option<&Node<K, T>> {
        let node = self.get_item(key)?;
        self.get_item(node.parent_key.as_ref()?)
    }

    /// Returns the ancestors of `key`, outermost first.
    ///
    /// The node for `key` itself is not included.
    #[must_use]
    pub fn ancestors(&self, key: &K) -> SmallVec<[&Node<K, T>; 4]> {
        let mut out: SmallVec<[&Node<K, T>; 4]> = SmallVec::new();
        let mut current = self.parent(key);
        while let Some(node) = current {
            out.push(node);
            current = node.parent_key.as_ref().and_then(|k| self.get_item(k));
        }
        out.reverse();
        out
    }

    /// Iterates over the direct children of `key`.
    ///
    /// Each call returns a fresh iterator; unknown keys yield nothing.
    pub fn children(&self, key: &K) -> Siblings<'_, K, T> {
        let next = self
            .get_item(key)
            .and_then(|node| node.first_child_key.as_ref())
            .and_then(|child| self.index_of(child));
        Siblings {
            nodes: &self.nodes,
            next,
            index: &self.index,
        }
    }

    fn enclosing_section(&self, key: &K) -> Option<&Node<K, T>> {
        let mut current = self.parent(key);
        while let Some(node) = current {
            if node.kind == NodeKind::Section {
                return Some(node);
            }
            current = node.parent_key.as_ref().and_then(|k| self.get_item(k));
        }
        None
    }

    fn last_descendant<'a>(&'a self, node: &'a Node<K, T>) -> Option<&'a Node<K, T>> {
        let mut current = self.get_item(node.last_child_key.as_ref()?)?;
        while let Some(child) = current.last_child_key.as_ref() {
            current = self.get_item(child)?;
        }
        Some(current)
    }
}

impl<K, T> Collection<K, T>
where
    K: Clone + Eq + Hash,
    T: Clone,
{
    /// Returns a new collection containing only the items matching `predicate`.
    ///
    /// Relative order is preserved. Sections (and parent items) are kept when
    /// at least one of their descendants is kept; the predicate is only asked
    /// about items. `self` is left untouched.
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Node<K, T>) -> bool,
    {
        let roots: Vec<usize> = self.root_indices().collect();
        let specs = roots
            .into_iter()
            .filter_map(|idx| self.subtree_spec(idx, &mut predicate, true));
        // Keys come from an existing collection and are already unique.
        let filtered = CollectionBuilder::new()
            .extend(specs)
            .build()
            .unwrap_or_default();
        log::debug!(
            "filtered collection: {} of {} items kept",
            filtered.item_count,
            self.item_count
        );
        filtered
    }

    /// Returns a new collection with `more` appended after the existing nodes.
    ///
    /// This is how a paged loader grows a list without mutating the collection
    /// that is currently published.
    pub fn appended<I>(&self, more: I) -> Result<Self, CollectionError<K>>
    where
        I: IntoIterator<Item = ItemSpec<K, T>>,
    {
        let roots: Vec<usize> = self.root_indices().collect();
        let existing = roots
            .into_iter()
            .filter_map(|idx| self.subtree_spec(idx, &mut |_: &Node<K, T>| true, false));
        CollectionBuilder::new().extend(existing).extend(more).build()
    }

    fn root_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent_key.is_none())
            .map(|(idx, _)| idx)
    }

    fn subtree_spec(
        &self,
        idx: usize,
        keep: &mut dyn FnMut(&Node<K, T>) -> bool,
        prune_empty: bool,
    ) -> Option<ItemSpec<K, T>> {
        let node = &self.nodes[idx];
        let children: Vec<ItemSpec<K, T>> = self
            .children(&node.key)
            .filter_map(|child| {
                let child_idx = child.index;
                self.subtree_spec(child_idx, keep, prune_empty)
            })
            .collect();

        let retained = match node.kind {
            NodeKind::Item => keep(node) || !children.is_empty(),
            NodeKind::Section => !prune_empty || !children.is_empty(),
        };
        if !retained {
            return None;
        }

        Some(ItemSpec {
            key: node.key.clone(),
            kind: node.kind,
            text_value: node.text_value.clone(),
            value: node.value.clone(),
            disabled: node.disabled,
            href: node.href.clone(),
            children,
        })
    }
}

/// Iterator over a run of sibling nodes.
///
/// Returned by [`Collection::children`] and [`Collection::root_nodes`].
#[derive(Clone, Debug)]
pub struct Siblings<'a, K, T> {
    nodes: &'a [Node<K, T>],
    index: &'a HashMap<K, usize>,
    next: Option<usize>,
}

impl<'a, K, T> Iterator for Siblings<'a, K, T>
where
    K: Eq + Hash,
{
    type Item = &'a Node<K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.next?];
        self.next = node
            .next_key
            .as_ref()
            .and_then(|key| self.index.get(key).copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sectioned() -> Collection<u32, &'static str> {
        CollectionBuilder::new()
            .push(ItemSpec::item(1, "One", "one"))
            .push(
                ItemSpec::section(10, "Tens")
                    .with_child(ItemSpec::item(11, "Eleven", "eleven"))
                    .with_child(ItemSpec::item(12, "Twelve", "twelve")),
            )
            .push(ItemSpec::item(2, "Two", "two"))
            .build()
            .unwrap()
    }

    #[test]
    fn document_order_enters_and_leaves_sections() {
        let c = sectioned();
        let order: Vec<u32> = c.keys().copied().collect();
        assert_eq!(order, vec![1, 10, 11, 12, 2]);
        assert_eq!(c.key_after(&12), Some(&2));
        assert_eq!(c.key_before(&2), Some(&12));
        assert_eq!(c.key_before(&1), None);
        assert_eq!(c.key_after(&2), None);
    }

    #[test]
    fn sibling_links_stay_within_parent() {
        let c = sectioned();
        let eleven = c.get_item(&11).unwrap();
        assert_eq!(eleven.prev_key(), None);
        assert_eq!(eleven.next_key(), Some(&12));
        assert_eq!(eleven.parent_key(), Some(&10));
        assert_eq!(eleven.level(), 1);

        let section = c.get_item(&10).unwrap();
        assert_eq!(section.prev_key(), Some(&1));
        assert_eq!(section.next_key(), Some(&2));
        assert_eq!(section.first_child_key(), Some(&11));
        assert_eq!(section.last_child_key(), Some(&12));
    }

    #[test]
    fn scoped_first_and_last_keys() {
        let c = sectioned();
        assert_eq!(c.first_key_from(Some(&12), false), Some(&11));
        assert_eq!(c.last_key_from(Some(&11), false), Some(&12));
        assert_eq!(c.first_key_from(Some(&12), true), Some(&1));
        assert_eq!(c.last_key_from(Some(&11), true), Some(&2));
        assert_eq!(c.first_key_from(Some(&2), false), Some(&1));
        assert_eq!(c.last_key_from(None, false), Some(&2));
    }

    #[test]
    fn ancestors_are_outermost_first() {
        let c: Collection<u32, ()> = CollectionBuilder::new()
            .push(ItemSpec::section(1, "a").with_child(
                ItemSpec::item(2, "b", ()).with_child(ItemSpec::item(3, "c", ())),
            ))
            .build()
            .unwrap();
        let keys: Vec<u32> = c.ancestors(&3).iter().map(|n| *n.key()).collect();
        assert_eq!(keys, vec![1, 2]);
        assert!(c.ancestors(&1).is_empty());
        assert!(c.ancestors(&99).is_empty());
    }

    #[test]
    fn appended_keeps_existing_nodes_and_empty_sections() {
        let c: Collection<u32, ()> = CollectionBuilder::new()
            .push(ItemSpec::item(1, "a", ()))
            .push(ItemSpec::section(2, "empty"))
            .build()
            .unwrap();
        let more = c.appended([ItemSpec::item(3, "c", ())]).unwrap();
        assert_eq!(more.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(c.appended([ItemSpec::item(1, "dup", ())]).is_err());
        // The original is untouched.
        assert_eq!(c.len(), 2);
    }
}
