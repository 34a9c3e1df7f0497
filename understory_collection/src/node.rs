// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collection nodes and their kind tags.

use alloc::string::String;

/// The kind of a collection node.
///
/// Consumers switch on the tag instead of inspecting node contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A selectable, focusable entry.
    Item,
    /// A grouping node whose children are items (or nested sections).
    Section,
}

/// One entry of a [`Collection`](crate::Collection).
///
/// Nodes are created by [`CollectionBuilder`](crate::CollectionBuilder) and are
/// read-only afterwards. Sibling links (`prev_key`/`next_key`) only connect nodes
/// that share a parent; document-order traversal across sections is provided by
/// [`Collection::key_after`](crate::Collection::key_after) and
/// [`Collection::key_before`](crate::Collection::key_before).
#[derive(Clone, Debug)]
pub struct Node<K, T> {
    pub(crate) key: K,
    pub(crate) kind: NodeKind,
    pub(crate) index: usize,
    pub(crate) level: usize,
    pub(crate) parent_key: Option<K>,
    pub(crate) prev_key: Option<K>,
    pub(crate) next_key: Option<K>,
    pub(crate) first_child_key: Option<K>,
    pub(crate) last_child_key: Option<K>,
    pub(crate) text_value: String,
    pub(crate) value: Option<T>,
    pub(crate) disabled: bool,
    pub(crate) href: Option<String>,
}

impl<K, T> Node<K, T> {
    /// Returns the node's key.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the node's kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns `true` if this node is an item.
    #[must_use]
    pub fn is_item(&self) -> bool {
        self.kind == NodeKind::Item
    }

    /// Returns `true` if this node is a section.
    #[must_use]
    pub fn is_section(&self) -> bool {
        self.kind == NodeKind::Section
    }

    /// Position of the node in document order (sections included).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Nesting depth; top-level nodes have level `0`.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Key of the parent node, if any.
    #[must_use]
    pub fn parent_key(&self) -> Option<&K> {
        self.parent_key.as_ref()
    }

    /// Key of the previous sibling, if any.
    #[must_use]
    pub fn prev_key(&self) -> Option<&K> {
        self.prev_key.as_ref()
    }

    /// Key of the next sibling, if any.
    #[must_use]
    pub fn next_key(&self) -> Option<&K> {
        self.next_key.as_ref()
    }

    /// Key of the first child, if any.
    #[must_use]
    pub fn first_child_key(&self) -> Option<&K> {
        self.first_child_key.as_ref()
    }

    /// Key of the last child, if any.
    #[must_use]
    pub fn last_child_key(&self) -> Option<&K> {
        self.last_child_key.as_ref()
    }

    /// Returns `true` if the node has at least one child.
    #[must_use]
    pub fn has_child_nodes(&self) -> bool {
        self.first_child_key.is_some()
    }

    /// Plain-text representation used for typeahead.
    #[must_use]
    pub fn text_value(&self) -> &str {
        &self.text_value
    }

    /// The payload carried by the node. Sections usually carry none.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether the node itself was declared disabled.
    ///
    /// Selection managers combine this with their own disabled key set.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Link target for link items.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Returns `true` if this node is a link item.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.href.is_some()
    }
}
