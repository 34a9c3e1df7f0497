// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item sources and collection construction.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::collection::Collection;
use crate::node::{Node, NodeKind};

/// Error returned when an item source cannot be turned into a [`Collection`].
#[derive(Clone, PartialEq, Eq)]
pub enum CollectionError<K> {
    /// Two nodes in the source share the same key.
    DuplicateKey(K),
}

impl<K: fmt::Debug> fmt::Debug for CollectionError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "CollectionError::DuplicateKey({key:?})"),
        }
    }
}

impl<K: fmt::Debug> fmt::Display for CollectionError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "key {key:?} appears more than once"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for CollectionError<K> {}

/// Declarative description of one node and its children.
///
/// This is the "item source" side of a collection: static children or any
/// iterator of specs can be fed to a [`CollectionBuilder`].
#[derive(Clone, Debug)]
pub struct ItemSpec<K, T> {
    pub(crate) key: K,
    pub(crate) kind: NodeKind,
    pub(crate) text_value: String,
    pub(crate) value: Option<T>,
    pub(crate) disabled: bool,
    pub(crate) href: Option<String>,
    pub(crate) children: Vec<Self>,
}

impl<K, T> ItemSpec<K, T> {
    /// Describes an item with a typeahead text and a payload.
    pub fn item(key: K, text_value: impl Into<String>, value: T) -> Self {
        Self {
            key,
            kind: NodeKind::Item,
            text_value: text_value.into(),
            value: Some(value),
            disabled: false,
            href: None,
            children: Vec::new(),
        }
    }

    /// Describes a section. Its title is used as the text value.
    pub fn section(key: K, title: impl Into<String>) -> Self {
        Self {
            key,
            kind: NodeKind::Section,
            text_value: title.into(),
            value: None,
            disabled: false,
            href: None,
            children: Vec::new(),
        }
    }

    /// Appends a child node (section member, submenu entry, or tree child).
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child nodes.
    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        self.children.extend(children);
        self
    }

    /// Marks the node as disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Turns the item into a link item.
    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Returns the key of this spec.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Collects item specs and assembles an immutable [`Collection`].
///
/// ```rust
/// use understory_collection::{CollectionBuilder, ItemSpec};
///
/// let collection = CollectionBuilder::new()
///     .push(ItemSpec::item("apple", "Apple", ()))
///     .push(
///         ItemSpec::section("more", "More fruit")
///             .with_child(ItemSpec::item("banana", "Banana", ()))
///             .with_child(ItemSpec::item("cherry", "Cherry", ())),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(collection.len(), 4);
/// assert_eq!(collection.item_count(), 3);
/// assert_eq!(collection.key_after(&"apple"), Some(&"more"));
/// assert_eq!(collection.key_after(&"more"), Some(&"banana"));
/// ```
#[derive(Clone, Debug)]
pub struct CollectionBuilder<K, T> {
    specs: Vec<ItemSpec<K, T>>,
}

impl<K, T> Default for CollectionBuilder<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> CollectionBuilder<K, T> {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Adds a top-level node.
    #[must_use]
    pub fn push(mut self, spec: ItemSpec<K, T>) -> Self {
        self.specs.push(spec);
        self
    }

    /// Adds several top-level nodes, for dynamic item sources.
    #[must_use]
    pub fn extend<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = ItemSpec<K, T>>,
    {
        self.specs.extend(specs);
        self
    }
}

impl<K, T> CollectionBuilder<K, T>
where
    K: Clone + Eq + Hash,
{
    /// Flattens the specs into a collection.
    ///
    /// Fails if any key appears more than once.
    pub fn build(self) -> Result<Collection<K, T>, CollectionError<K>> {
        let mut assembler = Assembler::default();
        let mut prev_root: Option<usize> = None;
        for spec in self.specs {
            let idx = assembler.push(spec, None, 0)?;
            assembler.link_siblings(prev_root, idx);
            prev_root = Some(idx);
        }
        log::trace!(
            "assembled collection with {} nodes ({} items)",
            assembler.nodes.len(),
            assembler.item_count
        );
        Ok(Collection::from_parts(
            assembler.nodes,
            assembler.index,
            assembler.item_count,
        ))
    }
}

struct Assembler<K, T> {
    nodes: Vec<Node<K, T>>,
    index: HashMap<K, usize>,
    item_count: usize,
}

impl<K, T> Default for Assembler<K, T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            item_count: 0,
        }
    }
}

impl<K, T> Assembler<K, T>
where
    K: Clone + Eq + Hash,
{
    /// Pushes `spec` and its subtree in pre-order, returning the node index.
    fn push(
        &mut self,
        spec: ItemSpec<K, T>,
        parent: Option<usize>,
        level: usize,
    ) -> Result<usize, CollectionError<K>> {
        if self.index.contains_key(&spec.key) {
            return Err(CollectionError::DuplicateKey(spec.key));
        }

        let idx = self.nodes.len();
        let parent_key = parent.map(|p| self.nodes[p].key.clone());
        if spec.kind == NodeKind::Item {
            self.item_count += 1;
        }
        self.index.insert(spec.key.clone(), idx);
        self.nodes.push(Node {
            key: spec.key,
            kind: spec.kind,
            index: idx,
            level,
            parent_key,
            prev_key: None,
            next_key: None,
            first_child_key: None,
            last_child_key: None,
            text_value: spec.text_value,
            value: spec.value,
            disabled: spec.disabled,
            href: spec.href,
        });

        let mut prev_child: Option<usize> = None;
        for child in spec.children {
            let child_idx = self.push(child, Some(idx), level + 1)?;
            match prev_child {
                Some(_) => self.link_siblings(prev_child, child_idx),
                None => self.nodes[idx].first_child_key = Some(self.nodes[child_idx].key.clone()),
            }
            self.nodes[idx].last_child_key = Some(self.nodes[child_idx].key.clone());
            prev_child = Some(child_idx);
        }

        Ok(idx)
    }

    fn link_siblings(&mut self, prev: Option<usize>, next: usize) {
        if let Some(prev) = prev {
            let next_key = self.nodes[next].key.clone();
            let prev_key = self.nodes[prev].key.clone();
            self.nodes[prev].next_key = Some(next_key);
            self.nodes[next].prev_key = Some(prev_key);
        }
    }
}
