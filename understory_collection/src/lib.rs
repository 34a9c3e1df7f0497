// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collection --heading-base-level=0

//! Understory Collection: immutable keyed collections for list-like widgets.
//!
//! This crate provides the read-only data side of list boxes, grid lists,
//! menus, selects, tag groups, and trees: an ordered set of keyed nodes with
//! parent, child, and sibling links. It does **not** track selection or focus;
//! see `understory_selection` for that.
//!
//! The core concepts are:
//!
//! - [`Node`]: one entry, tagged with a [`NodeKind`] (`Item` or `Section`),
//!   carrying its key, text value for typeahead, optional payload, depth, and
//!   hierarchy links.
//! - [`Collection`]: the ordered, immutable view. Lookups by key or index are
//!   O(1); unknown keys return `None`.
//! - [`ItemSpec`] and [`CollectionBuilder`]: the item source a collection is
//!   built from (static children or any iterator of specs).
//! - [`load`]: explicit cancellation and result types for producers that
//!   replace the collection asynchronously.
//!
//! A collection is never mutated in place. When the item source or filter
//! changes, build a new collection and swap the `Arc` that owners hold; owners
//! can detect the swap by pointer equality.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_collection::{Collection, ItemSpec, NodeKind};
//!
//! let fruit = Collection::from_items([
//!     ItemSpec::item("apple", "Apple", 1.20),
//!     ItemSpec::item("banana", "Banana", 0.25),
//!     ItemSpec::item("cherry", "Cherry", 4.00),
//! ])
//! .unwrap();
//!
//! assert_eq!(fruit.first_key(), Some(&"apple"));
//! assert_eq!(fruit.key_after(&"apple"), Some(&"banana"));
//! assert_eq!(fruit.get_item(&"cherry").map(|n| n.kind()), Some(NodeKind::Item));
//! assert!(fruit.get_item(&"durian").is_none());
//!
//! // Filtering produces a new collection and leaves the original alone.
//! let short = fruit.filter(|node| node.text_value().len() <= 5);
//! assert_eq!(short.keys().copied().collect::<Vec<_>>(), ["apple"]);
//! assert_eq!(fruit.len(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod collection;
pub mod load;
mod node;

pub use builder::{CollectionBuilder, CollectionError, ItemSpec};
pub use collection::{Collection, Siblings};
pub use node::{Node, NodeKind};
