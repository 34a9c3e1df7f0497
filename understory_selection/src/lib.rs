// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: selection and focus state over keyed collections.
//!
//! This crate owns the _bookkeeping_ of a selection for list-like widgets: which
//! keys are selected, which key has logical focus, and how selection gestures
//! (toggle, replace, range extension, select all) change that state. Item order
//! and hierarchy come from an [`understory_collection::Collection`]; layout and
//! input handling live in `understory_keyboard` and `understory_interaction`.
//!
//! The core types are:
//!
//! - [`KeySet`]: an ordered set of keys plus an **anchor** (the pivot for
//!   shift-click ranges) and a **current** key (the last one interacted with).
//! - [`Selection`]: either a concrete [`KeySet`] or the `All` sentinel, which
//!   also covers items loaded later.
//! - [`SelectionConfig`]: mode, behavior, disabled keys, and link handling.
//! - [`SelectionManager`]: the stateful controller. It enforces the mode
//!   (none, single, multiple), refuses empty selections when asked to, skips
//!   disabled keys, and prunes stale keys when the collection is swapped.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use understory_collection::{Collection, ItemSpec};
//! use understory_selection::{SelectionConfig, SelectionManager, SelectionMode};
//!
//! let fruit = Arc::new(
//!     Collection::from_items([
//!         ItemSpec::item("apple", "Apple", ()),
//!         ItemSpec::item("banana", "Banana", ()),
//!         ItemSpec::item("cherry", "Cherry", ()),
//!     ])
//!     .unwrap(),
//! );
//!
//! let mut manager = SelectionManager::new(fruit, SelectionConfig::new(SelectionMode::Multiple));
//!
//! // Click: replace the selection.
//! manager.replace_selection("apple");
//! // Shift-click: extend from the anchor.
//! manager.extend_selection("cherry");
//! assert_eq!(manager.selected_keys().len(), 3);
//!
//! // Ctrl-click: toggle one key.
//! manager.toggle_selection("banana");
//! assert!(!manager.is_selected(&"banana"));
//! assert_eq!(manager.first_selected_key(), Some("apple"));
//! ```
//!
//! ## Controlled selection
//!
//! A manager built with [`SelectionManager::controlled`] never stores changes
//! on its own. Each gesture calls the change handler with the proposed
//! selection, and the owner decides whether to feed it back through
//! [`SelectionManager::set_controlled_selection`]. Queries such as
//! [`SelectionManager::selected_keys`] always resolve the stored value against
//! the current collection, so keys that disappeared are never reported.
//!
//! ## Revisions
//!
//! [`SelectionManager::revision`] increments whenever the stored selection
//! changes. Callers can cache derived data (for example, a selection bounding
//! box) and recompute only when the revision moves.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod key_set;
mod manager;

pub use config::{
    DisabledBehavior, FocusStrategy, LinkBehavior, SelectionBehavior, SelectionConfig,
    SelectionMode,
};
pub use key_set::{KeySet, Selection};
pub use manager::{SelectionChangeHandler, SelectionManager};
