// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_interaction --heading-base-level=0

//! Understory Interaction: input handling for selectable collections.
//!
//! This crate sits between raw input and an
//! [`understory_selection::SelectionManager`]. It decides, for each press,
//! key, or focus change, whether to move focus, change the selection, run an
//! item's action, or follow its link. It does not route events or draw
//! anything; hosts hit-test their items, forward the input here, and read back
//! a [`Response`] plus per-item [`ItemState`] flags.
//!
//! The pieces are:
//!
//! - [`SelectableList`]: the coordinator, configured by [`InteractionConfig`].
//! - [`Modifiers`], [`PointerType`], and [`Key`]: the input vocabulary.
//! - [`press::PressTracker`]: pressed-key tracking, double clicks, and long presses.
//! - [`merge_attributes`] and [`IdContext`]: helpers for building accessibility
//!   attributes without global state.
//!
//! ## Actions versus selection
//!
//! An item has a **primary action** when pressing it runs the action instead
//! of selecting: always when it cannot be selected, and in toggle-behavior
//! lists while nothing is selected (see [`ToggleActionPolicy`]). An item has a
//! **secondary action** in replace-behavior lists: a press selects it, and a
//! mouse double click or Enter runs the action.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use understory_collection::{Collection, ItemSpec};
//! use understory_interaction::{
//!     Activation, InteractionConfig, Key, Modifiers, PointerType, SelectableList,
//! };
//! use understory_selection::{SelectionBehavior, SelectionConfig, SelectionManager, SelectionMode};
//!
//! let files = Arc::new(
//!     Collection::from_items([
//!         ItemSpec::item(1, "notes.txt", ()),
//!         ItemSpec::item(2, "photo.png", ()),
//!         ItemSpec::item(3, "todo.md", ()),
//!     ])
//!     .unwrap(),
//! );
//! let manager = SelectionManager::new(
//!     files,
//!     SelectionConfig::new(SelectionMode::Multiple).with_behavior(SelectionBehavior::Replace),
//! );
//! let mut list = SelectableList::new(manager, InteractionConfig::default().with_action(true));
//!
//! // A click selects.
//! list.click(1, PointerType::Mouse, Modifiers::empty(), 0);
//! assert!(list.manager().is_selected(&1));
//!
//! // Shift+ArrowDown extends the selection.
//! list.key_down(Key::ArrowDown, Modifiers::SHIFT, None, 100);
//! assert_eq!(list.manager().selected_keys().len(), 2);
//!
//! // Enter runs the focused item's action.
//! let response = list.key_down(Key::Enter, Modifiers::empty(), None, 200);
//! assert_eq!(response.activation, Some(Activation::Action(2)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attrs;
mod ids;
mod input;
mod list;
pub mod press;
mod state;

pub use attrs::merge_attributes;
pub use ids::IdContext;
pub use input::{Key, Modifiers, Platform, PointerType};
pub use list::{
    Activation, EscapeKeyBehavior, FocusEntry, InteractionConfig, Response, SelectableList,
    ToggleActionPolicy,
};
pub use state::ItemState;
