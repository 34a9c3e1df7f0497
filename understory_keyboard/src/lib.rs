// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_keyboard --heading-base-level=0

//! Understory Keyboard: keyboard navigation for keyed collections.
//!
//! This crate maps navigation intents (arrow keys, paging, Home/End, and
//! typeahead) onto keys of an [`understory_collection::Collection`]. It does
//! not read key events or move focus itself; callers translate their input
//! into a [`Navigation`] or a typed character and apply the resulting key,
//! usually through `understory_selection::SelectionManager::set_focused_key`.
//!
//! The pieces are:
//!
//! - [`KeyboardDelegate`]: the trait every navigation source implements.
//! - [`ListKeyboardDelegate`]: the standard implementation for stacks and
//!   grids, skipping sections and disabled keys.
//! - [`LayoutDelegate`]: item and viewport geometry (as kurbo [`kurbo::Rect`]s)
//!   used for grid moves and paging.
//! - [`Collator`]: string comparison for typeahead; [`CaseInsensitive`] by default.
//! - [`TypeSelect`]: the typeahead buffer with its inactivity timeout.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_collection::{Collection, ItemSpec};
//! use understory_keyboard::{KeyboardConfig, KeyboardDelegate, ListKeyboardDelegate, Navigation};
//!
//! let c = Collection::from_items([
//!     ItemSpec::item("a", "Alpha", ()),
//!     ItemSpec::item("b", "Beta", ()).with_disabled(true),
//!     ItemSpec::item("c", "Gamma", ()),
//! ])
//! .unwrap();
//!
//! let delegate = ListKeyboardDelegate::new(&c, KeyboardConfig::default());
//! assert_eq!(delegate.navigate(&"a", Navigation::Below), Some("c"));
//! assert_eq!(delegate.navigate(&"c", Navigation::Below), None);
//! assert_eq!(delegate.key_for_search("g", None), Some("c"));
//!
//! let wrapping = ListKeyboardDelegate::new(&c, KeyboardConfig::default().with_focus_wrap(true));
//! assert_eq!(wrapping.navigate(&"c", Navigation::Below), Some("a"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collator;
mod delegate;
mod layout;
mod list;
pub mod type_select;

pub use collator::{CaseInsensitive, Collator};
pub use delegate::{KeyboardDelegate, Navigation};
pub use layout::{LayoutDelegate, LayoutDirection, ListLayout, Orientation};
pub use list::{KeyboardConfig, ListKeyboardDelegate};
pub use type_select::{TypeSelect, TypeSelectOutcome};
