// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item output flags.

/// Everything a renderer needs to draw one item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemState {
    /// The item is selected.
    pub is_selected: bool,
    /// The item holds logical focus and the list is focused.
    pub is_focused: bool,
    /// The item ignores interaction.
    pub is_disabled: bool,
    /// The item is held down.
    pub is_pressed: bool,
    /// Activating the item can run an action or follow a link.
    pub has_action: bool,
    /// The item can become selected.
    pub allows_selection: bool,
    /// Focus arrived by keyboard and should be drawn.
    pub is_focus_visible: bool,
}
