// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection configuration.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How many items may be selected.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// Selection is disabled.
    #[default]
    None,
    /// At most one item.
    Single,
    /// Any number of items.
    Multiple,
}

/// How pointer and keyboard input maps onto selection.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SelectionBehavior {
    /// Checkbox-like: each activation flips one item; arrows move focus only.
    #[default]
    Toggle,
    /// Click selects one item; modifiers add or extend; arrows move selection.
    Replace,
}

/// What disabled keys are excluded from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DisabledBehavior {
    /// Disabled items can be neither selected, focused, nor activated.
    #[default]
    All,
    /// Disabled items cannot be selected but stay focusable and actionable.
    Selection,
}

/// How link items interact with selection.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum LinkBehavior {
    /// Following the link is the item's action, under the same rules as other actions.
    #[default]
    Action,
    /// Selecting the item also follows its link.
    Selection,
    /// Pressing always follows the link; link items cannot be selected.
    Override,
    /// Links are inert and link items cannot be selected by pressing.
    None,
}

/// Which child receives focus when focus enters a node with children.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusStrategy {
    /// Focus the first child.
    First,
    /// Focus the last child.
    Last,
}

/// Configuration of a [`SelectionManager`](crate::SelectionManager).
///
/// ```rust
/// use understory_selection::{SelectionBehavior, SelectionConfig, SelectionMode};
///
/// let config = SelectionConfig::new(SelectionMode::Multiple)
///     .with_behavior(SelectionBehavior::Replace)
///     .with_disabled_keys(["archived"]);
/// assert_eq!(config.mode, SelectionMode::Multiple);
/// assert!(!config.disallow_empty_selection);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionConfig<K> {
    /// Selection mode.
    pub mode: SelectionMode,
    /// Selection behavior.
    pub behavior: SelectionBehavior,
    /// Refuse changes that would leave the selection empty.
    pub disallow_empty_selection: bool,
    /// Keys that cannot be selected (and, under [`DisabledBehavior::All`], not focused).
    pub disabled_keys: Vec<K>,
    /// Scope of `disabled_keys`.
    pub disabled_behavior: DisabledBehavior,
    /// How link items interact with selection.
    pub link_behavior: LinkBehavior,
    /// Notify even when a change leaves the resolved selection unchanged.
    pub allow_duplicate_selection_events: bool,
}

impl<K> Default for SelectionConfig<K> {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            behavior: SelectionBehavior::default(),
            disallow_empty_selection: false,
            disabled_keys: Vec::new(),
            disabled_behavior: DisabledBehavior::default(),
            link_behavior: LinkBehavior::default(),
            allow_duplicate_selection_events: false,
        }
    }
}

impl<K> SelectionConfig<K> {
    /// Creates a default configuration with the given mode.
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Sets the selection behavior.
    #[must_use]
    pub fn with_behavior(mut self, behavior: SelectionBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Sets whether an empty selection is refused.
    #[must_use]
    pub fn with_disallow_empty_selection(mut self, disallow: bool) -> Self {
        self.disallow_empty_selection = disallow;
        self
    }

    /// Sets the disabled keys.
    #[must_use]
    pub fn with_disabled_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        self.disabled_keys = keys.into_iter().collect();
        self
    }

    /// Sets the disabled behavior.
    #[must_use]
    pub fn with_disabled_behavior(mut self, behavior: DisabledBehavior) -> Self {
        self.disabled_behavior = behavior;
        self
    }

    /// Sets the link behavior.
    #[must_use]
    pub fn with_link_behavior(mut self, behavior: LinkBehavior) -> Self {
        self.link_behavior = behavior;
        self
    }

    /// Sets whether unchanged selections are still reported.
    #[must_use]
    pub fn with_duplicate_selection_events(mut self, allow: bool) -> Self {
        self.allow_duplicate_selection_events = allow;
        self
    }
}
