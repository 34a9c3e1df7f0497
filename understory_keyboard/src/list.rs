// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard navigation over a [`Collection`].

use core::fmt;
use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::Rect;
use understory_collection::{Collection, Node};
use understory_selection::{DisabledBehavior, SelectionManager};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collator::{CaseInsensitive, Collator};
use crate::delegate::KeyboardDelegate;
use crate::layout::{LayoutDelegate, LayoutDirection, ListLayout, Orientation};

static CASE_INSENSITIVE: CaseInsensitive = CaseInsensitive;

/// Layout and paging options for [`ListKeyboardDelegate`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// Axis along which items flow.
    pub orientation: Orientation,
    /// Stack or grid.
    pub layout: ListLayout,
    /// Inline direction.
    pub direction: LayoutDirection,
    /// Keys per page when no [`LayoutDelegate`] is available.
    pub page_size: usize,
    /// Arrow moves past either end wrap around.
    pub should_focus_wrap: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            layout: ListLayout::Stack,
            direction: LayoutDirection::Ltr,
            page_size: 10,
            should_focus_wrap: false,
        }
    }
}

impl KeyboardConfig {
    /// Sets the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: ListLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the inline direction.
    #[must_use]
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the fallback page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets whether arrow navigation wraps.
    #[must_use]
    pub fn with_focus_wrap(mut self, wrap: bool) -> Self {
        self.should_focus_wrap = wrap;
        self
    }
}

/// The standard [`KeyboardDelegate`] for lists, grids, and menus.
///
/// Navigation walks the collection in document order, skipping sections and,
/// under [`DisabledBehavior::All`], disabled keys. Grid layouts and paging use
/// the optional [`LayoutDelegate`]; without one, grid moves follow document
/// order and paging advances [`KeyboardConfig::page_size`] keys.
///
/// The delegate borrows everything it reads and is cheap to build per event.
pub struct ListKeyboardDelegate<'a, K, T> {
    collection: &'a Collection<K, T>,
    disabled_keys: Option<&'a HashSet<K>>,
    disabled_behavior: DisabledBehavior,
    config: KeyboardConfig,
    layout: Option<&'a dyn LayoutDelegate<K>>,
    collator: &'a dyn Collator,
}

impl<K, T> fmt::Debug for ListKeyboardDelegate<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListKeyboardDelegate")
            .field("len", &self.collection.len())
            .field("disabled_behavior", &self.disabled_behavior)
            .field("config", &self.config)
            .field("has_layout", &self.layout.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a, K, T> ListKeyboardDelegate<'a, K, T>
where
    K: Clone + Eq + Hash,
{
    /// Creates a delegate over `collection`.
    #[must_use]
    pub fn new(collection: &'a Collection<K, T>, config: KeyboardConfig) -> Self {
        Self {
            collection,
            disabled_keys: None,
            disabled_behavior: DisabledBehavior::All,
            config,
            layout: None,
            collator: &CASE_INSENSITIVE,
        }
    }

    /// Creates a delegate that reads the collection and disabled keys of `manager`.
    #[must_use]
    pub fn for_manager(manager: &'a SelectionManager<K, T>, config: KeyboardConfig) -> Self {
        Self::new(manager.collection(), config)
            .with_disabled_keys(manager.disabled_keys(), manager.disabled_behavior())
    }

    /// Sets the keys to skip and when to skip them.
    #[must_use]
    pub fn with_disabled_keys(
        mut self,
        keys: &'a HashSet<K>,
        behavior: DisabledBehavior,
    ) -> Self {
        self.disabled_keys = Some(keys);
        self.disabled_behavior = behavior;
        self
    }

    /// Sets the layout delegate used for grids and paging.
    #[must_use]
    pub fn with_layout_delegate(mut self, layout: &'a dyn LayoutDelegate<K>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the collator used by [`KeyboardDelegate::key_for_search`].
    #[must_use]
    pub fn with_collator(mut self, collator: &'a dyn Collator) -> Self {
        self.collator = collator;
        self
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Returns `true` if `node` is skipped as disabled.
    fn is_disabled(&self, node: &Node<K, T>) -> bool {
        self.disabled_behavior == DisabledBehavior::All
            && (node.is_disabled()
                || self
                    .disabled_keys
                    .is_some_and(|keys| keys.contains(node.key())))
    }

    fn is_focusable(&self, node: &Node<K, T>) -> bool {
        node.is_item() && !self.is_disabled(node)
    }

    fn next_focusable(&self, key: &K) -> Option<K> {
        let mut cursor = self.collection.key_after(key);
        while let Some(k) = cursor {
            if let Some(node) = self.collection.get_item(k)
                && self.is_focusable(node)
            {
                return Some(k.clone());
            }
            cursor = self.collection.key_after(k);
        }
        None
    }

    fn previous_focusable(&self, key: &K) -> Option<K> {
        let mut cursor = self.collection.key_before(key);
        while let Some(k) = cursor {
            if let Some(node) = self.collection.get_item(k)
                && self.is_focusable(node)
            {
                return Some(k.clone());
            }
            cursor = self.collection.key_before(k);
        }
        None
    }

    /// Walks in one direction until `stop` accepts a candidate's rect.
    ///
    /// Without a layout delegate this is a single step in document order.
    fn find_in_layout(
        &self,
        key: &K,
        forward: bool,
        stop: fn(&Rect, &Rect) -> bool,
    ) -> Option<K> {
        let step = |k: &K| {
            if forward {
                self.next_focusable(k)
            } else {
                self.previous_focusable(k)
            }
        };
        let Some(layout) = self.layout else {
            return step(key);
        };
        let origin = layout.item_rect(key)?;
        let mut cursor = step(key);
        while let Some(candidate) = cursor {
            match layout.item_rect(&candidate) {
                Some(rect) if stop(&origin, &rect) => return Some(candidate),
                // Unmeasured items end the walk, as nothing past them is known.
                None => return Some(candidate),
                Some(_) => cursor = step(&candidate),
            }
        }
        None
    }

    /// Vertical move without wrapping.
    fn step_vertical(&self, key: &K, forward: bool) -> Option<K> {
        if !self.collection.contains_key(key) {
            return None;
        }
        match (self.config.layout, self.config.orientation) {
            (ListLayout::Grid, Orientation::Vertical) => {
                self.find_in_layout(key, forward, same_column_other_row)
            }
            _ if forward => self.next_focusable(key),
            _ => self.previous_focusable(key),
        }
    }

    /// Horizontal move without wrapping; `None` when the layout has no such axis.
    fn step_horizontal(&self, key: &K, right: bool) -> Option<Option<K>> {
        if !self.collection.contains_key(key) {
            return Some(None);
        }
        let forward = right == (self.config.direction == LayoutDirection::Ltr);
        match (self.config.layout, self.config.orientation) {
            (ListLayout::Stack, Orientation::Vertical) => None,
            (ListLayout::Grid, Orientation::Horizontal) => {
                Some(self.find_in_layout(key, forward, same_row_other_column))
            }
            _ if forward => Some(self.next_focusable(key)),
            _ => Some(self.previous_focusable(key)),
        }
    }

    fn wrap(&self, forward: bool) -> Option<K> {
        if !self.config.should_focus_wrap {
            return None;
        }
        log::trace!("focus wrapped");
        if forward {
            self.first_key()
        } else {
            self.last_key()
        }
    }

    fn page(&self, key: &K, forward: bool) -> Option<K> {
        if !self.collection.contains_key(key) {
            return None;
        }
        // An unmeasured source key pages by the configured size.
        let measured = self
            .layout
            .and_then(|layout| layout.item_rect(key).map(|item| (layout, item)));
        let rows = match measured {
            Some((layout, item)) => {
                let visible = layout.visible_rect();
                let content = layout.content_size();
                let (item_extent, visible_extent, content_extent) = match self.config.orientation
                {
                    Orientation::Vertical => (item.height(), visible.height(), content.height),
                    Orientation::Horizontal => (item.width(), visible.width(), content.width),
                };
                if content_extent <= visible_extent {
                    return if forward {
                        self.last_key()
                    } else {
                        self.first_key()
                    };
                }
                rows_per_page(visible_extent, item_extent)
            }
            None => self.config.page_size.max(1),
        };

        let mut target = key.clone();
        for _ in 0..rows {
            match self.step_vertical(&target, forward) {
                Some(next) => target = next,
                None => break,
            }
        }
        log::trace!("paged {rows} rows");
        Some(target)
    }
}

fn rows_per_page(visible: f64, item: f64) -> usize {
    if item > 0.0 && visible >= item {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "row counts saturate and are clamped below"
        )]
        let rows = (visible / item) as usize;
        rows.max(1)
    } else {
        1
    }
}

fn same_column_other_row(origin: &Rect, candidate: &Rect) -> bool {
    candidate.x0 == origin.x0 && candidate.y0 != origin.y0
}

fn same_row_other_column(origin: &Rect, candidate: &Rect) -> bool {
    candidate.y0 == origin.y0 && candidate.x0 != origin.x0
}

impl<K, T> KeyboardDelegate<K> for ListKeyboardDelegate<'_, K, T>
where
    K: Clone + Eq + Hash,
{
    fn key_below(&self, key: &K) -> Option<K> {
        if !self.collection.contains_key(key) {
            return None;
        }
        self.step_vertical(key, true).or_else(|| self.wrap(true))
    }

    fn key_above(&self, key: &K) -> Option<K> {
        if !self.collection.contains_key(key) {
            return None;
        }
        self.step_vertical(key, false).or_else(|| self.wrap(false))
    }

    fn key_left_of(&self, key: &K) -> Option<K> {
        let forward = self.config.direction == LayoutDirection::Rtl;
        match self.step_horizontal(key, false)? {
            Some(k) => Some(k),
            None if self.collection.contains_key(key) => self.wrap(forward),
            None => None,
        }
    }

    fn key_right_of(&self, key: &K) -> Option<K> {
        let forward = self.config.direction == LayoutDirection::Ltr;
        match self.step_horizontal(key, true)? {
            Some(k) => Some(k),
            None if self.collection.contains_key(key) => self.wrap(forward),
            None => None,
        }
    }

    fn key_page_below(&self, key: &K) -> Option<K> {
        self.page(key, true)
    }

    fn key_page_above(&self, key: &K) -> Option<K> {
        self.page(key, false)
    }

    fn first_key(&self) -> Option<K> {
        self.collection
            .iter()
            .find(|node| self.is_focusable(node))
            .map(|node| node.key().clone())
    }

    fn last_key(&self) -> Option<K> {
        self.collection
            .iter()
            .rev()
            .find(|node| self.is_focusable(node))
            .map(|node| node.key().clone())
    }

    fn key_matches_search(&self, key: &K, search: &str) -> bool {
        !search.is_empty()
            && self.collection.get_item(key).is_some_and(|node| {
                self.is_focusable(node) && self.collator.is_prefix(search, node.text_value())
            })
    }

    /// Scans forward from just after `from`, wrapping once and ending on
    /// `from` itself. Without `from` the scan starts at the top.
    fn key_for_search(&self, search: &str, from: Option<&K>) -> Option<K> {
        if search.is_empty() {
            return None;
        }
        let len = self.collection.len();
        let start = from
            .and_then(|k| self.collection.get_item(k))
            .map_or(0, |node| node.index() + 1);
        (0..len)
            .filter_map(|offset| self.collection.at((start + offset) % len))
            .find(|node| {
                self.is_focusable(node) && self.collator.is_prefix(search, node.text_value())
            })
            .map(|node| node.key().clone())
    }
}
