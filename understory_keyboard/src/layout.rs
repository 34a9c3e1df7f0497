// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout description consumed by the list keyboard delegate.

use kurbo::{Rect, Size};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry queries for spatial navigation and paging.
///
/// All rectangles share one coordinate space, typically the scrollable
/// content's, in logical pixels.
pub trait LayoutDelegate<K> {
    /// Bounds of the item with `key`, or `None` if it has no layout.
    fn item_rect(&self, key: &K) -> Option<Rect>;

    /// The currently visible region of the content.
    fn visible_rect(&self) -> Rect;

    /// Total size of the content.
    fn content_size(&self) -> Size;
}

/// Primary axis along which items flow.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Items flow top to bottom.
    #[default]
    Vertical,
    /// Items flow along the inline axis.
    Horizontal,
}

/// Whether items form a single line or wrap into a grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ListLayout {
    /// One item per row (or column, when horizontal).
    #[default]
    Stack,
    /// Items wrap into rows and columns.
    Grid,
}

/// Inline direction used to interpret left and right.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}
