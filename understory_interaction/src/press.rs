// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press tracking: which item is pressed, click counting, and long presses.
//!
//! ## Usage
//!
//! 1) Call [`PressTracker::start`] on pointer down over an item.
//! 2) Forward pointer moves to [`PressTracker::moved`]; a press that strays
//!    past the slop distance is cancelled.
//! 3) Poll [`PressTracker::poll_long_press`] while the press is held.
//! 4) Call [`PressTracker::end`] on pointer up to get a [`Click`], if any.
//!
//! ```
//! use kurbo::Point;
//! use understory_interaction::PointerType;
//! use understory_interaction::press::PressTracker;
//!
//! let mut press = PressTracker::new();
//! press.start(7, PointerType::Mouse, Point::new(5.0, 5.0), 0);
//! assert_eq!(press.pressed_key(), Some(&7));
//!
//! let click = press.end(Some(&7), Point::new(6.0, 5.0), 80).unwrap();
//! assert_eq!(click.count, 1);
//!
//! press.start(7, PointerType::Mouse, Point::new(5.0, 5.0), 200);
//! let click = press.end(Some(&7), Point::new(5.0, 5.0), 260).unwrap();
//! assert_eq!(click.count, 2);
//! ```

use kurbo::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::input::PointerType;

/// Timing and distance thresholds for [`PressTracker`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PressConfig {
    /// Maximum gap between two clicks on one key that still counts as a multi-click.
    pub double_click_ms: u64,
    /// How long a touch press must be held to become a long press.
    pub long_press_ms: u64,
    /// How far the pointer may move before the press is cancelled.
    pub slop: f64,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            double_click_ms: 500,
            long_press_ms: 500,
            slop: 8.0,
        }
    }
}

/// A completed press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Click<K> {
    /// The item that was pressed.
    pub key: K,
    /// The device that pressed it.
    pub pointer_type: PointerType,
    /// 1 for a single click, 2 for a double click, and so on.
    pub count: u32,
    /// The press was already reported as a long press.
    pub after_long_press: bool,
}

#[derive(Clone, Debug)]
struct ActivePress<K> {
    key: K,
    pointer_type: PointerType,
    origin: Point,
    started_ms: u64,
    long_pressed: bool,
}

#[derive(Clone, Debug)]
struct LastClick<K> {
    key: K,
    at_ms: u64,
    count: u32,
}

/// Tracks at most one active press and the previous click.
#[derive(Clone, Debug)]
pub struct PressTracker<K> {
    config: PressConfig,
    active: Option<ActivePress<K>>,
    last_click: Option<LastClick<K>>,
}

impl<K> Default for PressTracker<K> {
    fn default() -> Self {
        Self::with_config(PressConfig::default())
    }
}

impl<K> PressTracker<K> {
    /// Creates a tracker with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracker with custom thresholds.
    #[must_use]
    pub fn with_config(config: PressConfig) -> Self {
        Self {
            config,
            active: None,
            last_click: None,
        }
    }

    /// The thresholds in use.
    #[must_use]
    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// The key currently held down, if any.
    #[must_use]
    pub fn pressed_key(&self) -> Option<&K> {
        self.active.as_ref().map(|p| &p.key)
    }

    /// The device of the active press.
    #[must_use]
    pub fn pointer_type(&self) -> Option<PointerType> {
        self.active.as_ref().map(|p| p.pointer_type)
    }

    /// Begins a press on `key`, replacing any active press.
    pub fn start(&mut self, key: K, pointer_type: PointerType, at: Point, now_ms: u64) {
        self.active = Some(ActivePress {
            key,
            pointer_type,
            origin: at,
            started_ms: now_ms,
            long_pressed: false,
        });
    }

    /// Updates the pointer position; returns `true` if this cancelled the press.
    pub fn moved(&mut self, at: Point) -> bool {
        let Some(press) = &self.active else {
            return false;
        };
        let slop = self.config.slop;
        if (at - press.origin).hypot2() > slop * slop {
            log::trace!("press cancelled by movement");
            self.active = None;
            return true;
        }
        false
    }

    /// Abandons the active press without producing a click.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Returns `true` while a press is held.
    #[must_use]
    pub fn is_pressing(&self) -> bool {
        self.active.is_some()
    }
}

impl<K: Clone + PartialEq> PressTracker<K> {
    /// Returns the key of a touch press held past the long press threshold.
    ///
    /// Reports each press at most once.
    pub fn poll_long_press(&mut self, now_ms: u64) -> Option<K> {
        let threshold = self.config.long_press_ms;
        let press = self.active.as_mut()?;
        if press.long_pressed
            || press.pointer_type != PointerType::Touch
            || now_ms.saturating_sub(press.started_ms) < threshold
        {
            return None;
        }
        press.long_pressed = true;
        log::debug!("long press");
        Some(press.key.clone())
    }

    /// Returns `true` if `key` is held down.
    #[must_use]
    pub fn is_pressed(&self, key: &K) -> bool {
        self.pressed_key() == Some(key)
    }

    /// Ends the active press with the pointer over `over`.
    ///
    /// Returns `None` when nothing was pressed or the pointer was released
    /// over a different item, or too far from where the press began.
    pub fn end(&mut self, over: Option<&K>, at: Point, now_ms: u64) -> Option<Click<K>> {
        let press = self.active.take()?;
        let slop = self.config.slop;
        if over != Some(&press.key) || (at - press.origin).hypot2() > slop * slop {
            return None;
        }

        let count = match &self.last_click {
            Some(last)
                if last.key == press.key
                    && now_ms.saturating_sub(last.at_ms) <= self.config.double_click_ms =>
            {
                last.count + 1
            }
            _ => 1,
        };
        self.last_click = Some(LastClick {
            key: press.key.clone(),
            at_ms: now_ms,
            count,
        });
        Some(Click {
            key: press.key,
            pointer_type: press.pointer_type,
            count,
            after_long_press: press.long_pressed,
        })
    }
}
