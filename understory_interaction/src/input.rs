// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary: modifiers, pointer types, and keys.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Modifier keys held during an input event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt or Option.
        const ALT   = 0b0000_0100;
        /// Meta, Command, or the Windows key.
        const META  = 0b0000_1000;
    }
}

/// Host platform, used to pick the "ctrl-like" modifier.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    /// Platforms where Command plays the role of Control.
    Apple,
    /// Everything else.
    #[default]
    Other,
}

impl Modifiers {
    /// Returns `true` if the platform's ctrl-like modifier is held.
    ///
    /// That is Command on Apple platforms and Control elsewhere. It turns a
    /// click into a toggle and enables shortcuts such as select all.
    #[must_use]
    pub fn is_ctrl_like(self, platform: Platform) -> bool {
        match platform {
            Platform::Apple => self.contains(Self::META),
            Platform::Other => self.contains(Self::CTRL),
        }
    }

    /// Returns `true` if Shift is held.
    #[must_use]
    pub fn is_shift(self) -> bool {
        self.contains(Self::SHIFT)
    }
}

/// The kind of device that produced a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse.
    Mouse,
    /// A stylus.
    Pen,
    /// A finger on a touch screen.
    Touch,
    /// A key (Space or Enter) activating the focused item.
    Keyboard,
    /// Assistive technology or a synthetic click.
    Virtual,
}

impl PointerType {
    /// Returns `true` for the mouse, which selects when the press begins.
    ///
    /// Every other device selects when the press ends.
    #[must_use]
    pub fn selects_on_press_start(self) -> bool {
        matches!(self, Self::Mouse)
    }
}

/// A key relevant to collection navigation and selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow down.
    ArrowDown,
    /// Arrow up.
    ArrowUp,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page down.
    PageDown,
    /// Page up.
    PageUp,
    /// Enter.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// A printable character.
    Character(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_like_depends_on_platform() {
        assert!(Modifiers::META.is_ctrl_like(Platform::Apple));
        assert!(!Modifiers::CTRL.is_ctrl_like(Platform::Apple));
        assert!(Modifiers::CTRL.is_ctrl_like(Platform::Other));
        assert!(!Modifiers::META.is_ctrl_like(Platform::Other));
        assert!((Modifiers::SHIFT | Modifiers::CTRL).is_shift());
    }
}
