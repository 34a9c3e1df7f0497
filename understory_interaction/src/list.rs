// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selectable list coordinator.

use alloc::sync::Arc;
use core::hash::Hash;

use kurbo::Point;
use understory_collection::Collection;
use understory_keyboard::{
    KeyboardConfig, KeyboardDelegate, LayoutDelegate, ListKeyboardDelegate, Navigation,
    TypeSelect, TypeSelectOutcome,
};
use understory_selection::{LinkBehavior, SelectionBehavior, SelectionManager, SelectionMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::input::{Key, Modifiers, Platform, PointerType};
use crate::press::{PressConfig, PressTracker};
use crate::state::ItemState;

/// Whether a press runs the action of a toggle-behavior list with nothing selected.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ToggleActionPolicy {
    /// With an empty selection every press runs the action, for every pointer
    /// type. Once something is selected (by Space, a checkbox, or a long
    /// press) presses toggle selection instead.
    #[default]
    ActionWhenEmpty,
    /// Presses always toggle selection. The action runs from Enter or a
    /// mouse double click.
    SelectionFirst,
}

/// What Escape does.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum EscapeKeyBehavior {
    /// Clear a non-empty selection and consume the key.
    #[default]
    ClearSelection,
    /// Leave the key unhandled.
    None,
}

/// Where focus came from when it entered the list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusEntry {
    /// From an element before the list (Tab).
    Forward,
    /// From an element after the list (Shift+Tab).
    Backward,
}

/// Options for [`SelectableList`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    /// Items have an action (the host handles [`Activation::Action`]).
    pub has_action: bool,
    /// Action versus selection for toggle-behavior lists.
    pub toggle_action_policy: ToggleActionPolicy,
    /// What Escape does.
    pub escape_key_behavior: EscapeKeyBehavior,
    /// Platform conventions for modifiers.
    pub platform: Platform,
    /// Select on mouse up instead of mouse down.
    pub select_on_press_up: bool,
    /// Ignore the select-all shortcut.
    pub disallow_select_all: bool,
    /// Ignore printable characters.
    pub disallow_typeahead: bool,
    /// Navigation options.
    pub keyboard: KeyboardConfig,
    /// Press thresholds.
    pub press: PressConfig,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            has_action: false,
            toggle_action_policy: ToggleActionPolicy::default(),
            escape_key_behavior: EscapeKeyBehavior::default(),
            platform: Platform::default(),
            select_on_press_up: false,
            disallow_select_all: false,
            disallow_typeahead: false,
            keyboard: KeyboardConfig::default(),
            press: PressConfig::default(),
        }
    }
}

impl InteractionConfig {
    /// Sets whether items have an action.
    #[must_use]
    pub fn with_action(mut self, has_action: bool) -> Self {
        self.has_action = has_action;
        self
    }

    /// Sets the toggle action policy.
    #[must_use]
    pub fn with_toggle_action_policy(mut self, policy: ToggleActionPolicy) -> Self {
        self.toggle_action_policy = policy;
        self
    }

    /// Sets the Escape behavior.
    #[must_use]
    pub fn with_escape_key_behavior(mut self, behavior: EscapeKeyBehavior) -> Self {
        self.escape_key_behavior = behavior;
        self
    }

    /// Sets the platform.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Sets whether mouse selection waits for the button to be released.
    #[must_use]
    pub fn with_select_on_press_up(mut self, on_up: bool) -> Self {
        self.select_on_press_up = on_up;
        self
    }

    /// Sets whether the select-all shortcut is ignored.
    #[must_use]
    pub fn with_disallow_select_all(mut self, disallow: bool) -> Self {
        self.disallow_select_all = disallow;
        self
    }

    /// Sets whether typeahead is disabled.
    #[must_use]
    pub fn with_disallow_typeahead(mut self, disallow: bool) -> Self {
        self.disallow_typeahead = disallow;
        self
    }

    /// Sets the navigation options.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: KeyboardConfig) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Sets the press thresholds.
    #[must_use]
    pub fn with_press(mut self, press: PressConfig) -> Self {
        self.press = press;
        self
    }
}

/// Something the host should do for an item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation<K> {
    /// Run the item's action.
    Action(K),
    /// Follow the item's link.
    FollowLink(K),
}

/// The result of feeding one input to a [`SelectableList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response<K> {
    /// The input was consumed; stop propagating it.
    pub handled: bool,
    /// Work for the host, if any.
    pub activation: Option<Activation<K>>,
}

impl<K> Response<K> {
    /// The input was not used.
    #[must_use]
    pub fn ignored() -> Self {
        Self {
            handled: false,
            activation: None,
        }
    }

    /// The input was consumed with no further work.
    #[must_use]
    pub fn handled() -> Self {
        Self {
            handled: true,
            activation: None,
        }
    }

    /// The input was consumed and `activation` should run.
    #[must_use]
    pub fn activate(activation: Option<Activation<K>>) -> Self {
        Self {
            handled: true,
            activation,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct PressContext {
    modifiers: Modifiers,
    had_primary_action: bool,
}

/// Turns press, keyboard, and focus input into selection changes and actions.
///
/// The list owns a [`SelectionManager`], a [`TypeSelect`] buffer, and a
/// [`PressTracker`]. Hosts forward raw input and act on the returned
/// [`Response`]: stop propagation when `handled`, and run the activation.
#[derive(Debug)]
pub struct SelectableList<K, T> {
    manager: SelectionManager<K, T>,
    config: InteractionConfig,
    typeahead: TypeSelect,
    press: PressTracker<K>,
    press_context: Option<PressContext>,
}

impl<K, T> SelectableList<K, T>
where
    K: Clone + Eq + Hash,
{
    /// Creates a coordinator around `manager`.
    #[must_use]
    pub fn new(manager: SelectionManager<K, T>, config: InteractionConfig) -> Self {
        Self {
            manager,
            press: PressTracker::with_config(config.press),
            config,
            typeahead: TypeSelect::new(),
            press_context: None,
        }
    }

    /// The selection manager.
    #[must_use]
    pub fn manager(&self) -> &SelectionManager<K, T> {
        &self.manager
    }

    /// Mutable access to the selection manager.
    pub fn manager_mut(&mut self) -> &mut SelectionManager<K, T> {
        &mut self.manager
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The typeahead buffer.
    #[must_use]
    pub fn typeahead(&self) -> &TypeSelect {
        &self.typeahead
    }

    /// Swaps in a new collection; see [`SelectionManager::set_collection`].
    pub fn set_collection(&mut self, collection: Arc<Collection<K, T>>) {
        if let Some(key) = self.press.pressed_key()
            && !collection.contains_key(key)
        {
            self.press.cancel();
            self.press_context = None;
        }
        self.manager.set_collection(collection);
    }

    // --- per-item queries ----------------------------------------------------

    /// Returns `true` if pressing `key` may change the selection.
    #[must_use]
    pub fn allows_selection(&self, key: &K) -> bool {
        !self.manager.is_disabled(key) && self.manager.can_select_item(key)
    }

    fn allows_actions(&self, key: &K) -> bool {
        if self.manager.is_disabled(key) || !self.manager.collection().contains_key(key) {
            return false;
        }
        let link_action = self.manager.is_link(key)
            && matches!(
                self.manager.link_behavior(),
                LinkBehavior::Action | LinkBehavior::Override
            );
        self.config.has_action || link_action
    }

    /// Returns `true` if a press on `key` runs its action instead of selecting.
    #[must_use]
    pub fn has_primary_action(&self, key: &K) -> bool {
        if !self.allows_actions(key) {
            return false;
        }
        let allows_selection = self.allows_selection(key);
        match self.manager.selection_behavior() {
            SelectionBehavior::Replace => !allows_selection,
            SelectionBehavior::Toggle => match self.config.toggle_action_policy {
                ToggleActionPolicy::ActionWhenEmpty => {
                    !allows_selection || self.manager.is_empty()
                }
                ToggleActionPolicy::SelectionFirst => !allows_selection,
            },
        }
    }

    /// Returns `true` if `key` selects on press and runs its action on
    /// Enter or a mouse double click.
    #[must_use]
    pub fn has_secondary_action(&self, key: &K) -> bool {
        self.allows_actions(key)
            && self.allows_selection(key)
            && (self.manager.selection_behavior() == SelectionBehavior::Replace
                || self.config.toggle_action_policy == ToggleActionPolicy::SelectionFirst)
    }

    /// Returns `true` if `key` has a primary or secondary action.
    #[must_use]
    pub fn has_action(&self, key: &K) -> bool {
        self.has_primary_action(key) || self.has_secondary_action(key)
    }

    /// Render state for `key`.
    #[must_use]
    pub fn item_state(&self, key: &K) -> ItemState {
        let is_focused = self.manager.is_focused() && self.manager.focused_key() == Some(key);
        ItemState {
            is_selected: self.manager.is_selected(key),
            is_focused,
            is_disabled: self.manager.is_disabled(key),
            is_pressed: self.press.is_pressed(key),
            has_action: self.has_action(key),
            allows_selection: self.allows_selection(key),
            is_focus_visible: is_focused && self.manager.is_focus_visible(),
        }
    }

    // --- selection and actions -----------------------------------------------

    /// Applies the selection gesture for `key`.
    ///
    /// Returns a link to follow for link items under [`LinkBehavior::Selection`].
    fn select(
        &mut self,
        key: &K,
        pointer: PointerType,
        modifiers: Modifiers,
    ) -> Option<Activation<K>> {
        let ctrl_like = modifiers.is_ctrl_like(self.config.platform);
        if pointer == PointerType::Keyboard && ctrl_like {
            self.manager.toggle_selection(key.clone());
            return None;
        }
        let mode = self.manager.selection_mode();
        if mode == SelectionMode::None {
            return None;
        }

        let mut follow = None;
        if self.manager.is_link(key) {
            match self.manager.link_behavior() {
                LinkBehavior::Selection => follow = Some(Activation::FollowLink(key.clone())),
                LinkBehavior::Override | LinkBehavior::None => return None,
                LinkBehavior::Action => {}
            }
        }

        if mode == SelectionMode::Single {
            if self.manager.is_selected(key) && !self.manager.disallow_empty_selection() {
                self.manager.toggle_selection(key.clone());
            } else {
                self.manager.replace_selection(key.clone());
            }
        } else if modifiers.is_shift() {
            self.manager.extend_selection(key.clone());
        } else if self.manager.selection_behavior() == SelectionBehavior::Toggle
            || ctrl_like
            || matches!(pointer, PointerType::Touch | PointerType::Virtual)
        {
            self.manager.toggle_selection(key.clone());
        } else {
            self.manager.replace_selection(key.clone());
        }
        follow
    }

    fn perform_action(&self, key: &K) -> Activation<K> {
        if self.manager.is_link(key)
            && matches!(
                self.manager.link_behavior(),
                LinkBehavior::Action | LinkBehavior::Override
            )
        {
            log::debug!("following link");
            Activation::FollowLink(key.clone())
        } else {
            log::debug!("dispatching item action");
            Activation::Action(key.clone())
        }
    }

    // --- pointer input -------------------------------------------------------

    /// Pointer down on `key`.
    ///
    /// Focuses the item. A mouse press selects immediately unless the item
    /// has a primary action or selection waits for press up.
    pub fn press_start(
        &mut self,
        key: K,
        pointer: PointerType,
        modifiers: Modifiers,
        at: Point,
        now_ms: u64,
    ) -> Response<K> {
        if self.manager.is_disabled(&key) || !self.manager.collection().contains_key(&key) {
            return Response::ignored();
        }
        let had_primary_action = self.has_primary_action(&key);
        self.press_context = Some(PressContext {
            modifiers,
            had_primary_action,
        });
        self.press.start(key.clone(), pointer, at, now_ms);

        self.manager.set_focused(true);
        self.manager.set_focus_visible(pointer == PointerType::Keyboard);
        self.manager.set_focused_key(Some(key.clone()), None);

        if pointer.selects_on_press_start()
            && !had_primary_action
            && !self.config.select_on_press_up
            && self.allows_selection(&key)
        {
            let follow = self.select(&key, pointer, modifiers);
            return Response::activate(follow);
        }
        Response::handled()
    }

    /// Pointer moved while pressed; returns `true` if the press was cancelled.
    pub fn press_move(&mut self, at: Point) -> bool {
        let cancelled = self.press.moved(at);
        if cancelled {
            self.press_context = None;
        }
        cancelled
    }

    /// Pointer released over `over` (or over nothing).
    ///
    /// Runs primary actions and mouse double-click secondary actions. For
    /// other pointers, a replace-behavior list runs the action on tap and
    /// selection is reached by long press.
    pub fn press_up(&mut self, over: Option<&K>, at: Point, now_ms: u64) -> Response<K> {
        let context = self.press_context.take();
        let Some(click) = self.press.end(over, at, now_ms) else {
            return Response::ignored();
        };
        let Some(context) = context else {
            return Response::ignored();
        };
        if click.after_long_press {
            return Response::handled();
        }
        let key = click.key;
        if self.manager.is_disabled(&key) || !self.manager.collection().contains_key(&key) {
            return Response::ignored();
        }

        match click.pointer_type {
            PointerType::Mouse => {
                if context.had_primary_action {
                    return Response::activate(Some(self.perform_action(&key)));
                }
                if click.count == 2 && self.has_secondary_action(&key) {
                    return Response::activate(Some(self.perform_action(&key)));
                }
                if self.config.select_on_press_up && self.allows_selection(&key) {
                    let follow = self.select(&key, click.pointer_type, context.modifiers);
                    return Response::activate(follow);
                }
                Response::handled()
            }
            _ => {
                let runs_action = self.has_primary_action(&key)
                    || (self.has_secondary_action(&key)
                        && self.manager.selection_behavior() == SelectionBehavior::Replace);
                if runs_action {
                    Response::activate(Some(self.perform_action(&key)))
                } else if self.allows_selection(&key) {
                    let follow = self.select(&key, click.pointer_type, context.modifiers);
                    Response::activate(follow)
                } else {
                    Response::handled()
                }
            }
        }
    }

    /// Abandons the active press.
    pub fn press_cancel(&mut self) {
        self.press.cancel();
        self.press_context = None;
    }

    /// A complete press and release at one spot.
    pub fn click(
        &mut self,
        key: K,
        pointer: PointerType,
        modifiers: Modifiers,
        now_ms: u64,
    ) -> Response<K> {
        let down = self.press_start(key.clone(), pointer, modifiers, Point::ZERO, now_ms);
        if !down.handled {
            return down;
        }
        let up = self.press_up(Some(&key), Point::ZERO, now_ms);
        Response {
            handled: true,
            activation: down.activation.or(up.activation),
        }
    }

    /// Checks the active press for a long press.
    ///
    /// A touch long press on an item with an action in a replace-behavior
    /// list selects the item and switches the list into toggle behavior until
    /// the selection empties.
    pub fn poll(&mut self, now_ms: u64) -> Response<K> {
        let Some(key) = self.press.poll_long_press(now_ms) else {
            return Response::ignored();
        };
        let eligible = self.has_action(&key)
            && self.allows_selection(&key)
            && self.manager.selection_behavior() == SelectionBehavior::Replace;
        if !eligible {
            return Response::ignored();
        }
        let modifiers = self.press_context.map(|c| c.modifiers).unwrap_or_default();
        let follow = self.select(&key, PointerType::Touch, modifiers);
        self.manager.set_selection_behavior(SelectionBehavior::Toggle);
        log::debug!("long press switched to toggle selection");
        Response::activate(follow)
    }

    // --- focus ---------------------------------------------------------------

    /// Focus entered the list.
    ///
    /// Without a focused key, focus goes to the first selected key (or the
    /// first key) when entering forward, and to the last ones backward. In a
    /// replace-behavior list that key also becomes selected.
    pub fn focus_in(&mut self, entry: FocusEntry) {
        self.manager.set_focused(true);
        if self.manager.focused_key().is_some() {
            return;
        }
        let target = {
            let delegate = ListKeyboardDelegate::for_manager(&self.manager, self.config.keyboard);
            match entry {
                FocusEntry::Forward => self
                    .manager
                    .first_selected_key()
                    .or_else(|| delegate.first_key()),
                FocusEntry::Backward => self
                    .manager
                    .last_selected_key()
                    .or_else(|| delegate.last_key()),
            }
        };
        if let Some(key) = target {
            self.manager.set_focused_key(Some(key.clone()), None);
            if self.manager.selection_behavior() == SelectionBehavior::Replace
                && !self.manager.is_selected(&key)
            {
                self.manager.replace_selection(key);
            }
        }
    }

    /// Focus left the list.
    pub fn focus_out(&mut self) {
        self.manager.set_focused(false);
        self.typeahead.reset();
    }

    // --- keyboard input ------------------------------------------------------

    /// A key was pressed while the list had focus.
    ///
    /// `layout` enables grid moves and viewport-sized paging.
    pub fn key_down(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        layout: Option<&dyn LayoutDelegate<K>>,
        now_ms: u64,
    ) -> Response<K> {
        self.manager.set_focus_visible(true);
        let ctrl_like = modifiers.is_ctrl_like(self.config.platform);
        match key {
            Key::ArrowDown => self.navigate(Navigation::Below, modifiers, layout, true),
            Key::ArrowUp => self.navigate(Navigation::Above, modifiers, layout, true),
            Key::ArrowLeft => self.navigate(Navigation::LeftOf, modifiers, layout, true),
            Key::ArrowRight => self.navigate(Navigation::RightOf, modifiers, layout, true),
            Key::PageDown => self.navigate(Navigation::PageBelow, modifiers, layout, true),
            Key::PageUp => self.navigate(Navigation::PageAbove, modifiers, layout, true),
            Key::Home => self.navigate(Navigation::First, modifiers, layout, ctrl_like),
            Key::End => self.navigate(Navigation::Last, modifiers, layout, ctrl_like),
            Key::Character('a' | 'A')
                if ctrl_like
                    && self.manager.selection_mode() == SelectionMode::Multiple
                    && !self.config.disallow_select_all =>
            {
                self.manager.select_all();
                Response::handled()
            }
            Key::Escape => self.escape(),
            Key::Enter => self.activate_focused(Key::Enter, modifiers),
            Key::Space => self.character(' ', modifiers, now_ms),
            Key::Character(ch) => self.character(ch, modifiers, now_ms),
            Key::Tab => {
                self.typeahead.reset();
                Response::ignored()
            }
        }
    }

    fn escape(&mut self) -> Response<K> {
        if self.config.escape_key_behavior == EscapeKeyBehavior::None
            || self.manager.disallow_empty_selection()
            || self.manager.is_empty()
        {
            return Response::ignored();
        }
        self.manager.clear_selection();
        Response::handled()
    }

    fn character(&mut self, ch: char, modifiers: Modifiers, now_ms: u64) -> Response<K> {
        let shortcut = modifiers.intersects(Modifiers::CTRL | Modifiers::META);
        if !self.config.disallow_typeahead && !shortcut {
            let outcome = {
                let delegate =
                    ListKeyboardDelegate::for_manager(&self.manager, self.config.keyboard);
                self.typeahead
                    .input(ch, self.manager.focused_key(), &delegate, now_ms)
            };
            match outcome {
                TypeSelectOutcome::Focus(key) => {
                    self.manager.set_focused_key(Some(key), None);
                    return Response::handled();
                }
                TypeSelectOutcome::NoMatch => return Response::handled(),
                TypeSelectOutcome::Ignored => {}
            }
        }
        if ch == ' ' {
            return self.activate_focused(Key::Space, modifiers);
        }
        Response::ignored()
    }

    fn activate_focused(&mut self, key: Key, modifiers: Modifiers) -> Response<K> {
        let Some(focused) = self.manager.focused_key().cloned() else {
            return Response::ignored();
        };
        if self.manager.is_disabled(&focused) {
            return Response::ignored();
        }
        if key == Key::Enter && self.has_action(&focused) {
            return Response::activate(Some(self.perform_action(&focused)));
        }
        if self.allows_selection(&focused) || modifiers.is_ctrl_like(self.config.platform) {
            let follow = self.select(&focused, PointerType::Keyboard, modifiers);
            return Response::activate(follow);
        }
        Response::ignored()
    }

    fn navigate(
        &mut self,
        navigation: Navigation,
        modifiers: Modifiers,
        layout: Option<&dyn LayoutDelegate<K>>,
        shift_extends: bool,
    ) -> Response<K> {
        let target = {
            let mut delegate =
                ListKeyboardDelegate::for_manager(&self.manager, self.config.keyboard);
            if let Some(layout) = layout {
                delegate = delegate.with_layout_delegate(layout);
            }
            match self.manager.focused_key() {
                Some(from) => delegate.navigate(from, navigation),
                None => match navigation {
                    Navigation::Above | Navigation::PageAbove | Navigation::Last => {
                        delegate.last_key()
                    }
                    _ => delegate.first_key(),
                },
            }
        };
        let Some(target) = target else {
            return Response::ignored();
        };
        log::trace!("keyboard navigation {navigation:?}");
        self.typeahead.reset();
        self.manager.set_focused_key(Some(target.clone()), None);

        if shift_extends
            && modifiers.is_shift()
            && self.manager.selection_mode() == SelectionMode::Multiple
        {
            self.manager.extend_selection(target);
        } else if self.manager.selection_behavior() == SelectionBehavior::Replace
            && !modifiers.is_ctrl_like(self.config.platform)
        {
            self.manager.replace_selection(target);
        }
        Response::handled()
    }
}
