// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection manager: selection and focus state over a collection.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashSet;
use understory_collection::{Collection, Node};

use crate::config::{
    DisabledBehavior, FocusStrategy, LinkBehavior, SelectionBehavior, SelectionConfig,
    SelectionMode,
};
use crate::key_set::{KeySet, Selection};

/// Callback invoked with the new selection after a change.
pub type SelectionChangeHandler<K> = Box<dyn FnMut(&Selection<K>)>;

/// Stateful controller for selection and focus over a [`Collection`].
///
/// The manager owns the selection value, the focused key, and the focus flags.
/// Every mutating method that changes the resolved selection invokes the
/// registered change handler exactly once, with the committed value.
///
/// In **uncontrolled** mode (the default) the manager stores every change. In
/// **controlled** mode (see [`SelectionManager::controlled`]) changes are only
/// proposed through the handler; the owner adopts them by calling
/// [`SelectionManager::set_controlled_selection`].
///
/// The collection is held behind an `Arc` and replaced wholesale with
/// [`SelectionManager::set_collection`], which prunes stale keys synchronously.
pub struct SelectionManager<K, T> {
    collection: Arc<Collection<K, T>>,
    mode: SelectionMode,
    configured_behavior: SelectionBehavior,
    behavior: SelectionBehavior,
    disallow_empty_selection: bool,
    disabled_keys: HashSet<K>,
    disabled_behavior: DisabledBehavior,
    link_behavior: LinkBehavior,
    allow_duplicate_selection_events: bool,
    selection: Selection<K>,
    controlled: bool,
    focused_key: Option<K>,
    child_focus_strategy: Option<FocusStrategy>,
    focused: bool,
    focus_visible: bool,
    revision: u64,
    on_selection_change: Option<SelectionChangeHandler<K>>,
}

impl<K: fmt::Debug, T> fmt::Debug for SelectionManager<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager")
            .field("mode", &self.mode)
            .field("behavior", &self.behavior)
            .field("selection", &self.selection)
            .field("controlled", &self.controlled)
            .field("focused_key", &self.focused_key)
            .field("focused", &self.focused)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<K, T> SelectionManager<K, T>
where
    K: Clone + Eq + Hash,
{
    /// Creates an uncontrolled manager with an empty selection.
    #[must_use]
    pub fn new(collection: Arc<Collection<K, T>>, config: SelectionConfig<K>) -> Self {
        Self {
            collection,
            mode: config.mode,
            configured_behavior: config.behavior,
            behavior: config.behavior,
            disallow_empty_selection: config.disallow_empty_selection,
            disabled_keys: config.disabled_keys.into_iter().collect(),
            disabled_behavior: config.disabled_behavior,
            link_behavior: config.link_behavior,
            allow_duplicate_selection_events: config.allow_duplicate_selection_events,
            selection: Selection::empty(),
            controlled: false,
            focused_key: None,
            child_focus_strategy: None,
            focused: false,
            focus_visible: false,
            revision: 0,
            on_selection_change: None,
        }
    }

    /// Sets the initial selection of an uncontrolled manager.
    ///
    /// Unknown and unselectable keys are dropped. No notification is sent.
    #[must_use]
    pub fn with_default_selection(mut self, selection: Selection<K>) -> Self {
        self.selection = self.sanitize(selection);
        self
    }

    /// Switches the manager to controlled mode with the given selection.
    #[must_use]
    pub fn controlled(mut self, selection: Selection<K>) -> Self {
        self.controlled = true;
        self.selection = self.sanitize(selection);
        self
    }

    /// Registers the selection change handler.
    #[must_use]
    pub fn on_selection_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&Selection<K>) + 'static,
    {
        self.on_selection_change = Some(Box::new(handler));
        self
    }

    /// Replaces the selection change handler.
    pub fn set_on_selection_change(&mut self, handler: Option<SelectionChangeHandler<K>>) {
        self.on_selection_change = handler;
    }

    /// The collection this manager operates on.
    #[must_use]
    pub fn collection(&self) -> &Arc<Collection<K, T>> {
        &self.collection
    }

    /// The selection mode.
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// The current selection behavior.
    #[must_use]
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.behavior
    }

    /// Temporarily overrides the selection behavior.
    ///
    /// When the configured behavior is [`SelectionBehavior::Replace`] and this
    /// switches to [`SelectionBehavior::Toggle`] (for example after a touch long
    /// press), the manager switches back once the selection becomes empty.
    pub fn set_selection_behavior(&mut self, behavior: SelectionBehavior) {
        self.behavior = behavior;
    }

    /// Whether an empty selection is refused.
    #[must_use]
    pub fn disallow_empty_selection(&self) -> bool {
        self.disallow_empty_selection
    }

    /// The disabled behavior.
    #[must_use]
    pub fn disabled_behavior(&self) -> DisabledBehavior {
        self.disabled_behavior
    }

    /// The link behavior.
    #[must_use]
    pub fn link_behavior(&self) -> LinkBehavior {
        self.link_behavior
    }

    /// The disabled key set.
    #[must_use]
    pub fn disabled_keys(&self) -> &HashSet<K> {
        &self.disabled_keys
    }

    /// Returns `true` if the manager is in controlled mode.
    #[must_use]
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Counter bumped whenever the stored selection changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- focus ---------------------------------------------------------------

    /// Whether the collection itself currently has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Sets whether the collection has focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether focus should be drawn (keyboard-driven focus).
    #[must_use]
    pub fn is_focus_visible(&self) -> bool {
        self.focus_visible
    }

    /// Sets whether focus should be drawn.
    pub fn set_focus_visible(&mut self, visible: bool) {
        self.focus_visible = visible;
    }

    /// The key that last received logical focus.
    #[must_use]
    pub fn focused_key(&self) -> Option<&K> {
        self.focused_key.as_ref()
    }

    /// Strategy for focusing a child of the focused key, if one was requested.
    #[must_use]
    pub fn child_focus_strategy(&self) -> Option<FocusStrategy> {
        self.child_focus_strategy
    }

    /// Moves logical focus to `key`, independently of selection.
    ///
    /// Keys that are not part of the collection are ignored.
    pub fn set_focused_key(&mut self, key: Option<K>, child_strategy: Option<FocusStrategy>) {
        if let Some(k) = &key
            && !self.collection.contains_key(k)
        {
            log::debug!("ignoring focus request for a key outside the collection");
            return;
        }
        log::trace!("focused key changed");
        self.focused_key = key;
        self.child_focus_strategy = child_strategy;
    }

    // --- queries -------------------------------------------------------------

    /// The stored selection value, with `All` left unexpanded.
    #[must_use]
    pub fn raw_selection(&self) -> &Selection<K> {
        &self.selection
    }

    /// The resolved selection: `All` expanded, keys missing from the
    /// collection dropped.
    #[must_use]
    pub fn selected_keys(&self) -> KeySet<K> {
        self.resolve(&self.selection)
    }

    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn is_selected(&self, key: &K) -> bool {
        if self.mode == SelectionMode::None {
            return false;
        }
        match &self.selection {
            Selection::All => self.can_select_item(key),
            Selection::Keys(keys) => keys.contains(key) && self.collection.contains_key(key),
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.selection {
            Selection::All => false,
            Selection::Keys(keys) => !keys.iter().any(|k| self.collection.contains_key(k)),
        }
    }

    /// Returns `true` if every selectable item is selected.
    #[must_use]
    pub fn is_select_all(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        match &self.selection {
            Selection::All => true,
            Selection::Keys(keys) => {
                let selected: HashSet<&K> = keys.iter().collect();
                self.selectable_nodes()
                    .all(|node| selected.contains(node.key()))
            }
        }
    }

    /// The selected key that comes first in collection order.
    #[must_use]
    pub fn first_selected_key(&self) -> Option<K> {
        self.selected_nodes().next().map(|node| node.key().clone())
    }

    /// The selected key that comes last in collection order.
    #[must_use]
    pub fn last_selected_key(&self) -> Option<K> {
        self.selected_nodes().last().map(|node| node.key().clone())
    }

    /// Every selectable item key, in collection order.
    #[must_use]
    pub fn select_all_keys(&self) -> Vec<K> {
        self.selectable_nodes()
            .map(|node| node.key().clone())
            .collect()
    }

    /// Returns `true` if `key` may become selected.
    ///
    /// Fails when selection is off, the key is unknown or not an item, the key
    /// is disabled (under either disabled behavior), or the key is a link item
    /// under [`LinkBehavior::Override`].
    #[must_use]
    pub fn can_select_item(&self, key: &K) -> bool {
        if self.mode == SelectionMode::None || self.disabled_keys.contains(key) {
            return false;
        }
        let Some(node) = self.collection.get_item(key) else {
            return false;
        };
        if !node.is_item() || node.is_disabled() {
            return false;
        }
        !(node.is_link() && self.link_behavior == LinkBehavior::Override)
    }

    /// Returns `true` if `key` is disabled for all interactions.
    ///
    /// Under [`DisabledBehavior::Selection`] this is always `false`; disabled
    /// keys then only fail [`SelectionManager::can_select_item`].
    #[must_use]
    pub fn is_disabled(&self, key: &K) -> bool {
        self.disabled_behavior == DisabledBehavior::All
            && (self.disabled_keys.contains(key)
                || self
                    .collection
                    .get_item(key)
                    .is_some_and(|node| node.is_disabled()))
    }

    /// Returns `true` if `key` is a link item.
    #[must_use]
    pub fn is_link(&self, key: &K) -> bool {
        self.collection
            .get_item(key)
            .is_some_and(|node| node.is_link())
    }

    /// Compares the resolved selection with `other`, resolved the same way.
    #[must_use]
    pub fn is_selection_equal(&self, other: &Selection<K>) -> bool {
        self.resolve(&self.selection)
            .same_keys_hashed(&self.resolve(other))
    }

    // --- mutations -----------------------------------------------------------

    /// Flips the selection state of `key`.
    ///
    /// In single mode an unselected key replaces the selection, and a selected
    /// key is deselected unless that would empty a selection that must not be
    /// empty. In multiple mode membership is flipped, with the same guard.
    pub fn toggle_selection(&mut self, key: K) {
        if self.mode == SelectionMode::None || !self.can_select_item(&key) {
            return;
        }
        if self.mode == SelectionMode::Single && !self.is_selected(&key) {
            self.replace_selection(key);
            return;
        }

        let mut keys = self.live_key_set();
        if keys.contains(&key) {
            if self.disallow_empty_selection && keys.len() <= 1 {
                log::debug!("toggle blocked: selection may not become empty");
                return;
            }
            keys.remove(&key);
        } else {
            keys.insert(key.clone());
        }
        keys.set_anchor_key(Some(key.clone()));
        keys.set_current_key(Some(key));
        self.commit(Selection::Keys(keys));
    }

    /// Replaces the selection with exactly `key`.
    pub fn replace_selection(&mut self, key: K) {
        if self.mode == SelectionMode::None || !self.can_select_item(&key) {
            return;
        }
        self.commit(Selection::Keys(KeySet::single(key)));
    }

    /// Extends the selection to the contiguous range between the anchor and `to_key`.
    ///
    /// The anchor is the selection's anchor key, else the focused key, else
    /// `to_key` itself. The range produced by the previous extension from the
    /// same anchor is withdrawn first, so repeated calls grow and shrink the
    /// range around a fixed anchor. Keys outside the range stay selected.
    pub fn extend_selection(&mut self, to_key: K) {
        match self.mode {
            SelectionMode::None => return,
            SelectionMode::Single => {
                self.replace_selection(to_key);
                return;
            }
            SelectionMode::Multiple => {}
        }
        if !self.collection.contains_key(&to_key) {
            return;
        }

        if self.selection.is_all() {
            self.commit(Selection::Keys(KeySet::single(to_key)));
            return;
        }

        let mut keys = self.live_key_set();
        let anchor = keys
            .anchor_key()
            .or(self.focused_key.as_ref())
            .filter(|k| self.collection.contains_key(k))
            .cloned()
            .unwrap_or_else(|| to_key.clone());

        if let Some(previous_end) = keys.current_key().cloned() {
            keys.remove_all_hashed(self.key_range(&anchor, &previous_end));
        }
        let added = self
            .key_range(&anchor, &to_key)
            .into_iter()
            .filter(|key| self.can_select_item(key));
        keys.extend_hashed(added);
        keys.set_anchor_key(Some(anchor));
        keys.set_current_key(Some(to_key));
        self.commit(Selection::Keys(keys));
    }

    /// Replaces the selection with `keys`.
    ///
    /// Keys that are missing from the collection or cannot be selected are
    /// dropped. In single mode only the first remaining key is kept.
    pub fn set_selected_keys<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        if self.mode == SelectionMode::None {
            return;
        }
        let keys = KeySet::from_keys_hashed(keys);
        let sanitized = self.sanitize(Selection::Keys(keys));
        self.commit(sanitized);
    }

    /// Selects every item (multiple mode only).
    pub fn select_all(&mut self) {
        if self.mode == SelectionMode::Multiple {
            self.commit(Selection::All);
        }
    }

    /// Selects everything, or clears the selection if everything is selected.
    pub fn toggle_select_all(&mut self) {
        if self.is_select_all() {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    /// Empties the selection.
    ///
    /// Blocked while `disallow_empty_selection` is set; the prior selection is
    /// kept.
    pub fn clear_selection(&mut self) {
        if self.is_empty() {
            return;
        }
        if self.disallow_empty_selection {
            log::debug!("clear blocked: selection may not become empty");
            return;
        }
        self.commit(Selection::empty());
    }

    /// Adopts the selection supplied by the owner of a controlled manager.
    ///
    /// Also usable in uncontrolled mode to resynchronize without notifying.
    pub fn set_controlled_selection(&mut self, selection: Selection<K>) {
        let selection = self.sanitize(selection);
        self.store(selection);
    }

    /// Replaces the disabled keys and drops newly disabled keys from the selection.
    pub fn set_disabled_keys<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.disabled_keys = keys.into_iter().collect();
        self.prune();
    }

    /// Swaps in a new collection.
    ///
    /// Selected keys that no longer exist (or can no longer be selected) are
    /// pruned before this returns; if that changes the resolved selection, the
    /// change handler runs once. A focused key that disappeared moves to the
    /// nearest remaining focusable item at its old position.
    pub fn set_collection(&mut self, collection: Arc<Collection<K, T>>) {
        if Arc::ptr_eq(&self.collection, &collection) {
            return;
        }
        let old_focus_index = self
            .focused_key
            .as_ref()
            .and_then(|key| self.collection.get_item(key))
            .map(Node::index);
        self.collection = collection;
        log::debug!(
            "collection swapped: {} nodes ({} items)",
            self.collection.len(),
            self.collection.item_count()
        );

        if let Some(key) = &self.focused_key
            && !self.collection.contains_key(key)
        {
            self.focused_key = old_focus_index.and_then(|idx| self.nearest_focusable(idx));
            self.child_focus_strategy = None;
        }
        self.prune();
    }

    // --- internals -----------------------------------------------------------

    fn selectable_nodes(&self) -> impl Iterator<Item = &Node<K, T>> + '_ {
        self.collection
            .iter()
            .filter(|node| self.can_select_item(node.key()))
    }

    fn selected_nodes(&self) -> impl Iterator<Item = &Node<K, T>> + '_ {
        let selected: Option<HashSet<&K>> = match &self.selection {
            Selection::All => None,
            Selection::Keys(keys) => Some(keys.iter().collect()),
        };
        let enabled = self.mode != SelectionMode::None;
        self.collection.iter().filter(move |node| {
            enabled
                && node.is_item()
                && match &selected {
                    None => self.can_select_item(node.key()),
                    Some(keys) => keys.contains(node.key()),
                }
        })
    }

    fn resolve(&self, selection: &Selection<K>) -> KeySet<K> {
        match selection {
            Selection::All => KeySet::from_keys_hashed(self.select_all_keys()),
            Selection::Keys(keys) => {
                let mut resolved = keys.clone();
                resolved.retain(|k| self.collection.contains_key(k));
                resolved
            }
        }
    }

    /// The stored selection as a concrete set a gesture can start from.
    ///
    /// `All` is expanded, and keys that can no longer be selected are dropped.
    /// A controlled manager may still hold such keys after a collection swap.
    fn live_key_set(&self) -> KeySet<K> {
        match &self.selection {
            Selection::All => KeySet::from_keys_hashed(self.select_all_keys()),
            Selection::Keys(keys) => {
                let mut live = keys.clone();
                live.retain(|k| self.can_select_item(k));
                live
            }
        }
    }

    fn sanitize(&self, selection: Selection<K>) -> Selection<K> {
        match selection {
            Selection::All if self.mode == SelectionMode::Multiple => Selection::All,
            Selection::All => Selection::empty(),
            Selection::Keys(mut keys) => {
                keys.retain(|k| self.can_select_item(k));
                if self.mode == SelectionMode::Single && keys.len() > 1 {
                    let first = keys.items()[0].clone();
                    keys = KeySet::single(first);
                }
                Selection::Keys(keys)
            }
        }
    }

    /// Keys of the items between `from` and `to` (inclusive) in collection order.
    fn key_range(&self, from: &K, to: &K) -> Vec<K> {
        let (Some(a), Some(b)) = (self.collection.get_item(from), self.collection.get_item(to))
        else {
            return Vec::new();
        };
        let (start, end) = if a.index() <= b.index() {
            (a.index(), b.index())
        } else {
            (b.index(), a.index())
        };
        (start..=end)
            .filter_map(|idx| self.collection.at(idx))
            .filter(|node| node.is_item())
            .map(|node| node.key().clone())
            .collect()
    }

    fn nearest_focusable(&self, index: usize) -> Option<K> {
        let len = self.collection.len();
        if len == 0 {
            return None;
        }
        let start = index.min(len - 1);
        let focusable = |idx: usize| {
            self.collection
                .at(idx)
                .filter(|node| node.is_item() && !self.is_disabled(node.key()))
                .map(|node| node.key().clone())
        };
        (start..len)
            .find_map(focusable)
            .or_else(|| (0..start).rev().find_map(focusable))
    }

    fn prune(&mut self) {
        let Selection::Keys(keys) = &self.selection else {
            return;
        };
        let mut pruned = keys.clone();
        pruned.retain(|k| self.can_select_item(k));
        if pruned.len() == keys.len() {
            return;
        }
        log::debug!(
            "pruned {} stale keys from the selection",
            keys.len() - pruned.len()
        );
        self.commit_changed(Selection::Keys(pruned));
    }

    /// Commits a user-driven change, honoring duplicate-event settings.
    fn commit(&mut self, next: Selection<K>) {
        let changed = !self.is_selection_equal(&next) || self.selection.is_all() != next.is_all();
        if !changed && !self.allow_duplicate_selection_events {
            // Roles such as the anchor may still have moved.
            if !self.controlled {
                self.selection = next;
            }
            return;
        }
        self.apply(next);
    }

    /// Commits a change that is known to differ from the stored selection.
    fn commit_changed(&mut self, next: Selection<K>) {
        self.apply(next);
    }

    fn apply(&mut self, next: Selection<K>) {
        if !self.controlled {
            self.store(next.clone());
        }
        log::trace!("selection changed (revision {})", self.revision);
        if let Some(handler) = self.on_selection_change.as_mut() {
            handler(&next);
        }
    }

    fn store(&mut self, next: Selection<K>) {
        let same = match (&self.selection, &next) {
            (Selection::All, Selection::All) => true,
            (Selection::Keys(a), Selection::Keys(b)) => a.same_keys_hashed(b),
            _ => false,
        };
        if !same {
            self.revision = self.revision.wrapping_add(1);
        }
        self.selection = next;
        if self.configured_behavior == SelectionBehavior::Replace
            && self.behavior == SelectionBehavior::Toggle
            && self.selection.is_empty()
        {
            log::debug!("selection emptied: restoring replace behavior");
            self.behavior = SelectionBehavior::Replace;
        }
    }
}
