// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_selection` crate.
//!
//! These exercise `SelectionManager` end to end: mode enforcement, range
//! extension, disabled and link keys, change notification, controlled mode,
//! and pruning when the collection is swapped.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use understory_collection::{Collection, ItemSpec};
use understory_selection::{
    DisabledBehavior, KeySet, LinkBehavior, Selection, SelectionBehavior, SelectionConfig,
    SelectionManager, SelectionMode,
};

type Fruit = Collection<&'static str, ()>;

fn fruit(names: &[&'static str]) -> Arc<Fruit> {
    Arc::new(Collection::from_items(names.iter().map(|n| ItemSpec::item(*n, *n, ()))).unwrap())
}

fn abc() -> Arc<Fruit> {
    fruit(&["Apple", "Banana", "Cherry"])
}

fn manager(mode: SelectionMode) -> SelectionManager<&'static str, ()> {
    SelectionManager::new(abc(), SelectionConfig::new(mode))
}

/// Records every notification the manager sends.
fn recorder(
    m: SelectionManager<&'static str, ()>,
) -> (
    SelectionManager<&'static str, ()>,
    Rc<RefCell<Vec<Selection<&'static str>>>>,
) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let m = m.on_selection_change(move |sel| sink.borrow_mut().push(sel.clone()));
    (m, log)
}

fn sorted(keys: KeySet<&'static str>) -> Vec<&'static str> {
    let mut v: Vec<_> = keys.iter().copied().collect();
    v.sort_unstable();
    v
}

#[test]
fn single_toggle_selects_then_deselects() {
    let mut m = manager(SelectionMode::Single);
    m.toggle_selection("Banana");
    assert_eq!(sorted(m.selected_keys()), ["Banana"]);
    m.toggle_selection("Banana");
    assert!(m.selected_keys().is_empty());
}

#[test]
fn single_toggle_replaces_other_key() {
    let mut m = manager(SelectionMode::Single);
    m.toggle_selection("Apple");
    m.toggle_selection("Cherry");
    assert_eq!(sorted(m.selected_keys()), ["Cherry"]);
}

#[test]
fn clear_is_blocked_when_empty_selection_is_disallowed() {
    let mut m = SelectionManager::new(
        abc(),
        SelectionConfig::new(SelectionMode::Multiple).with_disallow_empty_selection(true),
    );
    m.toggle_selection("Apple");
    m.clear_selection();
    assert_eq!(sorted(m.selected_keys()), ["Apple"]);

    // Toggling the last key off is refused too.
    m.toggle_selection("Apple");
    assert!(m.is_selected(&"Apple"));
}

#[test]
fn extend_from_focused_key_selects_contiguous_range() {
    let mut m = SelectionManager::new(
        abc(),
        SelectionConfig::new(SelectionMode::Multiple).with_behavior(SelectionBehavior::Replace),
    );
    m.set_focused_key(Some("Apple"), None);
    m.extend_selection("Cherry");
    assert_eq!(sorted(m.selected_keys()), ["Apple", "Banana", "Cherry"]);
    assert_eq!(m.selected_keys().anchor_key(), Some(&"Apple"));
}

#[test]
fn repeated_extension_shrinks_around_the_anchor() {
    let mut m = SelectionManager::new(
        fruit(&["a", "b", "c", "d", "e"]),
        SelectionConfig::new(SelectionMode::Multiple),
    );
    m.replace_selection("c");
    m.extend_selection("e");
    assert_eq!(sorted(m.selected_keys()), ["c", "d", "e"]);
    m.extend_selection("a");
    assert_eq!(sorted(m.selected_keys()), ["a", "b", "c"]);
}

#[test]
fn extension_keeps_keys_outside_the_range() {
    let mut m = SelectionManager::new(
        fruit(&["a", "b", "c", "d", "e"]),
        SelectionConfig::new(SelectionMode::Multiple),
    );
    m.replace_selection("a");
    m.toggle_selection("d");
    m.extend_selection("e");
    assert_eq!(sorted(m.selected_keys()), ["a", "d", "e"]);
}

#[test]
fn extension_skips_disabled_keys() {
    let mut m = SelectionManager::new(
        abc(),
        SelectionConfig::new(SelectionMode::Multiple).with_disabled_keys(["Banana"]),
    );
    m.replace_selection("Apple");
    m.extend_selection("Cherry");
    assert_eq!(sorted(m.selected_keys()), ["Apple", "Cherry"]);
}

#[test]
fn single_mode_extension_replaces() {
    let mut m = manager(SelectionMode::Single);
    m.replace_selection("Apple");
    m.extend_selection("Cherry");
    assert_eq!(sorted(m.selected_keys()), ["Cherry"]);
}

#[test]
fn mode_none_never_selects() {
    let mut m = manager(SelectionMode::None);
    m.toggle_selection("Apple");
    m.replace_selection("Banana");
    m.extend_selection("Cherry");
    m.select_all();
    m.set_selected_keys(["Apple"]);
    assert!(m.is_empty());
    assert!(!m.is_selected(&"Apple"));
    assert!(!m.can_select_item(&"Apple"));
}

#[test]
fn clear_is_idempotent_and_notifies_once() {
    let (mut m, log) = recorder(manager(SelectionMode::Multiple));
    m.replace_selection("Apple");
    m.clear_selection();
    m.clear_selection();
    assert!(m.is_empty());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn set_selected_keys_round_trips() {
    let mut m = manager(SelectionMode::Multiple);
    m.set_selected_keys(["Cherry", "Apple"]);
    let keys = m.selected_keys();
    m.clear_selection();
    m.set_selected_keys(keys.iter().copied());
    assert_eq!(m.selected_keys(), KeySet::from_keys(["Apple", "Cherry"]));
}

#[test]
fn set_selected_keys_drops_unknown_and_keeps_first_in_single_mode() {
    let mut m = manager(SelectionMode::Multiple);
    m.set_selected_keys(["Durian", "Apple"]);
    assert_eq!(sorted(m.selected_keys()), ["Apple"]);

    let mut single = manager(SelectionMode::Single);
    single.set_selected_keys(["Cherry", "Apple"]);
    assert_eq!(sorted(single.selected_keys()), ["Cherry"]);
}

#[test]
fn unchanged_selection_is_not_reported_twice() {
    let (mut m, log) = recorder(manager(SelectionMode::Multiple));
    m.replace_selection("Apple");
    m.replace_selection("Apple");
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(m.revision(), 1);
}

#[test]
fn duplicate_events_can_be_allowed() {
    let config =
        SelectionConfig::new(SelectionMode::Multiple).with_duplicate_selection_events(true);
    let (mut m, log) = recorder(SelectionManager::new(abc(), config));
    m.replace_selection("Apple");
    m.replace_selection("Apple");
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn select_all_resolves_to_selectable_items() {
    let mut m = SelectionManager::new(
        abc(),
        SelectionConfig::new(SelectionMode::Multiple).with_disabled_keys(["Banana"]),
    );
    m.select_all();
    assert!(m.raw_selection().is_all());
    assert!(m.is_select_all());
    assert_eq!(m.select_all_keys(), ["Apple", "Cherry"]);
    assert_eq!(sorted(m.selected_keys()), ["Apple", "Cherry"]);
    assert!(!m.is_selected(&"Banana"));

    m.toggle_select_all();
    assert!(m.is_empty());
    m.toggle_select_all();
    assert!(m.is_select_all());
}

#[test]
fn select_all_is_ignored_in_single_mode() {
    let mut m = manager(SelectionMode::Single);
    m.select_all();
    assert!(m.is_empty());
}

#[test]
fn toggling_out_of_all_expands_the_sentinel() {
    let mut m = manager(SelectionMode::Multiple);
    m.select_all();
    m.toggle_selection("Banana");
    assert!(!m.raw_selection().is_all());
    assert_eq!(sorted(m.selected_keys()), ["Apple", "Cherry"]);
}

#[test]
fn first_and_last_selected_follow_collection_order() {
    let mut m = manager(SelectionMode::Multiple);
    m.set_selected_keys(["Cherry", "Apple"]);
    assert_eq!(m.first_selected_key(), Some("Apple"));
    assert_eq!(m.last_selected_key(), Some("Cherry"));
}

#[test]
fn swapping_collection_prunes_and_notifies_once() {
    let (mut m, log) = recorder(manager(SelectionMode::Multiple));
    m.replace_selection("Cherry");
    log.borrow_mut().clear();

    m.set_collection(fruit(&["Apple", "Banana"]));
    assert!(m.selected_keys().is_empty());
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert!(log[0].is_empty());
}

#[test]
fn swapping_collection_without_losses_is_silent() {
    let (mut m, log) = recorder(manager(SelectionMode::Multiple));
    m.replace_selection("Apple");
    m.set_collection(fruit(&["Apple", "Banana"]));
    assert_eq!(log.borrow().len(), 1);
    assert!(m.is_selected(&"Apple"));
}

#[test]
fn swapping_collection_repairs_focus() {
    let mut m = manager(SelectionMode::Multiple);
    m.set_focused_key(Some("Banana"), None);
    m.set_collection(fruit(&["Apple", "Cherry"]));
    assert_eq!(m.focused_key(), Some(&"Cherry"));

    m.set_collection(fruit(&["Apple"]));
    assert_eq!(m.focused_key(), Some(&"Apple"));
}

#[test]
fn focus_ignores_unknown_keys() {
    let mut m = manager(SelectionMode::Multiple);
    m.set_focused_key(Some("Apple"), None);
    m.set_focused_key(Some("Durian"), None);
    assert_eq!(m.focused_key(), Some(&"Apple"));
    m.set_focused_key(None, None);
    assert_eq!(m.focused_key(), None);
}

#[test]
fn controlled_mode_proposes_without_storing() {
    let (m, log) = recorder(manager(SelectionMode::Multiple).controlled(Selection::empty()));
    let mut m = m;
    m.toggle_selection("Apple");
    assert!(m.is_empty());
    assert_eq!(log.borrow().len(), 1);

    let proposed = log.borrow()[0].clone();
    m.set_controlled_selection(proposed);
    assert!(m.is_selected(&"Apple"));
}

#[test]
fn controlled_selection_never_reports_stale_keys() {
    let mut m = manager(SelectionMode::Multiple)
        .controlled(Selection::Keys(KeySet::from_keys(["Apple", "Cherry"])));
    m.set_collection(fruit(&["Apple"]));
    assert_eq!(sorted(m.selected_keys()), ["Apple"]);
    assert!(!m.is_selected(&"Cherry"));
}

#[test]
fn controlled_gestures_propose_only_live_keys() {
    let (mut m, log) = recorder(
        manager(SelectionMode::Multiple)
            .controlled(Selection::Keys(KeySet::from_keys(["Apple", "Cherry"]))),
    );
    // The owner never adopts the pruned value, so "Cherry" stays stored.
    m.set_collection(fruit(&["Apple", "Banana"]));

    m.toggle_selection("Banana");
    let proposed = log.borrow().last().cloned().unwrap();
    assert_eq!(sorted(proposed.keys().unwrap().clone()), ["Apple", "Banana"]);

    m.extend_selection("Banana");
    let proposed = log.borrow().last().cloned().unwrap();
    assert_eq!(sorted(proposed.keys().unwrap().clone()), ["Apple", "Banana"]);
}

#[test]
fn toggling_out_of_select_all_on_a_large_collection() {
    let items = Arc::new(
        Collection::from_items((0..5_000_u32).map(|i| ItemSpec::item(i, format!("Row {i}"), ())))
            .unwrap(),
    );
    let mut m = SelectionManager::new(items, SelectionConfig::new(SelectionMode::Multiple));
    m.select_all();
    assert!(m.is_select_all());

    m.toggle_selection(5);
    assert!(!m.is_selected(&5));
    assert!(!m.is_select_all());
    assert_eq!(m.selected_keys().len(), 4_999);
    assert_eq!(m.first_selected_key(), Some(0));
    assert_eq!(m.last_selected_key(), Some(4_999));

    m.extend_selection(10);
    // The range from the anchor at 5 brings 5 back.
    assert_eq!(m.selected_keys().len(), 5_000);
    assert!(m.is_select_all());
}

#[test]
fn disabled_behavior_controls_focusability() {
    let all = SelectionManager::new(
        abc(),
        SelectionConfig::new(SelectionMode::Multiple).with_disabled_keys(["Banana"]),
    );
    assert!(all.is_disabled(&"Banana"));
    assert!(!all.can_select_item(&"Banana"));

    let selection_only = SelectionManager::new(
        abc(),
        SelectionConfig::new(SelectionMode::Multiple)
            .with_disabled_keys(["Banana"])
            .with_disabled_behavior(DisabledBehavior::Selection),
    );
    assert!(!selection_only.is_disabled(&"Banana"));
    assert!(!selection_only.can_select_item(&"Banana"));
}

#[test]
fn newly_disabled_keys_are_pruned() {
    let (mut m, log) = recorder(manager(SelectionMode::Multiple));
    m.set_selected_keys(["Apple", "Banana"]);
    m.set_disabled_keys(["Banana"]);
    assert_eq!(sorted(m.selected_keys()), ["Apple"]);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn override_links_cannot_be_selected() {
    let links = Arc::new(
        Collection::from_items([
            ItemSpec::item("home", "Home", ()).with_href("/"),
            ItemSpec::item("note", "Note", ()),
        ])
        .unwrap(),
    );
    let m = SelectionManager::new(
        Arc::clone(&links),
        SelectionConfig::new(SelectionMode::Multiple).with_link_behavior(LinkBehavior::Override),
    );
    assert!(m.is_link(&"home"));
    assert!(!m.can_select_item(&"home"));
    assert!(m.can_select_item(&"note"));

    let m = SelectionManager::new(links, SelectionConfig::new(SelectionMode::Multiple));
    assert!(m.can_select_item(&"home"));
}

#[test]
fn sections_are_not_selectable() {
    let menu = Arc::new(
        Collection::from_items([ItemSpec::section("s", "Section")
            .with_child(ItemSpec::item("x", "X", ()))
            .with_child(ItemSpec::item("y", "Y", ()))])
        .unwrap(),
    );
    let mut m = SelectionManager::new(menu, SelectionConfig::new(SelectionMode::Multiple));
    m.toggle_selection("s");
    assert!(m.is_empty());
    m.replace_selection("x");
    m.extend_selection("y");
    assert_eq!(sorted(m.selected_keys()), ["x", "y"]);
}

#[test]
fn toggle_behavior_reverts_to_replace_when_emptied() {
    let mut m = SelectionManager::new(
        abc(),
        SelectionConfig::new(SelectionMode::Multiple).with_behavior(SelectionBehavior::Replace),
    );
    m.set_selection_behavior(SelectionBehavior::Toggle);
    m.toggle_selection("Apple");
    assert_eq!(m.selection_behavior(), SelectionBehavior::Toggle);
    m.toggle_selection("Apple");
    assert_eq!(m.selection_behavior(), SelectionBehavior::Replace);
}

#[test]
fn default_selection_is_sanitized_silently() {
    let (m, log) = recorder(
        manager(SelectionMode::Single)
            .with_default_selection(Selection::Keys(KeySet::from_keys(["Banana", "Apple"]))),
    );
    assert_eq!(sorted(m.selected_keys()), ["Banana"]);
    assert!(log.borrow().is_empty());
}

#[test]
fn selection_equality_resolves_all() {
    let mut m = manager(SelectionMode::Multiple);
    m.set_selected_keys(["Apple", "Banana", "Cherry"]);
    assert!(m.is_selection_equal(&Selection::All));
    assert!(!m.is_selection_equal(&Selection::empty()));
}

#[cfg(feature = "serde")]
#[test]
fn config_deserializes_with_defaults() {
    let config: SelectionConfig<String> =
        serde_json::from_str(r#"{ "mode": "Multiple", "disabled_keys": ["a"] }"#).unwrap();
    assert_eq!(config.mode, SelectionMode::Multiple);
    assert_eq!(config.behavior, SelectionBehavior::Toggle);
    assert_eq!(config.disabled_keys, ["a".to_string()]);
}
