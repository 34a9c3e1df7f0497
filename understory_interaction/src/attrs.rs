// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic merging of attribute maps.

use alloc::collections::BTreeMap;

/// Merges attribute maps in order; later maps win on conflicting keys.
///
/// The result is ordered by key, so two calls with the same inputs always
/// produce identical output.
///
/// ```
/// use std::collections::BTreeMap;
/// use understory_interaction::merge_attributes;
///
/// let base = BTreeMap::from([("role", "option"), ("id", "list-1")]);
/// let item = BTreeMap::from([("id", "list-1-apple")]);
/// let merged = merge_attributes([&base, &item]);
/// assert_eq!(merged["id"], "list-1-apple");
/// assert_eq!(merged["role"], "option");
/// ```
pub fn merge_attributes<'a, K, V, I>(layers: I) -> BTreeMap<K, V>
where
    K: Ord + Clone + 'a,
    V: Clone + 'a,
    I: IntoIterator<Item = &'a BTreeMap<K, V>>,
{
    let mut merged = BTreeMap::new();
    for layer in layers {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
