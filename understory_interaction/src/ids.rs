// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Instance-scoped identifier generation.

use alloc::format;
use alloc::string::String;

/// Generates unique string ids for relationships between a list and its parts.
///
/// Each context counts on its own, so two lists (or two test runs) never share
/// state. Ids have the form `{prefix}-{n}`.
///
/// ```
/// use understory_interaction::IdContext;
///
/// let mut ids = IdContext::new("listbox");
/// assert_eq!(ids.next_id(), "listbox-0");
/// assert_eq!(ids.next_id(), "listbox-1");
/// assert_eq!(ids.item_id("listbox-0", &"apple"), "listbox-0-apple");
/// ```
#[derive(Clone, Debug)]
pub struct IdContext {
    prefix: String,
    next: u64,
}

impl IdContext {
    /// Creates a context whose ids start with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// The prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns a fresh id.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }

    /// Derives the id of an item from its list's id and key.
    #[must_use]
    pub fn item_id(&self, list_id: &str, key: &impl core::fmt::Display) -> String {
        format!("{list_id}-{key}")
    }
}
