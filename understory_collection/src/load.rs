// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asynchronous loading with explicit cancellation.
//!
//! Loading is modeled as a producer that, on completion, swaps in a whole new
//! [`Collection`]. [`CollectionLoader`] hands out a [`LoadTicket`] and an
//! [`AbortSignal`] for every request. Starting a new request aborts the one in
//! flight. A completion is published only when its ticket is still the
//! current one, so a partial or superseded collection is never observed.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_collection::{Collection, ItemSpec};
//! use understory_collection::load::{CollectionLoader, LoadKind, LoadOutcome};
//!
//! let mut loader = CollectionLoader::<u32, ()>::new(Default::default());
//!
//! let (first, first_signal) = loader.begin(LoadKind::Initial);
//! // A second request supersedes the first one.
//! let (second, _) = loader.begin(LoadKind::Initial);
//! assert!(first_signal.is_aborted());
//!
//! let late: Result<_, ()> = Collection::from_items([ItemSpec::item(1, "stale", ())])
//!     .map_err(|_| ());
//! assert!(matches!(loader.complete(first, late), LoadOutcome::Aborted));
//!
//! let fresh: Result<_, ()> = Collection::from_items([ItemSpec::item(2, "fresh", ())])
//!     .map_err(|_| ());
//! match loader.complete(second, fresh) {
//!     LoadOutcome::Published(collection) => assert!(collection.contains_key(&2)),
//!     _ => unreachable!(),
//! }
//! ```

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::collection::Collection;

/// Read side of a cancellation flag, handed to the code performing a load.
#[derive(Clone, Debug, Default)]
pub struct AbortSignal {
    aborted: Arc<AtomicBool>,
}

impl AbortSignal {
    /// Returns `true` once the owning request has been aborted.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}

/// Write side of a cancellation flag.
#[derive(Debug, Default)]
pub struct AbortController {
    signal: AbortSignal,
}

impl AbortController {
    /// Creates a controller whose signal is not aborted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a signal observing this controller.
    #[must_use]
    pub fn signal(&self) -> AbortSignal {
        self.signal.clone()
    }

    /// Aborts the request. Idempotent.
    pub fn abort(&self) {
        self.signal.aborted.store(true, Ordering::Release);
    }
}

/// Identifies one load request issued by a [`CollectionLoader`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// What a load request is for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoadKind {
    /// First load, or a full reload.
    Initial,
    /// Another page appended to the current items.
    More,
    /// A reload caused by a changed filter text.
    Filter,
}

/// Lifecycle state of a [`CollectionLoader`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// No request in flight.
    #[default]
    Idle,
    /// An [`LoadKind::Initial`] request is in flight.
    Loading,
    /// A [`LoadKind::More`] request is in flight.
    LoadingMore,
    /// A [`LoadKind::Filter`] request is in flight.
    Filtering,
    /// The last completed request failed.
    Error,
}

/// Result of completing a load request.
#[derive(Debug)]
pub enum LoadOutcome<K, T, E> {
    /// The new collection is now current.
    Published(Arc<Collection<K, T>>),
    /// The request was aborted or superseded; nothing changed.
    Aborted,
    /// The producer failed; the current collection is unchanged.
    Failed(E),
}

/// Owns the currently published collection and the in-flight request.
#[derive(Debug)]
pub struct CollectionLoader<K, T> {
    current: Arc<Collection<K, T>>,
    in_flight: Option<(LoadTicket, AbortController)>,
    next_ticket: u64,
    state: LoadState,
}

impl<K, T> CollectionLoader<K, T> {
    /// Creates a loader publishing `initial`.
    #[must_use]
    pub fn new(initial: Arc<Collection<K, T>>) -> Self {
        Self {
            current: initial,
            in_flight: None,
            next_ticket: 0,
            state: LoadState::Idle,
        }
    }

    /// The currently published collection.
    #[must_use]
    pub fn collection(&self) -> &Arc<Collection<K, T>> {
        &self.current
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a request, aborting any request already in flight.
    ///
    /// The returned signal should be passed to the producer so it can stop
    /// early; the ticket is handed back to [`CollectionLoader::complete`].
    pub fn begin(&mut self, kind: LoadKind) -> (LoadTicket, AbortSignal) {
        if let Some((ticket, controller)) = self.in_flight.take() {
            log::debug!("load {ticket:?} superseded by a new {kind:?} request");
            controller.abort();
        }

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        let controller = AbortController::new();
        let signal = controller.signal();
        self.in_flight = Some((ticket, controller));
        self.state = match kind {
            LoadKind::Initial => LoadState::Loading,
            LoadKind::More => LoadState::LoadingMore,
            LoadKind::Filter => LoadState::Filtering,
        };
        (ticket, signal)
    }

    /// Aborts the in-flight request, if any.
    pub fn abort(&mut self) {
        if let Some((ticket, controller)) = self.in_flight.take() {
            log::debug!("load {ticket:?} aborted");
            controller.abort();
            self.state = LoadState::Idle;
        }
    }

    /// Completes the request identified by `ticket`.
    ///
    /// Only the current, unaborted request can publish. A failure leaves the
    /// published collection untouched.
    pub fn complete<E>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Collection<K, T>, E>,
    ) -> LoadOutcome<K, T, E> {
        match &self.in_flight {
            Some((current, controller))
                if *current == ticket && !controller.signal().is_aborted() => {}
            _ => {
                log::debug!("dropping result of aborted load {ticket:?}");
                return LoadOutcome::Aborted;
            }
        }
        self.in_flight = None;

        match result {
            Ok(collection) => {
                self.current = Arc::new(collection);
                self.state = LoadState::Idle;
                LoadOutcome::Published(Arc::clone(&self.current))
            }
            Err(err) => {
                log::debug!("load {ticket:?} failed");
                self.state = LoadState::Error;
                LoadOutcome::Failed(err)
            }
        }
    }
}
