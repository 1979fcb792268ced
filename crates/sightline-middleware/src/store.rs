//! Process-wide canonical-state store with publish/subscribe fan-out.
//!
//! A [`StateStore`] owns the single live
//! [`CanonicalState`][sightline_types::CanonicalState] and an ordered list of
//! subscriber callbacks. It is an explicit object, constructed once and
//! injected into producers (the transport listener, simulator, gateway
//! poller) and consumers (display, announcer, guidance) alike - never a
//! hidden module-level singleton.
//!
//! # Delivery contract
//!
//! - `publish` replaces the current state atomically, then invokes every
//!   subscriber registered at call time, in registration order, on the
//!   publishing thread.
//! - Delivery iterates a snapshot of the subscriber list taken when the
//!   publish starts: a callback that subscribes or unsubscribes mid-delivery
//!   affects only future publishes, and a subscriber that removes itself
//!   still receives the in-flight notification.
//! - A panicking subscriber is isolated and logged; the remaining
//!   subscribers still receive the state.
//! - Publishes are serialized: each accepted reading yields exactly one
//!   state replacement and one fan-out, in arrival order, never coalesced.
//!   Callbacks therefore must not call [`StateStore::publish`] themselves.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, PoisonError};

use sightline_types::CanonicalState;
use tracing::error;
use uuid::Uuid;

type Callback = Arc<dyn Fn(&CanonicalState) + Send + Sync>;

/// Identity of one subscription, returned by [`StateStore::subscribe`] and
/// consumed by [`StateStore::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

struct Registration {
    id: SubscriberId,
    callback: Callback,
}

/// The single source of truth for derived sensor state.
pub struct StateStore {
    current: Mutex<CanonicalState>,
    subscribers: Mutex<Vec<Registration>>,
    publish_gate: Mutex<()>,
}

impl StateStore {
    /// Create a store holding the waiting defaults; `current()` is never
    /// null after this.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(CanonicalState::default()),
            subscribers: Mutex::new(Vec::new()),
            publish_gate: Mutex::new(()),
        }
    }

    /// The live canonical state.
    pub fn current(&self) -> CanonicalState {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register `callback` for every future publish. Callbacks run
    /// synchronously on the publishing thread and should return quickly.
    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(&CanonicalState) + Send + Sync + 'static,
    {
        let id = SubscriberId(Uuid::new_v4());
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration {
                id,
                callback: Arc::new(callback),
            });
        id
    }

    /// Remove the subscription with the given identity. Takes effect for all
    /// future publishes; a fan-out already in progress still completes
    /// delivery to the snapshot it captured. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|r| r.id != id);
    }

    /// Replace the canonical state and fan it out to all current
    /// subscribers.
    pub fn publish(&self, next: CanonicalState) {
        // One publish at a time: readings are delivered in strict arrival
        // order and never coalesced.
        let _ordering = self
            .publish_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            *current = next.clone();
        }

        // Snapshot before iterating; the subscriber lock is not held during
        // delivery so callbacks may subscribe/unsubscribe freely.
        let snapshot: Vec<(SubscriberId, Callback)> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|r| (r.id, Arc::clone(&r.callback)))
            .collect();

        for (id, callback) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| callback(&next))).is_err() {
                error!(subscriber = %id.0, "subscriber panicked during state fan-out");
            }
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
