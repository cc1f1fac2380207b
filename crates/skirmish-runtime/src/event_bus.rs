//! Publish/subscribe event bus between the simulation and the overlay

use crate::event::{EventKind, GameEvent};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct ListenerId(u64);

/// Fire-and-forget event channel.
///
/// Listeners run synchronously in subscription order. A panicking listener is
/// caught and logged; the remaining listeners and the publisher carry on.
pub struct EventBus {
    listeners: BTreeMap<EventKind, Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Register a listener for one kind of event
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let mut removed = false;
        for bucket in self.listeners.values_mut() {
            let before = bucket.len();
            bucket.retain(|(lid, _)| *lid != id);
            removed |= bucket.len() != before;
        }
        self.listeners.retain(|_, bucket| !bucket.is_empty());
        removed
    }

    /// Deliver an event to every listener of its kind.
    /// Returns how many listeners completed without panicking.
    pub fn publish(&mut self, event: GameEvent) -> usize {
        let kind = event.kind();
        let Some(bucket) = self.listeners.get_mut(&kind) else {
            return 0;
        };

        let mut delivered = 0;
        for (id, listener) in bucket.iter_mut() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(&event))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    let reason = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    log::error!("[event bus] listener {:?} for '{}' failed: {}", id, kind, reason);
                }
            }
        }
        delivered
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
