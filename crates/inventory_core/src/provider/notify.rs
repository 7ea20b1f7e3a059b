//! Change notification registry.
//!
//! # Responsibility
//! - Keep listener registrations keyed by locator.
//! - Deliver change events synchronously to every overlapping registration.
//!
//! # Invariants
//! - Events are delivered in registration order.
//! - The provider calls `notify` only after the write has committed.

use crate::contract::Locator;
use log::debug;
use std::sync::Arc;

/// Change emitted after a committed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Classified locator the write targeted.
    pub locator: Locator,
    /// Canonical locator string.
    pub uri: String,
}

/// Receiver of committed change events.
pub trait ChangeListener: Send + Sync {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: Fn(&ChangeEvent) + Send + Sync,
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}

/// Handle returned by registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatchId(u64);

struct Registration {
    id: WatchId,
    locator: Locator,
    listener: Arc<dyn ChangeListener>,
}

/// Locator-keyed listener registry.
#[derive(Default)]
pub struct ChangeNotifier {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for changes observed by `locator`.
    pub fn register(&mut self, locator: Locator, listener: Arc<dyn ChangeListener>) -> WatchId {
        self.next_id += 1;
        let id = WatchId(self.next_id);
        self.registrations.push(Registration {
            id,
            locator,
            listener,
        });
        id
    }

    /// Removes one registration. Returns `false` when `id` is unknown.
    pub fn unregister(&mut self, id: WatchId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|registration| registration.id != id);
        self.registrations.len() != before
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Delivers `event` to every registration observing its locator.
    ///
    /// Returns the number of listeners called.
    pub fn notify(&self, event: &ChangeEvent) -> usize {
        let mut delivered = 0;
        for registration in &self.registrations {
            if registration.locator.observes(event.locator) {
                registration.listener.on_change(event);
                delivered += 1;
            }
        }
        debug!(
            "event=change_notify module=provider status=ok uri={} listeners={}",
            event.uri, delivered
        );
        delivered
    }
}
