//! Event Bus implementation.
//!
//! Synchronous publish/subscribe used by the placement controller to
//! notify observers. Handlers run on the publishing thread in the same tick
//! as the mutation that caused the event.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

use super::events::{EventCategory, PlacementEvent};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &PlacementEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(PlacementEvent) + Send + Sync>;

/// Event bus for placement notifications
///
/// Optionally keeps the most recent events in a log of fixed capacity, in
/// publish order, so a host can replay what happened since it last looked.
///
/// Handlers must not subscribe or unsubscribe from inside a handler; the
/// handler table is read-locked for the duration of a publish.
pub struct EventBus {
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
    log: RwLock<VecDeque<PlacementEvent>>,
    log_capacity: usize,
}

impl EventBus {
    /// Create a bus without an event log
    pub fn new() -> Self {
        Self::with_history(0)
    }

    /// Create a bus that keeps the last `capacity` events
    ///
    /// A capacity of zero disables the log.
    pub fn with_history(capacity: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            log: RwLock::new(VecDeque::with_capacity(capacity)),
            log_capacity: capacity,
        }
    }

    /// Publish an event to all matching subscribers
    ///
    /// Returns the number of handlers that received the event.
    pub fn publish(&self, event: PlacementEvent) -> usize {
        tracing::trace!("Publishing {}", event.description());
        self.record(&event);

        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(event.clone());
                delivered += 1;
            }
        }
        delivered
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler is called on the publishing thread, so it should
    /// return quickly.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(PlacementEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Maximum number of logged events, zero when logging is off
    pub fn history_capacity(&self) -> usize {
        self.log_capacity
    }

    /// Logged events, oldest first
    pub fn history(&self) -> Vec<PlacementEvent> {
        self.log.read().iter().cloned().collect()
    }

    /// Remove and return the logged events, oldest first
    pub fn take_history(&self) -> Vec<PlacementEvent> {
        self.log.write().drain(..).collect()
    }

    fn record(&self, event: &PlacementEvent) {
        if self.log_capacity == 0 {
            return;
        }
        let mut log = self.log.write();
        if log.len() == self.log_capacity {
            log.pop_front();
        }
        log.push_back(event.clone());
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("history_capacity", &self.log_capacity)
            .finish()
    }
}
