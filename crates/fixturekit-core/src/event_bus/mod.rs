//! # Event Bus Module
//!
//! Observer surface of the placement engine.
//!
//! ## Overview
//!
//! - The placement controller publishes typed events after each accepted mutation
//! - Subscribers filter by category and receive events synchronously
//! - An optional fixed-capacity log keeps recent events for replay
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fixturekit_core::event_bus::{EventBus, EventCategory, EventFilter, PlacementEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Validity]),
//!     |event| {
//!         if let PlacementEvent::ValidityChanged(valid) = event {
//!             tracing::info!("placement valid: {}", valid);
//!         }
//!     },
//! );
//!
//! bus.publish(PlacementEvent::ValidityChanged(false));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
