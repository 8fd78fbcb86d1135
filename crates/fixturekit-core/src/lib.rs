//! # FixtureKit Core
//!
//! Core types, errors, and utilities for FixtureKit.
//! Provides the workspace and tool data model, the configuration error
//! taxonomy, the standard tool preset catalog, and the event bus through
//! which placement observers are notified.

pub mod constants;
pub mod data;
pub mod error;
pub mod event_bus;
pub mod units;

pub use data::{
    init_standard_presets, FootprintSize, Position3D, PresetCatalog, PresetId, SafeZoneBounds,
    ToolPreset, ToolShape, ValidationMode, WorkspaceGeometry,
};

pub use error::ConfigError;

// Re-export event bus for convenience
pub use event_bus::{EventBus, EventCategory, EventFilter, PlacementEvent, SubscriptionId};

pub use units::{format_length, MeasurementSystem};
