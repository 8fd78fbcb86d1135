//! FixtureKit Settings Crate
//!
//! Load-time configuration: workspace extents, placement policy and the tool
//! preset list, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, MeasurementSystem, PlacementSettings, WorkspaceSettings};
pub use error::{SettingsError, SettingsResult};
