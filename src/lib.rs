//! # FixtureKit
//!
//! Placement engine for positioning a tool on a bounded rectangular
//! workspace:
//! - Quantized footprints and inclusive safe-zone containment
//! - Reject or clamp policy for out-of-bounds candidates
//! - Pointer drag with ray/ground-plane picking and exclusive capture
//! - Keyboard nudge, quarter-turn rotation and preset switching
//! - A single validity recompute shared by explicit operations and the
//!   per-frame watcher, with observers notified through an event bus
//!
//! ## Architecture
//!
//! 1. **fixturekit-core** - Data model, errors, presets, event bus
//! 2. **fixturekit-placement** - Footprint, validator, drag, controller, camera
//! 3. **fixturekit-settings** - JSON/TOML configuration
//! 4. **fixturekit** - Logging setup and the headless console host

pub mod console;

pub use fixturekit_core::{
    init_standard_presets, ConfigError, EventBus, EventCategory, EventFilter, FootprintSize,
    MeasurementSystem, PlacementEvent, Position3D, PresetCatalog, ToolPreset, ToolShape,
    ValidationMode, WorkspaceGeometry,
};

pub use fixturekit_placement::{
    FocusTarget, Key, KeyBindings, KeyCommand, OrbitCamera, PlacementController,
    PlacementStatus, PointerId, SafeZoneValidator,
};

pub use fixturekit_settings::{Config, SettingsError};

pub use console::{Command, ConsoleSession, Flow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log filter for a `RUST_LOG`-style directive string
///
/// Falls back to `info` when `directives` is empty. Directives that fail to
/// parse are skipped.
pub fn log_filter(directives: &str) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::EnvFilter;

    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, keeping stdout for the console host
/// - RUST_LOG environment variable support, `info` when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(log_filter(&directives))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
