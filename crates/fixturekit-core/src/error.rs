//! Error handling for FixtureKit
//!
//! Only load-time configuration can fail. Geometry and interaction never
//! return errors: out-of-range positions and rotations are normalized or
//! reported through the validity flag instead.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Configuration error type
///
/// Raised while building the workspace or the preset catalog, before any
/// interaction is possible. These are fatal for the host.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Workspace extents are not positive finite numbers
    #[error("Invalid workspace dimensions {width} x {depth}: both must be positive")]
    InvalidWorkspace {
        /// Requested width in mm.
        width: f64,
        /// Requested depth in mm.
        depth: f64,
    },

    /// Margin is non-positive or leaves no safe zone
    #[error("Invalid safe zone margin {margin} for workspace {width} x {depth}")]
    InvalidMargin {
        /// Requested margin in mm.
        margin: f64,
        /// Workspace width in mm.
        width: f64,
        /// Workspace depth in mm.
        depth: f64,
    },

    /// A preset dimension is not a positive finite number
    #[error("Preset '{id}' has invalid size {w} x {d} x {h}: all dimensions must be positive")]
    InvalidPresetSize {
        /// The preset identifier.
        id: String,
        /// Width in mm.
        w: f64,
        /// Depth in mm.
        d: f64,
        /// Height in mm.
        h: f64,
    },

    /// Two presets share an identifier
    #[error("Duplicate preset id '{id}'")]
    DuplicatePresetId {
        /// The repeated identifier.
        id: String,
    },

    /// A preset identifier could not be resolved
    #[error("Unknown preset '{id}'")]
    UnknownPreset {
        /// The identifier that was requested.
        id: String,
    },

    /// No presets configured at all
    #[error("Preset catalog is empty")]
    EmptyCatalog,

    /// Any other out-of-range setting
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// Dotted setting key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}
