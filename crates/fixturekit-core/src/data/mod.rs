//! Data models for the placement workspace
//!
//! This module provides:
//! - Workspace extents and the derived safe-zone rectangle
//! - Tool footprint sizes and live positions
//! - The global validation policy (reject or clamp)
//! - Tool presets and the standard preset catalog
//!
//! Coordinates are right-handed, Y-up, in millimeters. The tool moves on the
//! XZ plane and only ever rotates about Y.

pub mod presets;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{SAFE_ZONE_MARGIN, WORKSPACE_DEPTH, WORKSPACE_WIDTH};
use crate::error::ConfigError;

pub use presets::{init_standard_presets, PresetCatalog, PresetId, ToolPreset, ToolShape};

/// Live center of the tool in workspace coordinates (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    /// X-axis position (workspace width direction)
    pub x: f64,
    /// Y-axis position (height above the plane)
    pub y: f64,
    /// Z-axis position (workspace depth direction)
    pub z: f64,
}

impl Position3D {
    /// Create a new position
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Copy of this position with new X and Z, keeping Y
    pub fn with_xz(&self, x: f64, z: f64) -> Self {
        Self { x, z, ..*self }
    }

    /// Copy of this position moved by a horizontal delta
    pub fn offset(&self, dx: f64, dz: f64) -> Self {
        self.with_xz(self.x + dx, self.z + dz)
    }
}

impl fmt::Display for Position3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Nominal tool dimensions in mm
///
/// For cylindrical tools `w == d` is the diameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintSize {
    /// Width along X at zero rotation
    pub w: f64,
    /// Depth along Z at zero rotation
    pub d: f64,
    /// Height along Y
    pub h: f64,
}

impl FootprintSize {
    /// Create a new size
    pub fn new(w: f64, d: f64, h: f64) -> Self {
        Self { w, d, h }
    }

    /// True when every dimension is a positive finite number
    pub fn is_positive(&self) -> bool {
        [self.w, self.d, self.h]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

impl fmt::Display for FootprintSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {} mm", self.w, self.d, self.h)
    }
}

/// The valid placement rectangle on the XZ plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafeZoneBounds {
    /// Minimum X (inclusive)
    pub min_x: f64,
    /// Maximum X (inclusive)
    pub max_x: f64,
    /// Minimum Z (inclusive)
    pub min_z: f64,
    /// Maximum Z (inclusive)
    pub max_z: f64,
}

impl SafeZoneBounds {
    /// Extent along X
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Z
    pub fn depth(&self) -> f64 {
        self.max_z - self.min_z
    }
}

/// Placement policy for out-of-bounds candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Leave the candidate as-is and flag it invalid
    #[default]
    Reject,
    /// Pull the candidate back inside the safe zone
    Clamp,
}

impl ValidationMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Self::Reject => Self::Clamp,
            Self::Clamp => Self::Reject,
        }
    }

    /// Whether candidates are clamped
    pub fn clamps(self) -> bool {
        self == Self::Clamp
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Clamp => write!(f, "clamp"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            _ => Err(format!("Unknown validation mode: {}", s)),
        }
    }
}

/// Workspace extents plus safe-zone margin
///
/// Immutable once built. The constructor enforces `width, depth > 2 * margin`
/// so the derived safe zone always has positive area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkspaceGeometry {
    width: f64,
    depth: f64,
    margin: f64,
}

impl WorkspaceGeometry {
    /// Build a validated workspace
    pub fn new(width: f64, depth: f64, margin: f64) -> Result<Self, ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(depth) {
            return Err(ConfigError::InvalidWorkspace { width, depth });
        }
        if !positive(margin) || width <= 2.0 * margin || depth <= 2.0 * margin {
            return Err(ConfigError::InvalidMargin {
                margin,
                width,
                depth,
            });
        }
        Ok(Self {
            width,
            depth,
            margin,
        })
    }

    /// Workspace width (X extent) in mm
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Workspace depth (Z extent) in mm
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Safe-zone inset in mm
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// The inset rectangle in which the footprint must stay
    pub fn safe_zone_bounds(&self) -> SafeZoneBounds {
        SafeZoneBounds {
            min_x: self.margin,
            max_x: self.width - self.margin,
            min_z: self.margin,
            max_z: self.depth - self.margin,
        }
    }

    /// Workspace center on the XZ plane as `(x, z)`
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.depth / 2.0)
    }
}

impl Default for WorkspaceGeometry {
    fn default() -> Self {
        Self {
            width: WORKSPACE_WIDTH,
            depth: WORKSPACE_DEPTH,
            margin: SAFE_ZONE_MARGIN,
        }
    }
}
