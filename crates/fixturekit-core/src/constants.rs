//! Shared constants for FixtureKit.
//!
//! All lengths are millimeters, all angles radians.

use std::f64::consts::{FRAC_PI_2, PI};

/// Default workspace width (X extent) in mm
pub const WORKSPACE_WIDTH: f64 = 1200.0;

/// Default workspace depth (Z extent) in mm
pub const WORKSPACE_DEPTH: f64 = 600.0;

/// Default safe zone inset from every workspace edge in mm
pub const SAFE_ZONE_MARGIN: f64 = 10.0;

/// Height of the ground plane the tool rests on
pub const GROUND_LEVEL: f64 = 0.0;

/// Arrow-key nudge step in mm
pub const NUDGE_STEP: f64 = 10.0;

/// Quarter turn (90°)
pub const QUARTER_TURN: f64 = FRAC_PI_2;

/// Full turn (360°)
pub const TAU: f64 = 2.0 * PI;

/// Preset selected when nothing else is configured
pub const DEFAULT_PRESET_ID: &str = "box-default";

/// Minimum camera azimuth change (radians) worth reporting to observers
pub const AZIMUTH_REPORT_THRESHOLD: f64 = 0.02;

/// Default camera eye position
pub const CAMERA_POSITION: [f64; 3] = [800.0, 600.0, 800.0];

/// Default vertical field of view in degrees
pub const CAMERA_FOV_DEGREES: f64 = 45.0;

/// Orbit polar angle limits (radians from straight up)
pub const ORBIT_MIN_POLAR_ANGLE: f64 = 0.15;
/// Upper polar limit lets the camera dip slightly below the horizon
pub const ORBIT_MAX_POLAR_ANGLE: f64 = FRAC_PI_2 + 0.4;
