//! Footprint of a tool on the ground plane.
//!
//! The footprint is the axis-aligned projection of the tool's nominal size at
//! the nearest quarter turn. Continuous rotation values are quantized, so only
//! the four cardinal orientations matter for safe-zone purposes while the
//! rendered rotation may still be animated.

use fixturekit_core::constants::{QUARTER_TURN, TAU};
use fixturekit_core::FootprintSize;
use serde::{Deserialize, Serialize};

/// Axis-aligned half-extents on the XZ plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Half extent along X
    pub half_w: f64,
    /// Half extent along Z
    pub half_d: f64,
}

impl Footprint {
    /// Footprint with X and Z exchanged
    pub fn swapped(&self) -> Self {
        Self {
            half_w: self.half_d,
            half_d: self.half_w,
        }
    }

    /// Full extent along X
    pub fn width(&self) -> f64 {
        self.half_w * 2.0
    }

    /// Full extent along Z
    pub fn depth(&self) -> f64 {
        self.half_d * 2.0
    }
}

/// Normalize an angle into `[0, 2π)`
///
/// Non-finite input has no meaningful orientation and maps to zero.
pub fn normalize_rotation(radians: f64) -> f64 {
    if !radians.is_finite() {
        return 0.0;
    }
    let norm = ((radians % TAU) + TAU) % TAU;
    // `x % TAU + TAU` can round up to exactly TAU for tiny negative x
    if norm >= TAU {
        0.0
    } else {
        norm
    }
}

/// Nearest quarter-turn index (0-3) for a rotation
///
/// Rounds half away from zero, so exactly 45° snaps to one quarter turn.
pub fn quarter_turns(radians: f64) -> u8 {
    ((normalize_rotation(radians) / QUARTER_TURN).round() as u8) % 4
}

/// Footprint half-extents for `size` at the quantized `rotation_y`
///
/// Even quarter turns keep `(w, d)`, odd ones swap them.
pub fn compute_footprint(size: &FootprintSize, rotation_y: f64) -> Footprint {
    let unrotated = Footprint {
        half_w: size.w / 2.0,
        half_d: size.d / 2.0,
    };
    if quarter_turns(rotation_y) % 2 == 0 {
        unrotated
    } else {
        unrotated.swapped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn tool() -> FootprintSize {
        FootprintSize::new(120.0, 60.0, 40.0)
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert!((normalize_rotation(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((normalize_rotation(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_rotation(TAU), 0.0);
        assert_eq!(normalize_rotation(-1e-20), 0.0);
        assert_eq!(normalize_rotation(f64::NAN), 0.0);
        assert_eq!(normalize_rotation(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_quarter_turns() {
        assert_eq!(quarter_turns(0.0), 0);
        assert_eq!(quarter_turns(FRAC_PI_2), 1);
        assert_eq!(quarter_turns(PI), 2);
        assert_eq!(quarter_turns(3.0 * FRAC_PI_2), 3);
        assert_eq!(quarter_turns(-FRAC_PI_2), 3);
        // Just below a full turn rounds up to 4, which wraps to 0
        assert_eq!(quarter_turns(TAU - 0.1), 0);
        assert_eq!(quarter_turns(FRAC_PI_4 - 0.01), 0);
        assert_eq!(quarter_turns(FRAC_PI_4 + 0.01), 1);
    }

    #[test]
    fn test_footprint_unrotated() {
        let fp = compute_footprint(&tool(), 0.0);
        assert_eq!(fp.half_w, 60.0);
        assert_eq!(fp.half_d, 30.0);
        assert_eq!(fp.width(), 120.0);
        assert_eq!(fp.depth(), 60.0);
    }

    #[test]
    fn test_footprint_quarter_turn_swaps() {
        let fp = compute_footprint(&tool(), FRAC_PI_2);
        assert_eq!(fp, compute_footprint(&tool(), 0.0).swapped());
        assert_eq!(compute_footprint(&tool(), PI), compute_footprint(&tool(), 0.0));
    }

    #[test]
    fn test_footprint_intermediate_angle_snaps() {
        // 30° is closer to 0° than 90°
        let fp = compute_footprint(&tool(), 30f64.to_radians());
        assert_eq!(fp.half_w, 60.0);
        // 60° is closer to 90°
        let fp = compute_footprint(&tool(), 60f64.to_radians());
        assert_eq!(fp.half_w, 30.0);
    }

    #[test]
    fn test_cylinder_is_rotation_invariant() {
        let cylinder = FootprintSize::new(80.0, 80.0, 45.0);
        assert_eq!(
            compute_footprint(&cylinder, 0.0),
            compute_footprint(&cylinder, FRAC_PI_2)
        );
    }
}
