//! Safe-zone containment and clamping.
//!
//! A placement is valid when the tool's footprint AABB lies inside the safe
//! zone, boundaries inclusive. Clamping pulls the center back so the
//! footprint fits; when the footprint is larger than the safe zone on an
//! axis the center collapses to that axis' midpoint and the result stays
//! invalid.

use fixturekit_core::{FootprintSize, Position3D, SafeZoneBounds, WorkspaceGeometry};

use crate::footprint::{compute_footprint, Footprint};

/// Containment test and clamp against one workspace's safe zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeZoneValidator {
    bounds: SafeZoneBounds,
}

impl SafeZoneValidator {
    /// Create a validator for `workspace`
    pub fn new(workspace: &WorkspaceGeometry) -> Self {
        Self {
            bounds: workspace.safe_zone_bounds(),
        }
    }

    /// The safe-zone rectangle this validator checks against
    pub fn bounds(&self) -> SafeZoneBounds {
        self.bounds
    }

    /// True iff the footprint at `position` lies fully inside the safe zone
    ///
    /// Touching an edge exactly is valid. `position.y` is ignored.
    pub fn is_within_safe_zone(
        &self,
        position: &Position3D,
        size: &FootprintSize,
        rotation_y: f64,
    ) -> bool {
        let Footprint { half_w, half_d } = compute_footprint(size, rotation_y);
        let b = &self.bounds;

        position.x - half_w >= b.min_x
            && position.x + half_w <= b.max_x
            && position.z - half_d >= b.min_z
            && position.z + half_d <= b.max_z
    }

    /// Nearest center that keeps the footprint inside the safe zone
    ///
    /// `y` passes through unchanged. Idempotent. Does not guarantee validity
    /// when the footprint is larger than the safe zone.
    pub fn clamp_to_safe_zone(
        &self,
        position: &Position3D,
        size: &FootprintSize,
        rotation_y: f64,
    ) -> Position3D {
        let Footprint { half_w, half_d } = compute_footprint(size, rotation_y);
        let b = &self.bounds;

        let x = clamp_axis(position.x, b.min_x + half_w, b.max_x - half_w);
        let z = clamp_axis(position.z, b.min_z + half_d, b.max_z - half_d);
        position.with_xz(x, z)
    }

    /// Whether the footprint can fit anywhere in the safe zone
    pub fn footprint_fits(&self, size: &FootprintSize, rotation_y: f64) -> bool {
        let fp = compute_footprint(size, rotation_y);
        fp.width() <= self.bounds.width() && fp.depth() <= self.bounds.depth()
    }
}

fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    if lo > hi {
        return (lo + hi) / 2.0;
    }
    // f64::clamp keeps NaN; the containment test reports that as invalid
    value.clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn validator() -> SafeZoneValidator {
        SafeZoneValidator::new(&WorkspaceGeometry::default())
    }

    fn tool() -> FootprintSize {
        FootprintSize::new(120.0, 60.0, 40.0)
    }

    #[test]
    fn test_well_inside() {
        let p = Position3D::new(600.0, 20.0, 300.0);
        assert!(validator().is_within_safe_zone(&p, &tool(), 0.0));
    }

    #[test]
    fn test_past_right_edge() {
        let p = Position3D::new(1195.0, 20.0, 300.0);
        assert!(!validator().is_within_safe_zone(&p, &tool(), 0.0));
    }

    #[test]
    fn test_rotation_alone_flips_validity() {
        let p = Position3D::new(1150.0, 20.0, 300.0);
        assert!(!validator().is_within_safe_zone(&p, &tool(), 0.0));
        assert!(validator().is_within_safe_zone(&p, &tool(), FRAC_PI_2));
    }

    #[test]
    fn test_touching_edges_is_valid() {
        let v = validator();
        assert!(v.is_within_safe_zone(&Position3D::new(70.0, 20.0, 40.0), &tool(), 0.0));
        assert!(v.is_within_safe_zone(&Position3D::new(1130.0, 20.0, 560.0), &tool(), 0.0));
        assert!(!v.is_within_safe_zone(&Position3D::new(69.999, 20.0, 40.0), &tool(), 0.0));
    }

    #[test]
    fn test_height_is_ignored() {
        let p = Position3D::new(600.0, -500.0, 300.0);
        assert!(validator().is_within_safe_zone(&p, &tool(), 0.0));
    }

    #[test]
    fn test_clamp_far_candidate() {
        let c = validator().clamp_to_safe_zone(&Position3D::new(2000.0, 20.0, 300.0), &tool(), 0.0);
        assert_eq!(c, Position3D::new(1130.0, 20.0, 300.0));

        let c = validator().clamp_to_safe_zone(&Position3D::new(-50.0, 20.0, -50.0), &tool(), 0.0);
        assert_eq!(c, Position3D::new(70.0, 20.0, 40.0));
    }

    #[test]
    fn test_clamp_leaves_valid_position_alone() {
        let p = Position3D::new(321.5, 20.0, 123.25);
        assert_eq!(validator().clamp_to_safe_zone(&p, &tool(), 0.0), p);
    }

    #[test]
    fn test_clamp_uses_rotated_footprint() {
        let c = validator().clamp_to_safe_zone(
            &Position3D::new(2000.0, 20.0, 2000.0),
            &tool(),
            FRAC_PI_2,
        );
        assert_eq!(c, Position3D::new(1160.0, 20.0, 530.0));
    }

    #[test]
    fn test_oversized_footprint_collapses_to_midpoint() {
        let ws = WorkspaceGeometry::new(200.0, 600.0, 10.0).unwrap();
        let v = SafeZoneValidator::new(&ws);
        let wide = FootprintSize::new(300.0, 60.0, 40.0);

        assert!(!v.footprint_fits(&wide, 0.0));
        let c = v.clamp_to_safe_zone(&Position3D::new(5.0, 150.0, 300.0), &wide, 0.0);
        assert_eq!(c.x, 100.0);
        assert_eq!(c.z, 300.0);
        assert_eq!(c.y, 150.0);
        assert!(!v.is_within_safe_zone(&c, &wide, 0.0));
        assert_eq!(v.clamp_to_safe_zone(&c, &wide, 0.0), c);

        // Rotated it fits within the 580 mm depth
        assert!(v.footprint_fits(&FootprintSize::new(300.0, 60.0, 40.0), FRAC_PI_2));
    }

    #[test]
    fn test_nan_position_is_invalid() {
        let p = Position3D::new(f64::NAN, 20.0, 300.0);
        assert!(!validator().is_within_safe_zone(&p, &tool(), 0.0));
    }
}
