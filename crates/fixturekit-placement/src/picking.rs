//! Pointer rays and what they hit.

use glam::DVec3;

use fixturekit_core::constants::GROUND_LEVEL;

const PARALLEL_EPSILON: f64 = 1e-9;

/// World-space ray from the camera through a pointer location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit direction
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Horizontal plane `y = height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub height: f64,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            height: GROUND_LEVEL,
        }
    }
}

impl GroundPlane {
    pub fn new(height: f64) -> Self {
        Self { height }
    }

    /// Where `ray` meets the plane
    ///
    /// `None` when the ray runs parallel to the plane or points away from it.
    pub fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        let denom = ray.direction.y;
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.height - ray.origin.y) / denom;
        if !t.is_finite() || t < 0.0 {
            return None;
        }
        let mut hit = ray.at(t);
        hit.y = self.height;
        Some(hit)
    }
}

/// Slab test of `ray` against an axis-aligned box
///
/// Returns the entry distance, or the exit distance when the origin is
/// inside the box.
pub fn ray_hits_box(ray: &Ray, center: DVec3, half_extents: DVec3) -> Option<f64> {
    let min = center - half_extents;
    let max = center + half_extents;

    let mut t_near = f64::NEG_INFINITY;
    let mut t_far = f64::INFINITY;

    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.direction[axis];
        if d.abs() < PARALLEL_EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        t_near = t_near.max(t1.min(t2));
        t_far = t_far.min(t1.max(t2));
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        None
    } else if t_near >= 0.0 {
        Some(t_near)
    } else {
        Some(t_far)
    }
}
