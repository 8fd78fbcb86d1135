//! Orbit camera and heading reports.
//!
//! The camera orbits a target on the ground and turns viewport pixels into
//! world rays for picking. [`AzimuthTracker`] decides when a heading change
//! is large enough to tell observers about.

use glam::{DMat4, DVec3};

use fixturekit_core::constants::{
    AZIMUTH_REPORT_THRESHOLD, CAMERA_FOV_DEGREES, CAMERA_POSITION, ORBIT_MAX_POLAR_ANGLE,
    ORBIT_MIN_POLAR_ANGLE, TAU,
};
use fixturekit_core::WorkspaceGeometry;

use crate::picking::Ray;

/// Orbit camera around a target on a Y-up scene
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: DVec3,
    pub distance: f64,
    pub azimuth: f64, // radians around Y, 0 looks from +Z
    pub polar: f64,   // radians from +Y
    pub fov: f64,     // degrees
    pub aspect_ratio: f64,
    pub near: f64,
    pub far: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar: f64,
    pub max_polar: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::for_workspace(&WorkspaceGeometry::default())
    }
}

impl OrbitCamera {
    /// Default eye looking at the center of `workspace` on the ground
    pub fn for_workspace(workspace: &WorkspaceGeometry) -> Self {
        let (x, z) = workspace.center();
        Self::from_eye(DVec3::from_array(CAMERA_POSITION), DVec3::new(x, 0.0, z))
    }

    /// Camera at `eye` looking at `target`
    pub fn from_eye(eye: DVec3, target: DVec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let polar = if distance > 0.0 {
            (offset.y / distance).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let mut camera = Self {
            target,
            distance,
            azimuth: offset.x.atan2(offset.z),
            polar,
            fov: CAMERA_FOV_DEGREES,
            aspect_ratio: 16.0 / 9.0,
            near: 1.0,
            far: 20_000.0,
            min_distance: 50.0,
            max_distance: 10_000.0,
            min_polar: ORBIT_MIN_POLAR_ANGLE,
            max_polar: ORBIT_MAX_POLAR_ANGLE,
        };
        camera.polar = camera.polar.clamp(camera.min_polar, camera.max_polar);
        camera.distance = camera.distance.clamp(camera.min_distance, camera.max_distance);
        camera
    }

    pub fn update_aspect_ratio(&mut self, width: f64, height: f64) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn orbit(&mut self, delta_azimuth: f64, delta_polar: f64) {
        self.azimuth = (self.azimuth + delta_azimuth) % TAU;
        self.polar = (self.polar + delta_polar).clamp(self.min_polar, self.max_polar);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.distance = (self.distance - delta).clamp(self.min_distance, self.max_distance);
    }

    pub fn eye_position(&self) -> DVec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let offset = DVec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az) * self.distance;
        self.target + offset
    }

    /// Heading of the eye around the target, `atan2(dx, dz)`
    pub fn view_azimuth(&self) -> f64 {
        let d = self.eye_position() - self.target;
        d.x.atan2(d.z)
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye_position(), self.target, DVec3::Y)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Convert a pixel inside a `width` x `height` viewport to NDC
    pub fn ndc_from_pixel(px: f64, py: f64, width: f64, height: f64) -> (f64, f64) {
        let x = px / width * 2.0 - 1.0;
        let y = -(py / height * 2.0 - 1.0);
        (x, y)
    }

    /// World ray from the eye through an NDC point
    pub fn ray_from_ndc(&self, ndc_x: f64, ndc_y: f64) -> Ray {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let far_point = inverse.project_point3(DVec3::new(ndc_x, ndc_y, 1.0));
        let eye = self.eye_position();
        Ray::new(eye, far_point - eye)
    }

    /// World ray through a viewport pixel
    pub fn ray_from_pixel(&self, px: f64, py: f64, width: f64, height: f64) -> Ray {
        let (x, y) = Self::ndc_from_pixel(px, py, width, height);
        self.ray_from_ndc(x, y)
    }
}

/// Reports camera heading changes larger than a threshold
#[derive(Debug, Clone)]
pub struct AzimuthTracker {
    last_reported: Option<f64>,
    threshold: f64,
}

impl Default for AzimuthTracker {
    fn default() -> Self {
        Self::new(AZIMUTH_REPORT_THRESHOLD)
    }
}

impl AzimuthTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            last_reported: None,
            threshold,
        }
    }

    /// Feed the current heading; returns it when it should be reported
    ///
    /// The first observation always reports. Differences are measured the
    /// short way around the circle.
    pub fn observe(&mut self, azimuth: f64) -> Option<f64> {
        if !azimuth.is_finite() {
            return None;
        }
        let changed = match self.last_reported {
            None => true,
            Some(last) => angular_distance(azimuth, last) > self.threshold,
        };
        if changed {
            self.last_reported = Some(azimuth);
            Some(azimuth)
        } else {
            None
        }
    }

    pub fn last_reported(&self) -> Option<f64> {
        self.last_reported
    }
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(TAU);
    diff.min(TAU - diff)
}
