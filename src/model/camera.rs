use nalgebra::{Isometry3, Point3, Vector3};

use crate::consts::{
    DISTANCE_LIMITS, ELEVATION_LIMIT, INITIAL_AZIMUTH, INITIAL_DISTANCE, INITIAL_ELEVATION,
};
use crate::math::geometry::{spherical_to_cartesian, wrap_angle};

// The camera always sits on a sphere around the origin and looks at it, with y
// as up. It's parameterized by three numbers, and everything else is derived
// from them each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    azimuth: f64,
    elevation: f64,
    distance: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        OrbitCamera {
            azimuth: INITIAL_AZIMUTH,
            elevation: INITIAL_ELEVATION,
            distance: INITIAL_DISTANCE,
        }
    }
}

impl OrbitCamera {
    pub fn new(azimuth: f64, elevation: f64, distance: f64) -> Self {
        let mut camera = Self::default();
        camera.rotate(azimuth - camera.azimuth, 0.0);
        camera.rotate(0.0, elevation - camera.elevation);
        camera.set_distance(distance);
        camera
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn rotate(&mut self, dazimuth: f64, delevation: f64) {
        if !dazimuth.is_finite() || !delevation.is_finite() {
            log::warn!(
                "Ignoring non-finite camera rotation ({}, {})",
                dazimuth,
                delevation
            );
            return;
        }
        self.azimuth = wrap_angle(self.azimuth + dazimuth);
        self.elevation = nalgebra::clamp(
            self.elevation + delevation,
            -ELEVATION_LIMIT,
            ELEVATION_LIMIT,
        );
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.set_distance(self.distance + delta);
    }

    fn set_distance(&mut self, distance: f64) {
        if !distance.is_finite() {
            log::warn!("Ignoring non-finite camera distance {}", distance);
            return;
        }
        self.distance = nalgebra::clamp(distance, DISTANCE_LIMITS.0, DISTANCE_LIMITS.1);
    }

    pub fn eye(&self) -> Point3<f64> {
        spherical_to_cartesian(self.azimuth, self.elevation, self.distance)
    }

    /// World space to camera space. The camera looks down its own -z axis.
    pub fn view_transform(&self) -> Isometry3<f64> {
        Isometry3::look_at_rh(&self.eye(), &Point3::origin(), &Vector3::y())
    }

    /// Camera space for the star field. Stars only shift with the camera's
    /// position, never its orientation, and are always seen looking along +z.
    pub fn backdrop_point(&self, world: &Point3<f64>) -> Point3<f64> {
        let d = world - self.eye();
        Point3::new(d.x, d.y, -d.z)
    }
}
