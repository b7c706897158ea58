use nalgebra::{Point3, Vector3};

/// Position on a sphere around the origin, with y as the "up" axis.
/// Azimuth 0 is along +z, and increases towards +x.
pub fn spherical_to_cartesian(azimuth: f64, elevation: f64, radius: f64) -> Point3<f64> {
    Point3::new(
        azimuth.sin() * elevation.cos() * radius,
        elevation.sin() * radius,
        azimuth.cos() * elevation.cos() * radius,
    )
}

/// Scales `v` down so its length is at most `max_norm`, keeping its direction.
pub fn clip_magnitude(v: Vector3<f64>, max_norm: f64) -> Vector3<f64> {
    let norm = v.norm();
    if norm > max_norm {
        v * (max_norm / norm)
    } else {
        v
    }
}

/// Wraps an angle into [0, 2pi).
pub fn wrap_angle(theta: f64) -> f64 {
    theta.rem_euclid(std::f64::consts::TAU)
}

pub fn is_finite_vector(v: &Vector3<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_spherical() {
        approx::assert_relative_eq!(
            spherical_to_cartesian(0.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 2.0),
        );
        approx::assert_relative_eq!(
            spherical_to_cartesian(FRAC_PI_2, 0.0, 2.0),
            Point3::new(2.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        approx::assert_relative_eq!(
            spherical_to_cartesian(1.234, FRAC_PI_2, 3.0),
            Point3::new(0.0, 3.0, 0.0),
            epsilon = 1e-12
        );

        // Always at the right distance
        let p = spherical_to_cartesian(0.7, 0.3, 600.0);
        approx::assert_relative_eq!(p.coords.norm(), 600.0, max_relative = 1e-12);
    }

    #[test]
    fn test_clip_magnitude() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        approx::assert_relative_eq!(clip_magnitude(v, 10.0), v);
        approx::assert_relative_eq!(clip_magnitude(v, 2.5), Vector3::new(1.5, 2.0, 0.0));
        approx::assert_relative_eq!(clip_magnitude(Vector3::zeros(), 1.0), Vector3::zeros());
    }

    #[test]
    fn test_wrap_angle() {
        approx::assert_relative_eq!(wrap_angle(0.5), 0.5);
        approx::assert_relative_eq!(wrap_angle(2.0 * PI + 0.5), 0.5, epsilon = 1e-12);
        approx::assert_relative_eq!(wrap_angle(-0.5), 2.0 * PI - 0.5, epsilon = 1e-12);
    }
}
