use kiss3d::window::Window;
use nalgebra::{Point2, Point3};

pub fn path_iter_parametric<F, S, P>(
    f: F,
    t_start: S,
    t_end: S,
    num_segments: usize,
) -> impl Iterator<Item = P>
where
    F: Fn(S) -> P,
    S: nalgebra::RealField + simba::scalar::SupersetOf<usize> + Copy,
{
    assert!(
        num_segments >= 1,
        "Must have at least one segment, num_segments was {}",
        num_segments
    );
    let convert = nalgebra::convert::<usize, S>;
    (0..=num_segments)
        .map(move |i| convert(i) / convert(num_segments))
        // u ranges from 0 to 1 (inclusive)
        .map(move |u| t_start + u * (t_end - t_start))
        .map(f)
}

/// Points on a circle in the plane, first and last point coinciding.
pub fn circle_points(
    center: Point2<f32>,
    radius: f32,
    num_segments: usize,
) -> impl Iterator<Item = Point2<f32>> {
    path_iter_parametric(
        move |theta: f32| center + radius * nalgebra::Vector2::new(theta.cos(), theta.sin()),
        0.0,
        std::f32::consts::TAU,
        num_segments,
    )
}

pub fn draw_planar_path<I: Iterator<Item = Point2<f32>>>(
    window: &mut Window,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            window.draw_planar_line(&prev_pt, &pt, color);
        }
        prev_pt = Some(pt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parametric_endpoints() {
        let points: Vec<f64> = path_iter_parametric(|t: f64| t * t, 1.0, 3.0, 4).collect();
        assert_eq!(points.len(), 5);
        approx::assert_relative_eq!(points[0], 1.0);
        approx::assert_relative_eq!(points[2], 4.0);
        approx::assert_relative_eq!(points[4], 9.0);
    }

    #[test]
    fn test_circle_is_closed() {
        let center = Point2::new(1.0, -2.0);
        let points: Vec<_> = circle_points(center, 3.0, 16).collect();
        assert_eq!(points.len(), 17);
        approx::assert_relative_eq!(points[0], points[16], epsilon = 1e-5);
        for p in points.iter() {
            approx::assert_relative_eq!((p - center).norm(), 3.0, epsilon = 1e-5);
        }
    }
}
