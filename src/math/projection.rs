use nalgebra::{Isometry3, Point2, Point3, Vector2};

/// Pinhole perspective projection onto a screen measured in pixels, with the
/// origin in the top-left corner and y pointing down.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    focal: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen: Point2<f64>,
    // pixels per world unit at this depth
    pub scale: f64,
    pub depth: f64,
}

impl Projector {
    pub fn new(focal: f64, width: u32, height: u32) -> Self {
        Projector {
            focal,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn screen_center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Projects a world-space point. `view` takes world space to camera space,
    /// where the camera looks down -z and y is up.
    ///
    /// Returns None when the point is on or behind the camera plane.
    pub fn project(&self, view: &Isometry3<f64>, point: &Point3<f64>) -> Option<Projection> {
        self.project_from_camera(&(view * point))
    }

    /// Same as [Projector::project], for a point already in camera space.
    pub fn project_from_camera(&self, p: &Point3<f64>) -> Option<Projection> {
        let depth = -p.z;
        if depth.is_nan() || depth <= 0.0 {
            return None;
        }

        let factor = self.focal / depth;
        let screen = Point2::new(
            p.x * factor + self.width / 2.0,
            -p.y * factor + self.height / 2.0,
        );
        Some(Projection {
            screen,
            scale: factor,
            depth,
        })
    }

    /// The shift that moves `anchor`'s projection onto the center of the screen.
    /// If the anchor isn't visible, no shift is applied.
    pub fn recentring_offset(&self, view: &Isometry3<f64>, anchor: &Point3<f64>) -> Vector2<f64> {
        match self.project(view, anchor) {
            Some(p) => self.screen_center() - p.screen,
            None => Vector2::zeros(),
        }
    }

    /// Whether a screen point lies within the screen, grown by `margin` pixels on
    /// each side.
    pub fn is_on_screen(&self, screen: &Point2<f64>, margin: f64) -> bool {
        -margin <= screen.x
            && screen.x <= self.width + margin
            && -margin <= screen.y
            && screen.y <= self.height + margin
    }
}
