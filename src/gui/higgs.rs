use kiss3d::camera::{ArcBall, Camera};
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::text::Font;
use kiss3d::window::{State, Window};
use nalgebra::{Point2, Point3, Vector3};
use rand::rngs::StdRng;

use super::colormap::viridis;
use super::controller::{replay_action, ReplayAction};
use crate::math::geometry::spherical_to_cartesian;
use crate::model::higgs::HiggsField;

const CAMERA_ELEVATION_DEG: f64 = 30.0;
const CAMERA_AZIMUTH_DEG: f64 = 30.0;
// In units of the box size
const CAMERA_DISTANCE: f64 = 2.8;
const POINT_SIZE: f32 = 8.0;
const TEXT_SCALE: f32 = 40.0;

const BOX_COLOR: [f32; 3] = [0.5, 0.5, 0.5];
const TEXT_COLOR: [f32; 3] = [0.9, 0.9, 0.9];

/// Simulation space has z pointing up, kiss3d has y pointing up. This rotates
/// one into the other, and moves the middle of the box to the origin.
fn to_world(p: &Point3<f64>, box_size: f64) -> Point3<f32> {
    let half = box_size / 2.0;
    Point3::new(p.x - half, p.z - half, -(p.y - half)).cast()
}

/// The twelve edges of the [0, size]^3 box.
fn box_edges(size: f64) -> Vec<(Point3<f64>, Point3<f64>)> {
    let corner = |i: usize| {
        Point3::new(
            size * (i & 1) as f64,
            size * ((i >> 1) & 1) as f64,
            size * ((i >> 2) & 1) as f64,
        )
    };

    let mut edges = vec![];
    for i in 0..8 {
        for axis in 0..3 {
            let j = i | (1 << axis);
            if j != i {
                edges.push((corner(i), corner(j)));
            }
        }
    }
    edges
}

/// Particles wandering around a box, slowed down by a toy Higgs field.
pub struct HiggsAnimation {
    field: HiggsField,
    rng: StdRng,
    camera: ArcBall,
    paused: bool,
}

impl HiggsAnimation {
    pub fn new(field: HiggsField, rng: StdRng, window: &mut Window) -> Self {
        window.set_point_size(POINT_SIZE);

        let box_size = field.params().box_size;
        let direction = spherical_to_cartesian(
            CAMERA_AZIMUTH_DEG.to_radians(),
            CAMERA_ELEVATION_DEG.to_radians(),
            CAMERA_DISTANCE * box_size,
        );
        // Azimuth is measured in the horizontal plane from x, matching the
        // simulation's own (x, y) floor
        let eye_sim = Point3::new(direction.z, direction.x, direction.y);
        let eye = to_world(&(eye_sim + Vector3::repeat(box_size / 2.0)), box_size);

        HiggsAnimation {
            field,
            rng,
            camera: ArcBall::new(eye, Point3::origin()),
            paused: false,
        }
    }

    fn draw_box(&self, window: &mut Window) {
        let box_size = self.field.params().box_size;
        let color = Point3::from(BOX_COLOR);
        for (a, b) in box_edges(box_size) {
            window.draw_line(&to_world(&a, box_size), &to_world(&b, box_size), &color);
        }
    }

    fn draw_particles(&self, window: &mut Window) {
        let box_size = self.field.params().box_size;
        let (lo, hi) = self.field.mass_range();
        for p in self.field.particles().iter().filter(|p| p.visible) {
            let color = viridis(p.mass, lo, hi);
            window.draw_point(&to_world(&p.position, box_size), &color);
        }
    }

    fn status_text(&self) -> String {
        let (lo, hi) = self.field.mass_range();
        let mut text = format!(
            "Higgs Field Simulation\nt = {:.2} s, visible: {}/{}\ncolor: mass (interaction with the field), {:.2} to {:.2}",
            self.field.time(),
            self.field.num_visible(),
            self.field.particles().len(),
            lo,
            hi,
        );
        if self.paused {
            text += "\nPAUSED";
        }
        text
    }
}

impl State for HiggsAnimation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }

    fn step(&mut self, window: &mut Window) {
        for event in window.events().iter() {
            match replay_action(&event.value) {
                Some(ReplayAction::TogglePause) => self.paused = !self.paused,
                Some(ReplayAction::Restart) => {
                    let params = self.field.params().clone();
                    self.field = HiggsField::new(params, &mut self.rng);
                    log::info!("Restarted with {} particles", self.field.particles().len());
                }
                None => {}
            }
        }

        if !self.paused {
            self.field.step(&mut self.rng);
        }

        self.draw_box(window);
        self.draw_particles(window);
        window.draw_text(
            &self.status_text(),
            &Point2::origin(),
            TEXT_SCALE,
            &Font::default(),
            &Point3::from(TEXT_COLOR),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_world() {
        // z is up
        approx::assert_relative_eq!(
            to_world(&Point3::new(5.0, 5.0, 10.0), 10.0),
            Point3::new(0.0, 5.0, 0.0)
        );
        approx::assert_relative_eq!(
            to_world(&Point3::new(10.0, 5.0, 5.0), 10.0),
            Point3::new(5.0, 0.0, 0.0)
        );
        approx::assert_relative_eq!(
            to_world(&Point3::new(5.0, 10.0, 5.0), 10.0),
            Point3::new(0.0, 0.0, -5.0)
        );
    }

    #[test]
    fn test_box_edges() {
        let edges = box_edges(10.0);
        assert_eq!(edges.len(), 12);
        for (a, b) in edges.iter() {
            approx::assert_relative_eq!((b - a).norm(), 10.0);
        }
    }
}
