use nalgebra::{Point2, Vector2};

use super::simulation::SimulationState;
use crate::consts::{
    ACCRETION_MIN_SIZE, BLACK_HOLE_COLOR, EVENT_HORIZON_RADIUS, FOCAL_LENGTH,
    SCHWARZSCHILD_RADIUS, SCREEN_HEIGHT, SCREEN_MARGIN, SCREEN_WIDTH, STAR_MIN_SIZE,
};
use crate::math::projection::Projector;

pub type Rgb = [u8; 3];

const NUM_HORIZON_RINGS: usize = 5;
const HORIZON_RING_SPACING: f64 = 3.0;
const HORIZON_RING_WIDTH: f64 = 2.0;
const CORONA_WIDTH: f64 = 2.0;
const GLOW_WIDTH: f64 = 1.0;

/// A 2D primitive, in pixels. Shapes are painted in the order they're listed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Disc {
        center: Point2<f64>,
        radius: f64,
        color: Rgb,
    },
    /// A stroked circle; the stroke extends inwards from `radius` by `width`.
    Ring {
        center: Point2<f64>,
        radius: f64,
        width: f64,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedParticle {
    pub screen: Point2<f64>,
    // apparent radius, in pixels
    pub size: f64,
    pub camera_distance: f64,
    pub color: Rgb,
}

pub fn default_projector() -> Projector {
    Projector::new(FOCAL_LENGTH, SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Where the central body would be drawn, relative to where we force it to be
/// drawn (dead center). Everything else gets shifted by the same amount.
pub fn recentring_offset(state: &SimulationState, projector: &Projector) -> Vector2<f64> {
    let view = state.camera().view_transform();
    projector.recentring_offset(&view, &state.field().center())
}

/// The star field is a backdrop: it follows the camera around but doesn't
/// turn with it.
pub fn project_stars(state: &SimulationState, projector: &Projector) -> Vec<ProjectedParticle> {
    let camera = state.camera();
    let eye = camera.eye();
    let offset = recentring_offset(state, projector);

    state
        .field()
        .stars()
        .iter()
        .filter_map(|star| {
            let in_camera = camera.backdrop_point(&star.position);
            let projection = projector.project_from_camera(&in_camera)?;
            let size = star.size * projection.scale;
            let screen = projection.screen + offset;
            if size < STAR_MIN_SIZE || !projector.is_on_screen(&screen, SCREEN_MARGIN) {
                return None;
            }
            Some(ProjectedParticle {
                screen,
                size,
                camera_distance: (star.position - eye).norm(),
                color: star.color,
            })
        })
        .collect()
}

/// Visible accretion particles, sorted so that the farthest comes first.
pub fn project_accretion(state: &SimulationState, projector: &Projector) -> Vec<ProjectedParticle> {
    let view = state.camera().view_transform();
    let eye = state.camera().eye();
    let offset = recentring_offset(state, projector);

    let mut particles: Vec<_> = state
        .field()
        .accretion()
        .iter()
        .filter_map(|p| {
            let projection = projector.project(&view, &p.position)?;
            // Things near the camera get an extra boost, so the disk looks thick
            let boost = 1.0 + 100.0 / projection.depth.max(100.0);
            let size = p.size * projection.scale * boost;
            let screen = projection.screen + offset;
            if size < ACCRETION_MIN_SIZE || !projector.is_on_screen(&screen, SCREEN_MARGIN) {
                return None;
            }
            Some(ProjectedParticle {
                screen,
                size,
                camera_distance: (p.position - eye).norm(),
                color: p.color(),
            })
        })
        .collect();

    particles.sort_by(|a, b| b.camera_distance.total_cmp(&a.camera_distance));
    particles
}

fn pixel_radius(size: f64, min: f64) -> f64 {
    size.trunc().max(min)
}

fn glow_color(color: Rgb) -> Rgb {
    color.map(|c| (c as f64 * 0.3).min(255.0) as u8)
}

/// The central body and its decorations: horizon rings, the hole itself, and
/// the pulsing corona. Always drawn at the center of the screen.
pub fn black_hole_shapes(state: &SimulationState, projector: &Projector) -> Vec<Shape> {
    let center = projector.screen_center();
    let distance = (state.camera().eye() - state.field().center()).norm();
    let size_factor = FOCAL_LENGTH / distance.max(100.0);
    let horizon_size = pixel_radius(EVENT_HORIZON_RADIUS * size_factor, 10.0);
    let hole_size = pixel_radius(SCHWARZSCHILD_RADIUS * size_factor, 5.0);

    let mut shapes = Vec::with_capacity(NUM_HORIZON_RINGS + 2);
    for i in 0..NUM_HORIZON_RINGS {
        let falloff = (NUM_HORIZON_RINGS - i) as f64 / NUM_HORIZON_RINGS as f64;
        let intensity = (60.0 * falloff) as u8;
        shapes.push(Shape::Ring {
            center,
            radius: horizon_size + i as f64 * HORIZON_RING_SPACING,
            width: HORIZON_RING_WIDTH,
            color: [intensity, intensity / 2, intensity / 2],
        });
    }

    shapes.push(Shape::Disc {
        center,
        radius: hole_size,
        color: BLACK_HOLE_COLOR,
    });

    let pulse = state.corona_pulse();
    let corona_radius = hole_size + (5.0 * (1.0 + 0.3 * pulse.sin())).trunc();
    let alpha = (80.0 + 40.0 * (pulse * 1.5).sin()).trunc();
    shapes.push(Shape::Ring {
        center,
        radius: corona_radius,
        width: CORONA_WIDTH,
        color: [
            alpha.min(255.0) as u8,
            (alpha / 2.0).floor().min(255.0) as u8,
            (alpha * 1.5).trunc().min(255.0) as u8,
        ],
    });

    shapes
}

/// Builds one frame: stars, then the accretion disk back-to-front, then the
/// black hole on top.
pub fn compose(state: &SimulationState, projector: &Projector) -> Vec<Shape> {
    let mut shapes = vec![];

    for star in project_stars(state, projector) {
        shapes.push(Shape::Disc {
            center: star.screen,
            radius: pixel_radius(star.size, 1.0),
            color: star.color,
        });
    }

    for p in project_accretion(state, projector) {
        shapes.push(Shape::Disc {
            center: p.screen,
            radius: pixel_radius(p.size, 1.0),
            color: p.color,
        });
        shapes.push(Shape::Ring {
            center: p.screen,
            radius: pixel_radius(p.size * 1.5, 2.0),
            width: GLOW_WIDTH,
            color: glow_color(p.color),
        });
    }

    shapes.extend(black_hole_shapes(state, projector));
    shapes
}
