use kiss3d::camera::{Camera, FixedView};
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{Point2, Point3};

use super::renderers::DiscRenderer;
use crate::consts::{EVENT_HORIZON_RADIUS, SCHWARZSCHILD_RADIUS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::math::projection::Projector;
use crate::model::frame::{compose, default_projector};
use crate::model::simulation::SimulationState;

const TEXT_SCALE: f32 = 40.0;
const TITLE_COLOR: [f32; 3] = [0.2, 0.4, 0.8];
const INFO_COLOR: [f32; 3] = [0.78, 0.9, 1.0];
const STATUS_ON_COLOR: [f32; 3] = [0.4, 1.0, 0.6];
const STATUS_OFF_COLOR: [f32; 3] = [1.0, 0.4, 0.4];
const LEGEND_COLOR: [f32; 3] = [0.78, 0.78, 0.86];

/// Draws the accretion disk scene. Everything is laid out in pixels on a
/// fixed-size logical screen, then handed to the GPU in paint order.
pub struct View {
    projector: Projector,
    // The shapes are already in screen space; this just keeps kiss3d happy
    camera: FixedView,
    renderer: DiscRenderer,
}

impl View {
    pub fn new(window: &mut Window) -> Self {
        window.set_background_color(10.0 / 255.0, 5.0 / 255.0, 25.0 / 255.0);
        View {
            projector: default_projector(),
            camera: FixedView::new(),
            renderer: DiscRenderer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }

    pub fn prerender_scene(&mut self, window: &mut Window, state: &SimulationState, fps: f64) {
        for shape in compose(state, &self.projector).iter() {
            self.renderer.add_shape(shape);
        }

        // Text goes top to bottom, one block after another
        let font = Font::default();
        let mut y = 0.0;
        let mut draw_block = |window: &mut Window, text: &str, color: [f32; 3]| {
            window.draw_text(text, &Point2::new(0.0, y), TEXT_SCALE, &font, &Point3::from(color));
            y += TEXT_SCALE * text.lines().count() as f32;
        };

        if state.show_info() {
            draw_block(window, "BLACK HOLE - ACCRETION DISK", TITLE_COLOR);
            draw_block(window, &info_text(state, fps), INFO_COLOR);
        }

        let status_color = if state.auto_rotate() {
            STATUS_ON_COLOR
        } else {
            STATUS_OFF_COLOR
        };
        draw_block(window, &status_text(state), status_color);
        draw_block(window, LEGEND_TEXT, LEGEND_COLOR);
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, Some(&mut self.renderer), None)
    }
}

const LEGEND_TEXT: &str = "SPACE: Auto-rotation | R: Reset | F: Front view
Mouse: Rotate camera | Wheel: Zoom | I: Info | ESC: Quit";

fn info_text(state: &SimulationState, fps: f64) -> String {
    let camera = state.camera();
    format!(
        "Camera distance: {}
Angle: {:.1}°
Elevation: {:.1}°
Active particles: {}
Schwarzschild radius: {}, horizon: {}
Keplerian orbits, spiralling inwards
FPS: {:.0}",
        camera.distance() as i64,
        camera.azimuth().to_degrees(),
        camera.elevation().to_degrees(),
        state.field().accretion().len(),
        SCHWARZSCHILD_RADIUS,
        EVENT_HORIZON_RADIUS,
        fps,
    )
}

fn status_text(state: &SimulationState) -> String {
    let status = if state.auto_rotate() { "ON" } else { "OFF" };
    format!("Auto-rotation: {}", status)
}
