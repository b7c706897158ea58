use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::model::input::Response;
use crate::model::simulation::SimulationState;

mod colormap;
mod controller;
mod fps;
mod geodesic;
mod higgs;
pub mod plot;
mod renderers;
mod view;

pub use self::geodesic::GeodesicReplay;
pub use self::higgs::HiggsAnimation;

/// The accretion disk scene, hooked up to a kiss3d window.
pub struct Simulation {
    state: SimulationState,
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(state: SimulationState, window: &mut Window) -> Self {
        Self {
            state,
            view: View::new(window),
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) -> Response {
        // Process events
        for event in events.iter() {
            if self.controller.process_event(event, &mut self.state) == Response::Quit {
                return Response::Quit;
            }
        }
        Response::Continue
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        if self.process_user_input(window.events()) == Response::Quit {
            log::info!("Quitting after {} frames", self.state.frames());
            window.close();
            return;
        }
        self.state.advance();
        self.view.prerender_scene(window, &self.state, self.controller.fps());
        self.controller.increment_frame_counter();
    }
}
