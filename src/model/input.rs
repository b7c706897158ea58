use nalgebra::Point2;

use super::simulation::SimulationState;
use crate::consts::{DRAG_AZIMUTH_STEP, DRAG_ELEVATION_STEP, SCROLL_STEP};

/// Discrete commands, usually bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleAutoRotate,
    ResetScene,
    ToggleInfo,
    FrontView,
    Quit,
}

/// Window-system-agnostic input. Pointer positions are in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Point2<f64>),
    PointerMove(Point2<f64>),
    PointerUp,
    Scroll(f64),
    Command(Command),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { anchor: Point2<f64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct InputController {
    drag: DragState,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        InputController {
            drag: DragState::Idle,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn process_event(&mut self, event: InputEvent, state: &mut SimulationState) -> Response {
        match event {
            InputEvent::PointerDown(pos) => {
                self.drag = DragState::Dragging { anchor: pos };
            }
            InputEvent::PointerMove(pos) => {
                if let DragState::Dragging { anchor } = self.drag {
                    let delta = pos - anchor;
                    state
                        .camera_mut()
                        .rotate(delta.x * DRAG_AZIMUTH_STEP, delta.y * DRAG_ELEVATION_STEP);
                    self.drag = DragState::Dragging { anchor: pos };
                }
            }
            InputEvent::PointerUp => {
                self.drag = DragState::Idle;
            }
            InputEvent::Scroll(amount) => {
                // scroll up == zoom in
                state.camera_mut().zoom_by(-amount * SCROLL_STEP);
            }
            InputEvent::Command(command) => return self.run_command(command, state),
        }
        Response::Continue
    }

    fn run_command(&mut self, command: Command, state: &mut SimulationState) -> Response {
        match command {
            Command::ToggleAutoRotate => state.toggle_auto_rotate(),
            Command::ResetScene => state.reset(),
            Command::ToggleInfo => state.toggle_info(),
            Command::FrontView => state.reset_camera(),
            Command::Quit => return Response::Quit,
        }
        Response::Continue
    }
}
