use std::time::Duration;

use kiss3d::event::{Action, Event, Key, MouseButton, WindowEvent};
use nalgebra::Point2;

use super::fps::FpsCounter;
use crate::model::input::{Command, InputController, InputEvent, Response};
use crate::model::simulation::SimulationState;

// Key config, all in one place
const KEY_TOGGLE_ROTATE: Key = Key::Space;
const KEY_RESET: Key = Key::R;
const KEY_TOGGLE_INFO: Key = Key::I;
const KEY_FRONT_VIEW: Key = Key::F;
const KEY_QUIT: Key = Key::Escape;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_RESTART: Key = Key::R;

const DRAG_BUTTON: MouseButton = MouseButton::Button1;

/// Translates window events for the accretion disk scene into [InputEvent]s.
pub struct Controller {
    input: InputController,
    // kiss3d only tells us where the cursor is when it moves
    cursor: Point2<f64>,
    fps_counter: FpsCounter,
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            input: InputController::new(),
            cursor: Point2::origin(),
            fps_counter: FpsCounter::new(Duration::from_secs(1)),
        }
    }

    pub fn process_event(&mut self, event: Event, state: &mut SimulationState) -> Response {
        let input = match event.value {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor = Point2::new(x, y);
                InputEvent::PointerMove(self.cursor)
            }
            WindowEvent::MouseButton(DRAG_BUTTON, Action::Press, _) => {
                InputEvent::PointerDown(self.cursor)
            }
            WindowEvent::MouseButton(DRAG_BUTTON, Action::Release, _) => InputEvent::PointerUp,
            WindowEvent::Scroll(_, dy, _) => InputEvent::Scroll(dy),
            WindowEvent::Key(KEY_TOGGLE_ROTATE, Action::Press, _) => {
                InputEvent::Command(Command::ToggleAutoRotate)
            }
            WindowEvent::Key(KEY_RESET, Action::Press, _) => {
                InputEvent::Command(Command::ResetScene)
            }
            WindowEvent::Key(KEY_TOGGLE_INFO, Action::Press, _) => {
                InputEvent::Command(Command::ToggleInfo)
            }
            WindowEvent::Key(KEY_FRONT_VIEW, Action::Press, _) => {
                InputEvent::Command(Command::FrontView)
            }
            WindowEvent::Key(KEY_QUIT, Action::Press, _) => InputEvent::Command(Command::Quit),
            _ => return Response::Continue,
        };
        self.input.process_event(input, state)
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}

/// What the replay-style windows (geodesic, Higgs) listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayAction {
    TogglePause,
    Restart,
}

pub fn replay_action(event: &WindowEvent) -> Option<ReplayAction> {
    match event {
        WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => Some(ReplayAction::TogglePause),
        WindowEvent::Key(KEY_RESTART, Action::Press, _) => Some(ReplayAction::Restart),
        _ => None,
    }
}
