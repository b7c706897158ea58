use approx::assert_relative_eq;
use nalgebra::Point2;
use rust_blackhole::consts::{NUM_ACCRETION_PARTICLES, NUM_STARS};
use rust_blackhole::model::frame::{compose, default_projector, project_accretion, Shape};
use rust_blackhole::model::{Command, InputController, InputEvent, SimulationState};

#[test]
fn test_idle_frames() {
    // Nobody touches anything: the camera drifts at a constant rate and the
    // pool never changes size
    let mut state = SimulationState::new(2024);
    let num_frames = 2500;
    for _ in 0..num_frames {
        state.advance();
        for p in state.field().accretion() {
            assert!((0.0..=1.0).contains(&p.life()));
            assert!(p.size > 0.0);
        }
    }

    let expected = (num_frames as f64 * 0.003).rem_euclid(std::f64::consts::TAU);
    assert_relative_eq!(state.camera().azimuth(), expected, epsilon = 1e-9);
    assert_eq!(state.field().len(), NUM_STARS + NUM_ACCRETION_PARTICLES);
    assert_eq!(state.field().stars().len(), 200);
    assert_eq!(state.field().accretion().len(), 300);
    assert_eq!(state.frames(), num_frames);
}

#[test]
fn test_interactive_session() {
    let mut state = SimulationState::new(77);
    let mut controller = InputController::new();
    let projector = default_projector();

    let events = [
        InputEvent::Command(Command::ToggleAutoRotate),
        InputEvent::PointerDown(Point2::new(600.0, 400.0)),
        InputEvent::PointerMove(Point2::new(700.0, 380.0)),
        InputEvent::PointerMove(Point2::new(900.0, 200.0)),
        InputEvent::PointerUp,
        InputEvent::Scroll(3.0),
        InputEvent::Scroll(-40.0),
        InputEvent::Command(Command::ToggleInfo),
        InputEvent::Scroll(100.0),
    ];

    for event in events.iter() {
        controller.process_event(*event, &mut state);
        state.advance();

        let d = state.camera().distance();
        assert!((200.0..=2000.0).contains(&d));
        let el = state.camera().elevation();
        assert!(el.abs() <= std::f64::consts::PI / 2.5 + 1e-12);

        // Farthest particles get painted first
        let particles = project_accretion(&state, &projector);
        for pair in particles.windows(2) {
            assert!(pair[0].camera_distance >= pair[1].camera_distance);
        }

        // And the hole goes on top of everything
        let shapes = compose(&state, &projector);
        assert!(matches!(shapes[shapes.len() - 2], Shape::Disc { color: [0, 0, 0], .. }));
    }

    // Auto-rotate was switched off, so only the drag moved the camera
    assert_relative_eq!(state.camera().azimuth(), 300.0 * 0.005, epsilon = 1e-12);
    assert_relative_eq!(state.camera().distance(), 200.0);
    assert!(!state.auto_rotate());
    assert!(!state.show_info());

    // Reset brings everything back except the toggles
    controller.process_event(InputEvent::Command(Command::ResetScene), &mut state);
    assert_relative_eq!(state.camera().distance(), 600.0);
    assert_relative_eq!(state.camera().azimuth(), 0.0);
    assert!(!state.auto_rotate());
}

#[test]
fn test_same_seed_same_frames() {
    let mut a = SimulationState::new(5);
    let mut b = SimulationState::new(5);
    let projector = default_projector();
    for _ in 0..100 {
        a.advance();
        b.advance();
    }
    assert_eq!(compose(&a, &projector), compose(&b, &projector));
}
