use rand::rngs::StdRng;
use rand::SeedableRng;

use super::camera::OrbitCamera;
use super::particles::ParticleField;
use crate::consts::{AUTO_ROTATE_STEP, CORONA_PULSE_STEP, NUM_ACCRETION_PARTICLES, NUM_STARS};

/// Everything the accretion disk scene needs from one frame to the next. The
/// frame loop owns this and hands it out to the input, update and render steps.
#[derive(Debug, Clone)]
pub struct SimulationState {
    field: ParticleField,
    camera: OrbitCamera,
    auto_rotate: bool,
    show_info: bool,
    corona_pulse: f64,
    frames: u64,
    rng: StdRng,
}

impl SimulationState {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_rng(mut rng: StdRng) -> Self {
        let field = ParticleField::new(&mut rng, NUM_STARS, NUM_ACCRETION_PARTICLES);
        SimulationState {
            field,
            camera: OrbitCamera::default(),
            auto_rotate: true,
            show_info: true,
            corona_pulse: 0.0,
            frames: 0,
            rng,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn show_info(&self) -> bool {
        self.show_info
    }

    pub fn corona_pulse(&self) -> f64 {
        self.corona_pulse
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
        log::debug!("Auto-rotation is now {}", self.auto_rotate);
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    /// Puts the camera back where it started, leaving the particles alone.
    pub fn reset_camera(&mut self) {
        self.camera = OrbitCamera::default();
    }

    /// Throws away the particle field and makes a fresh one, and resets the
    /// camera. The toggles are left as they are.
    pub fn reset(&mut self) {
        self.field = ParticleField::new(&mut self.rng, NUM_STARS, NUM_ACCRETION_PARTICLES);
        self.corona_pulse = 0.0;
        self.reset_camera();
        log::info!("Simulation reset with {} particles", self.field.len());
    }

    /// Runs a single frame's worth of simulation.
    pub fn advance(&mut self) {
        if self.auto_rotate {
            self.camera.rotate(AUTO_ROTATE_STEP, 0.0);
        }

        let respawned = self.field.step(&mut self.rng);
        if respawned > 0 {
            log::trace!("frame {}: {} particles respawned", self.frames, respawned);
        }
        self.corona_pulse += CORONA_PULSE_STEP;
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_rotate_toggle() {
        let mut state = SimulationState::new(1);
        state.advance();
        approx::assert_relative_eq!(state.camera().azimuth(), 0.003);

        state.toggle_auto_rotate();
        state.advance();
        approx::assert_relative_eq!(state.camera().azimuth(), 0.003);
        approx::assert_relative_eq!(state.corona_pulse(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_reset() {
        let mut state = SimulationState::new(2);
        state.toggle_info();
        state.camera_mut().zoom_by(500.0);
        for _ in 0..10 {
            state.advance();
        }

        state.reset();
        assert_eq!(state.camera(), &OrbitCamera::default());
        assert_eq!(state.field().len(), NUM_STARS + NUM_ACCRETION_PARTICLES);
        assert!(state.auto_rotate());
        assert!(!state.show_info());
        approx::assert_relative_eq!(state.corona_pulse(), 0.0);
    }

    #[test]
    fn test_reset_camera_keeps_particles() {
        let mut state = SimulationState::new(3);
        state.advance();
        let positions: Vec<_> = state.field().accretion().iter().map(|p| p.position).collect();

        state.camera_mut().rotate(1.0, 0.2);
        state.reset_camera();
        assert_eq!(state.camera(), &OrbitCamera::default());

        let after: Vec<_> = state.field().accretion().iter().map(|p| p.position).collect();
        assert_eq!(positions, after);
    }
}
