use std::time::Duration;

use kiss3d::text::Font;
use kiss3d::window::{State, Window};
use nalgebra::{Point2, Point3};

use super::controller::{replay_action, ReplayAction};
use super::fps::FpsCounter;
use super::renderers::utils::{circle_points, draw_planar_path};
use crate::model::geodesic::{OrbitSample, Trajectory};

const NUM_GRID_RINGS: usize = 4;
const NUM_GRID_SPOKES: usize = 8;
// Fraction of the half-window the outermost grid ring takes up
const PLOT_FILL: f32 = 0.85;
const MARKER_RADIUS: f32 = 5.0;
const TEXT_SCALE: f32 = 40.0;

const GRID_COLOR: [f32; 3] = [0.3, 0.3, 0.35];
const HORIZON_COLOR: [f32; 3] = [0.8, 0.2, 0.2];
const ORBIT_COLOR: [f32; 3] = [0.2, 0.5, 1.0];
const MARKER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const TEXT_COLOR: [f32; 3] = [0.9, 0.9, 0.9];

/// Which sample of the trajectory is on screen. Wraps around at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    frame: usize,
    len: usize,
    paused: bool,
}

impl Playback {
    pub fn new(len: usize) -> Self {
        Playback {
            frame: 0,
            len,
            paused: false,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn restart(&mut self) {
        self.frame = 0;
    }

    pub fn advance(&mut self) {
        if self.paused || self.len == 0 {
            return;
        }
        self.frame = (self.frame + 1) % self.len;
    }
}

/// Replays a pre-solved orbit as a polar plot. The planar camera puts the
/// origin, and so the black hole, in the middle of the window.
pub struct GeodesicReplay {
    trajectory: Trajectory,
    title: String,
    playback: Playback,
    horizon_radius: f64,
    fps_counter: FpsCounter,
}

impl GeodesicReplay {
    pub fn new(trajectory: Trajectory, title: &str, horizon_radius: f64) -> Self {
        let playback = Playback::new(trajectory.len());
        GeodesicReplay {
            trajectory,
            title: title.to_owned(),
            playback,
            horizon_radius,
            fps_counter: FpsCounter::new(Duration::from_secs(1)),
        }
    }

    fn plot_scale(&self, window: &Window) -> f32 {
        let half_extent = window.width().min(window.height()) as f32 / 2.0;
        let max_r = self.trajectory.max_radius().max(self.horizon_radius) as f32;
        PLOT_FILL * half_extent / max_r
    }

    fn draw_grid(&self, window: &mut Window, scale: f32) {
        let color = Point3::from(GRID_COLOR);
        let max_r = scale * self.trajectory.max_radius() as f32;

        for i in 1..=NUM_GRID_RINGS {
            let r = max_r * i as f32 / NUM_GRID_RINGS as f32;
            draw_planar_path(window, circle_points(Point2::origin(), r, 90), &color);
        }
        for i in 0..NUM_GRID_SPOKES {
            let theta = std::f32::consts::TAU * i as f32 / NUM_GRID_SPOKES as f32;
            let end = Point2::new(theta.cos(), theta.sin()) * max_r;
            window.draw_planar_line(&Point2::origin(), &end, &color);
        }

        let horizon = scale * self.horizon_radius as f32;
        draw_planar_path(
            window,
            circle_points(Point2::origin(), horizon, 45),
            &Point3::from(HORIZON_COLOR),
        );
    }

    fn draw_orbit(&self, window: &mut Window, scale: f32) {
        let samples = &self.trajectory.samples()[..=self.playback.frame()];
        let to_screen =
            |s: &OrbitSample| -> Point2<f32> { s.to_cartesian().cast::<f32>() * scale };

        draw_planar_path(
            window,
            samples.iter().map(to_screen),
            &Point3::from(ORBIT_COLOR),
        );

        if let Some(current) = samples.last() {
            draw_planar_path(
                window,
                circle_points(to_screen(current), MARKER_RADIUS, 16),
                &Point3::from(MARKER_COLOR),
            );
        }
    }

    fn status_text(&self) -> String {
        let sample = &self.trajectory.samples()[self.playback.frame()];
        let mut text = format!("tau = {:.1}\nr = {:.2}", sample.tau, sample.r);
        if let Some(t) = self.trajectory.capture_time() {
            text += &format!("\ncaptured at tau = {:.1}", t);
        }
        if self.playback.is_paused() {
            text += "\nPAUSED";
        }
        text += &format!("\nFPS: {:.0}", self.fps_counter.value());
        text
    }
}

impl State for GeodesicReplay {
    fn step(&mut self, window: &mut Window) {
        for event in window.events().iter() {
            match replay_action(&event.value) {
                Some(ReplayAction::TogglePause) => self.playback.toggle_pause(),
                Some(ReplayAction::Restart) => self.playback.restart(),
                None => {}
            }
        }

        if self.trajectory.is_empty() {
            return;
        }

        let scale = self.plot_scale(window);
        self.draw_grid(window, scale);
        self.draw_orbit(window, scale);

        let font = Font::default();
        let color = Point3::from(TEXT_COLOR);
        window.draw_text(&self.title, &Point2::origin(), TEXT_SCALE, &font, &color);
        window.draw_text(
            &self.status_text(),
            &Point2::new(0.0, TEXT_SCALE),
            TEXT_SCALE,
            &font,
            &color,
        );
        window.draw_text(
            "SPACE: Pause | R: Restart",
            &Point2::new(0.0, TEXT_SCALE * 6.0),
            TEXT_SCALE,
            &font,
            &color,
        );

        self.playback.advance();
        self.fps_counter.increment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_loops() {
        let mut playback = Playback::new(3);
        playback.advance();
        playback.advance();
        assert_eq!(playback.frame(), 2);
        playback.advance();
        assert_eq!(playback.frame(), 0);
    }

    #[test]
    fn test_playback_pause_and_restart() {
        let mut playback = Playback::new(10);
        playback.advance();
        playback.toggle_pause();
        playback.advance();
        assert_eq!(playback.frame(), 1);
        assert!(playback.is_paused());

        playback.restart();
        assert_eq!(playback.frame(), 0);
        playback.toggle_pause();
        playback.advance();
        assert_eq!(playback.frame(), 1);
    }

    #[test]
    fn test_empty_playback() {
        let mut playback = Playback::new(0);
        playback.advance();
        assert_eq!(playback.frame(), 0);
    }
}
