// Tunable constants for the accretion disk scene. None of these have a physical
// derivation; they're the values that make the picture look right.

// -- window --
pub const SCREEN_WIDTH: u32 = 1200;
pub const SCREEN_HEIGHT: u32 = 800;
pub const FOCAL_LENGTH: f64 = 800.0;
pub const SCREEN_MARGIN: f64 = 50.0;

// -- physics --
pub const G: f64 = 800.0;
pub const M: f64 = 1000.0;
pub const SCHWARZSCHILD_RADIUS: f64 = 25.0;
pub const EVENT_HORIZON_RADIUS: f64 = 50.0;
pub const TIMESTEP: f64 = 0.02;
pub const MIN_FORCE_DISTANCE: f64 = 1.0;
pub const CORONA_PULSE_STEP: f64 = 0.05;

// -- particle pools --
pub const NUM_STARS: usize = 200;
pub const NUM_ACCRETION_PARTICLES: usize = 300;

// -- fading into the hole --
pub const FADE_DECREMENT: f64 = 0.05;
pub const FADE_GROWTH: f64 = 1.05;

// -- spawning --
pub const SPAWN_DISTANCE: (f64, f64) = (500.0, 1500.0);
pub const SPAWN_INCLINATION: (f64, f64) = (-0.3, 0.3);
pub const SPAWN_SIZE: (f64, f64) = (1.5, 3.5);
pub const SPIRAL_FACTOR: (f64, f64) = (0.9993, 0.9997);
pub const STAR_XY_RANGE: (f64, f64) = (-3000.0, 3000.0);
pub const STAR_Z_RANGE: (f64, f64) = (500.0, 4000.0);
pub const STAR_SIZE: (f64, f64) = (0.5, 2.5);
pub const STAR_BRIGHTNESS: (f64, f64) = (0.3, 1.0);

// -- visibility thresholds, in pixels --
pub const STAR_MIN_SIZE: f64 = 0.2;
pub const ACCRETION_MIN_SIZE: f64 = 0.5;

// -- camera --
pub const INITIAL_AZIMUTH: f64 = 0.0;
pub const INITIAL_ELEVATION: f64 = 0.3;
pub const INITIAL_DISTANCE: f64 = 600.0;
pub const AUTO_ROTATE_STEP: f64 = 0.003;
pub const DRAG_AZIMUTH_STEP: f64 = 0.005;
pub const DRAG_ELEVATION_STEP: f64 = 0.003;
pub const ELEVATION_LIMIT: f64 = std::f64::consts::PI / 2.5;
pub const SCROLL_STEP: f64 = 30.0;
pub const DISTANCE_LIMITS: (f64, f64) = (200.0, 2000.0);

// -- colors, 0-255 --
pub const BACKGROUND_COLOR: [u8; 3] = [10, 5, 25];
pub const STAR_COLOR: [u8; 3] = [220, 220, 255];
pub const ACCRETION_COLOR: [u8; 3] = [255, 200, 100];
pub const BLACK_HOLE_COLOR: [u8; 3] = [0, 0, 0];

pub fn get_circular_velocity(radius: f64, mu: f64) -> f64 {
    (mu / radius).sqrt()
}
