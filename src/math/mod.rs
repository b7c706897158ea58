pub mod geometry;
pub mod ode;
pub mod projection;
pub mod stats;
