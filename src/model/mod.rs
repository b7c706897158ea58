//! Simulation state for the three scenes, independent of any window system.
//!
//! - The accretion disk: [SimulationState] owns a [ParticleField] and an
//!   [OrbitCamera], [InputController] mutates it, and [frame::compose] turns
//!   it into a list of 2D shapes.
//! - [geodesic]: a pre-solved polar orbit around a (possibly moving) black hole.
//! - [higgs]: particles bouncing around a box, slowed by a toy Higgs field.

pub mod camera;
pub mod frame;
pub mod geodesic;
pub mod higgs;
pub mod input;
pub mod particles;
pub mod simulation;

pub use camera::OrbitCamera;
pub use input::{Command, InputController, InputEvent, Response};
pub use particles::{AccretionParticle, ParticleField, Star};
pub use simulation::SimulationState;
