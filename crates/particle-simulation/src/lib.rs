//! # Particle Simulation
//!
//! CPU simulation of a small particle field on the unit disk. The field is
//! stepped once per frame and publishes its positions to a [`RenderTarget`].

pub mod error;
pub mod params;
pub mod simulation;
pub mod target;

pub use error::*;
pub use params::*;
pub use simulation::*;
pub use target::*;
