//! # Particle Renderer
//!
//! Thin wgpu layer that draws the particle field as point sprites.

pub mod camera;
pub mod context;
pub mod error;
pub mod renderer;

pub use camera::*;
pub use context::*;
pub use error::*;
pub use renderer::*;
