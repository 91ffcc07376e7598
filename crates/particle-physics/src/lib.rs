//! # Particle Physics
//!
//! Particle record and force laws for a field of particles constrained to the
//! unit disk: a pull toward the disk boundary, inverse-square repulsion
//! between every pair, and a hard radial clamp.

pub mod constants;
pub mod forces;
pub mod particle;

pub use constants::*;
pub use forces::*;
pub use particle::*;
