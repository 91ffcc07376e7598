//! Fixed constants of the disk field
//!
//! The simulation is a visual toy: none of these are tunable at runtime.

/// Strength of the pull toward the unit circle
pub const ATTRACTION_STRENGTH: f32 = 0.25;

/// Numerator of the inverse-square repulsion between two particles
pub const REPULSION_STRENGTH: f64 = 0.05;

/// Fixed integration step, applied once per frame regardless of frame time
pub const TIME_STEP: f64 = 0.05;

/// Radius of the disk the XY projection is clamped into
pub const DISK_RADIUS: f32 = 1.0;

/// Default number of particles in the field
pub const DEFAULT_PARTICLE_COUNT: usize = 15;

/// Default seed for the initial distribution
pub const DEFAULT_SEED: u64 = 1;
