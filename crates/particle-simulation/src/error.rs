//! Error types for building a particle field

use std::fmt;

/// Errors that can occur when constructing a [`ParticleField`](crate::ParticleField).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field was asked to hold no particles.
    EmptyField,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::EmptyField => write!(f, "Particle count must be positive"),
        }
    }
}

impl std::error::Error for FieldError {}
