//! Construction parameters for the particle field

use crate::FieldError;
use particle_physics::{DEFAULT_PARTICLE_COUNT, DEFAULT_SEED};

/// Everything a field needs at construction. There is no runtime tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldParams {
    pub particle_count: usize,
    pub seed: u64,
}

impl FieldParams {
    pub fn new(seed: u64, particle_count: usize) -> Self {
        Self {
            particle_count,
            seed,
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.particle_count == 0 {
            return Err(FieldError::EmptyField);
        }
        Ok(())
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = FieldParams::default();
        assert_eq!(params.particle_count, 15);
        assert_eq!(params.seed, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let params = FieldParams::new(7, 0);
        assert_eq!(params.validate(), Err(FieldError::EmptyField));
    }
}
