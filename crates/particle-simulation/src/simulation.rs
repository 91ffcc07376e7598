//! CPU particle field simulation
//!
//! Every step is the naive O(n²) pass: accumulate forces, take one fixed
//! Euler step, clamp back into the unit disk, then publish. The step does not
//! look at elapsed time, so simulation speed follows the frame rate.

use crate::{FieldError, FieldParams, RenderTarget};
use glam::{DVec3, Vec3};
use particle_physics::{
    boundary_attraction, clamp_to_disk, integrate, pairwise_repulsion, Particle,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owns the particle positions and advances them one frame at a time.
pub struct ParticleField {
    particles: Vec<Particle>,
    // Scratch space reused across steps; meaningless between calls
    forces: Vec<DVec3>,
    frame: u64,
}

impl ParticleField {
    /// Scatter `params.particle_count` particles uniformly over [-1, 1)³.
    ///
    /// The same seed always yields the same field. Initial positions are not
    /// clamped, so some may start outside the disk until the first step ends.
    pub fn new(params: FieldParams) -> Result<Self, FieldError> {
        params.validate()?;

        let mut rng = StdRng::seed_from_u64(params.seed);
        let particles: Vec<Particle> = (0..params.particle_count)
            .map(|_| {
                let x = rng.random_range(-1.0..1.0);
                let y = rng.random_range(-1.0..1.0);
                let z = rng.random_range(-1.0..1.0);
                Particle::new(Vec3::new(x, y, z))
            })
            .collect();

        log::info!(
            "✓ Initialized {} particles (seed {})",
            particles.len(),
            params.seed
        );

        Ok(Self::with_particles(particles))
    }

    pub fn initialize(seed: u64, particle_count: usize) -> Result<Self, FieldError> {
        Self::new(FieldParams::new(seed, particle_count))
    }

    /// Build a field from explicit positions, e.g. to set up degenerate layouts.
    pub fn from_positions<I>(positions: I) -> Result<Self, FieldError>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let particles: Vec<Particle> = positions.into_iter().map(Particle::new).collect();
        if particles.is_empty() {
            return Err(FieldError::EmptyField);
        }

        log::debug!("Built field from {} explicit positions", particles.len());
        Ok(Self::with_particles(particles))
    }

    fn with_particles(particles: Vec<Particle>) -> Self {
        let forces = vec![DVec3::ZERO; particles.len()];
        Self {
            particles,
            forces,
            frame: 0,
        }
    }

    /// Run one frame and hand the result to `target` in a single upload.
    pub fn step(&mut self, target: &mut dyn RenderTarget) {
        self.advance();
        target.upload_positions(&self.particles);
    }

    /// Run one frame without publishing it.
    pub fn advance(&mut self) {
        self.forces.fill(DVec3::ZERO);

        for (i, (particle, force)) in self
            .particles
            .iter()
            .zip(self.forces.iter_mut())
            .enumerate()
        {
            let p = particle.position();

            *force += boundary_attraction(p);

            for (j, other) in self.particles.iter().enumerate() {
                if i == j {
                    continue;
                }
                *force += pairwise_repulsion(p, other.position());
            }
        }

        for (particle, force) in self.particles.iter_mut().zip(&self.forces) {
            particle.set_position(integrate(particle.position(), *force));
        }

        self.clamp_to_disk();
        self.frame += 1;

        log::trace!(
            "frame {}: max xy radius {:.6}",
            self.frame,
            self.max_xy_radius()
        );
    }

    /// Project every particle that left the unit disk back onto its edge.
    pub fn clamp_to_disk(&mut self) {
        for particle in &mut self.particles {
            particle.set_position(clamp_to_disk(particle.position()));
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of completed steps
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn max_xy_radius(&self) -> f32 {
        self.particles
            .iter()
            .map(Particle::xy_radius)
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_rejects_empty_field() {
        assert!(matches!(
            ParticleField::initialize(1, 0),
            Err(FieldError::EmptyField)
        ));
        assert!(matches!(
            ParticleField::from_positions(Vec::<Vec3>::new()),
            Err(FieldError::EmptyField)
        ));
    }

    #[test]
    fn test_initial_positions_lie_in_cube() {
        let field = ParticleField::initialize(3, 64).unwrap();
        assert_eq!(field.len(), 64);
        assert_eq!(field.frame(), 0);

        for particle in field.particles() {
            for c in particle.position {
                assert!((-1.0..1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_step_publishes_every_particle() {
        let mut field = ParticleField::initialize(5, 12).unwrap();
        let mut snapshot: Vec<Particle> = Vec::new();

        field.step(&mut snapshot);
        assert_eq!(snapshot.len(), 12);
        assert_eq!(snapshot.as_slice(), field.particles());

        field.step(&mut snapshot);
        assert_eq!(snapshot.len(), 12);
        assert_eq!(field.frame(), 2);
    }

    #[test]
    fn test_particle_at_origin_stays_put() {
        let mut field = ParticleField::from_positions([Vec3::ZERO]).unwrap();
        for _ in 0..10 {
            field.advance();
        }
        assert_eq!(field.particles()[0].position(), Vec3::ZERO);
    }
}
