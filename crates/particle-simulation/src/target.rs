//! Boundary between the simulation and whatever draws it

use particle_physics::Particle;

/// Receives the full position array once per step.
///
/// Implementors get read-only access and must copy what they need; the
/// field keeps ownership of its particles.
pub trait RenderTarget {
    fn upload_positions(&mut self, particles: &[Particle]);
}

/// Headless target keeping only the most recent snapshot
impl RenderTarget for Vec<Particle> {
    fn upload_positions(&mut self, particles: &[Particle]) {
        self.clear();
        self.extend_from_slice(particles);
    }
}
