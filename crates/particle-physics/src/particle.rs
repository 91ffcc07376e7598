//! Particle record shared by the simulation and the GPU vertex buffer

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A massless, velocity-free point in the field.
///
/// Laid out as three packed `f32`s so a slice of particles can be written
/// straight into a `Float32x3` vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in 3D space
    pub position: [f32; 3],
}

impl Particle {
    pub fn new(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position.to_array();
    }

    /// Distance of the XY projection from the origin
    pub fn xy_radius(&self) -> f32 {
        crate::forces::xy_radius(self.position())
    }
}
