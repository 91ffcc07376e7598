//! Force laws of the disk field
//!
//! Positions are single precision, forces are accumulated in double precision.
//! Every division is guarded by an explicit zero check, so degenerate
//! configurations contribute zero force instead of NaN.

use crate::constants::*;
use glam::{DVec3, Vec3};

/// Length of the XY projection of `p`
pub fn xy_radius(p: Vec3) -> f32 {
    (p.x * p.x + p.y * p.y).sqrt()
}

/// Pull toward the point of the unit circle above or below `p`.
///
/// The attractor lies in the Z = 0 plane, so this term also flattens the
/// particle toward Z = 0. A particle on the Z axis has no defined direction
/// and feels nothing.
pub fn boundary_attraction(p: Vec3) -> DVec3 {
    let radius = xy_radius(p);
    if radius <= 0.0 {
        return DVec3::ZERO;
    }

    let attractor = Vec3::new(p.x / radius, p.y / radius, 0.0);
    ((attractor - p) * ATTRACTION_STRENGTH).as_dvec3()
}

/// Repulsion felt by a particle at `p` from another particle at `other`.
/// F = k * r̂ / r², pointing away from `other`
pub fn pairwise_repulsion(p: Vec3, other: Vec3) -> DVec3 {
    let direction = (p - other).as_dvec3();
    let sq_distance = direction.length_squared();
    if sq_distance <= 0.0 {
        return DVec3::ZERO;
    }

    let distance = sq_distance.sqrt();
    direction * (REPULSION_STRENGTH / distance / sq_distance)
}

/// Explicit Euler displacement with the fixed time step
pub fn integrate(p: Vec3, force: DVec3) -> Vec3 {
    (p.as_dvec3() + force * TIME_STEP).as_vec3()
}

/// Project a position that left the disk back onto the unit circle and
/// zero its height. Positions inside the disk are returned untouched.
pub fn clamp_to_disk(p: Vec3) -> Vec3 {
    let radius = xy_radius(p);
    if radius <= DISK_RADIUS {
        return p;
    }

    Vec3::new(p.x / radius, p.y / radius, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_attraction_vanishes_on_z_axis() {
        assert_eq!(boundary_attraction(Vec3::ZERO), DVec3::ZERO);
        assert_eq!(boundary_attraction(Vec3::new(0.0, 0.0, 0.7)), DVec3::ZERO);
    }

    #[test]
    fn test_attraction_points_to_unit_circle_and_flattens() {
        let f = boundary_attraction(Vec3::new(0.5, 0.0, 0.4));
        assert!((f.x - 0.125).abs() < EPS);
        assert_eq!(f.y, 0.0);
        assert!((f.z + 0.1).abs() < EPS);

        // Outside the disk the pull is inward
        let f = boundary_attraction(Vec3::new(0.0, -2.0, 0.0));
        assert!((f.y - 0.25).abs() < EPS);
    }

    #[test]
    fn test_attraction_is_zero_on_the_circle() {
        let f = boundary_attraction(Vec3::new(0.6, 0.8, 0.0));
        assert!(f.length() < EPS);
    }

    #[test]
    fn test_repulsion_follows_inverse_square() {
        let f = pairwise_repulsion(Vec3::new(0.5, 0.0, 0.0), Vec3::ZERO);
        // 0.05 / 0.5² along +x
        assert!((f.x - 0.2).abs() < EPS);
        assert_eq!(f.y, 0.0);
        assert_eq!(f.z, 0.0);
    }

    #[test]
    fn test_repulsion_is_antisymmetric() {
        let a = Vec3::new(0.1, -0.3, 0.25);
        let b = Vec3::new(-0.4, 0.2, -0.5);
        let sum = pairwise_repulsion(a, b) + pairwise_repulsion(b, a);
        assert!(sum.length() < EPS);
    }

    #[test]
    fn test_repulsion_between_coincident_particles_is_zero() {
        let p = Vec3::new(0.3, 0.2, 0.1);
        assert_eq!(pairwise_repulsion(p, p), DVec3::ZERO);
    }

    #[test]
    fn test_integrate_uses_fixed_step() {
        let p = integrate(Vec3::new(0.5, 0.0, 0.0), DVec3::new(2.0, -1.0, 0.0));
        assert!((p.x - 0.6).abs() < 1e-6);
        assert!((p.y + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_leaves_inside_untouched() {
        let p = Vec3::new(0.3, -0.4, 0.9);
        assert_eq!(clamp_to_disk(p), p);

        let on_circle = Vec3::new(1.0, 0.0, 0.5);
        assert_eq!(clamp_to_disk(on_circle), on_circle);
    }

    #[test]
    fn test_clamp_projects_outside_onto_circle() {
        let p = clamp_to_disk(Vec3::new(3.0, 4.0, -0.8));
        assert!((p.x - 0.6).abs() < 1e-6);
        assert!((p.y - 0.8).abs() < 1e-6);
        assert_eq!(p.z, 0.0);
        assert!(xy_radius(p) <= DISK_RADIUS + 1e-6);
    }

    #[test]
    fn test_clamp_twice_is_stable() {
        for p in [
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(-1.3, 0.7, 0.2),
            Vec3::new(0.9, 0.9, -0.4),
        ] {
            let once = clamp_to_disk(p);
            let twice = clamp_to_disk(once);
            assert!((twice - once).length() < 1e-6);
            assert_eq!(twice.z, 0.0);
        }
    }
}
