//! Energy bookkeeping for diagnostics and tests.

use glam::Vec3;

use crate::lattice::{RestSpring, CORNER_COUNT, CORNER_INDICES};
use crate::params::GRAVITY;

#[must_use]
pub fn kinetic(velocities: &[Vec3], particle_mass: f32) -> f32 {
    0.5 * particle_mass * velocities.iter().map(|v| v.length_squared()).sum::<f32>()
}

/// Elastic energy stored in the lattice springs.
#[must_use]
pub fn spring_potential(positions: &[Vec3], springs: &[RestSpring], stiffness: f32) -> f32 {
    springs
        .iter()
        .map(|s| {
            let stretch = (positions[s.b] - positions[s.a]).length() - s.rest_length;
            0.5 * stiffness * stretch * stretch
        })
        .sum()
}

/// Elastic energy of the zero-rest-length corner anchors.
#[must_use]
pub fn external_potential(
    positions: &[Vec3],
    anchors: &[Vec3; CORNER_COUNT],
    stiffness: f32,
) -> f32 {
    anchors
        .iter()
        .zip(CORNER_INDICES)
        .map(|(anchor, i)| 0.5 * stiffness * (*anchor - positions[i]).length_squared())
        .sum()
}

/// Potential energy in the gravity field, zero at `y = 0`.
#[must_use]
pub fn gravity_potential(positions: &[Vec3], particle_mass: f32) -> f32 {
    particle_mass * GRAVITY * positions.iter().map(|p| p.y).sum::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinetic() {
        let v = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)];
        assert!((kinetic(&v, 2.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_spring_potential_of_stretched_spring() {
        let springs = [RestSpring {
            a: 0,
            b: 1,
            rest_length: 1.0,
        }];
        let p = [Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)];
        assert!((spring_potential(&p, &springs, 4.0) - 0.5).abs() < 1e-6);
    }
}
