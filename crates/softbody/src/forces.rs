//! # Force Model
//!
//! Right-hand side of the lattice ODE. Positions evolve with the velocities;
//! velocities evolve with the sum of the internal spring forces, the external
//! anchoring springs, linear damping and gravity, divided by the particle mass.

use glam::Vec3;

use crate::lattice::{RestSpring, CORNER_COUNT, CORNER_INDICES, POINT_COUNT};
use crate::params::{SimParams, GRAVITY};
use crate::state::{self, StateVector};

/// Springs shorter than this exert no force; their direction is undefined.
pub const MIN_SPRING_LENGTH: f32 = 1e-6;

/// Per-particle forces.
pub type Forces = [Vec3; POINT_COUNT];

/// Everything the derivative needs besides the state itself.
///
/// The model only borrows its inputs. `anchors` are the control frame's world
/// corners, read once per step since the frame does not move during one.
#[derive(Clone, Copy, Debug)]
pub struct ForceModel<'a> {
    pub params: &'a SimParams,
    pub springs: &'a [RestSpring],
    pub anchors: &'a [Vec3; CORNER_COUNT],
}

impl ForceModel<'_> {
    /// `dy/dt` for the flat state.
    #[must_use]
    pub fn derivative(&self, y: &StateVector) -> StateVector {
        let (positions, velocities) = state::from_array(y);
        let forces = self.total_forces(&positions, &velocities);
        let inv_mass = 1.0 / self.params.particle_mass();
        let accelerations = forces.map(|f| f * inv_mass);
        state::to_array(&velocities, &accelerations)
    }

    /// Sum of every enabled force on each particle.
    #[must_use]
    pub fn total_forces(
        &self,
        positions: &[Vec3; POINT_COUNT],
        velocities: &[Vec3; POINT_COUNT],
    ) -> Forces {
        let mut forces = [Vec3::ZERO; POINT_COUNT];
        self.add_internal_spring_forces(positions, &mut forces);
        if self.params.external_springs {
            self.add_external_spring_forces(positions, &mut forces);
        }
        self.add_damping_forces(velocities, &mut forces);
        if self.params.gravity {
            self.add_gravity_forces(&mut forces);
        }
        forces
    }

    /// Hooke's law on every lattice spring, with equal and opposite reactions.
    pub fn add_internal_spring_forces(&self, positions: &[Vec3; POINT_COUNT], forces: &mut Forces) {
        for spring in self.springs {
            let f = spring_force(spring, positions, self.params.internal_stiffness);
            forces[spring.a] += f;
            forces[spring.b] -= f;
        }
    }

    /// Zero-rest-length springs from each lattice corner to its control corner.
    pub fn add_external_spring_forces(&self, positions: &[Vec3; POINT_COUNT], forces: &mut Forces) {
        for (anchor, &i) in self.anchors.iter().zip(CORNER_INDICES.iter()) {
            forces[i] += self.params.external_stiffness * (*anchor - positions[i]);
        }
    }

    pub fn add_damping_forces(&self, velocities: &[Vec3; POINT_COUNT], forces: &mut Forces) {
        for (f, v) in forces.iter_mut().zip(velocities) {
            *f -= self.params.damping * *v;
        }
    }

    pub fn add_gravity_forces(&self, forces: &mut Forces) {
        let weight = Vec3::new(0.0, -GRAVITY * self.params.particle_mass(), 0.0);
        for f in forces.iter_mut() {
            *f += weight;
        }
    }
}

/// Force the spring exerts on its `a` end; `b` receives the negation.
///
/// A stretched spring pulls `a` towards `b`. Degenerate (near zero length)
/// springs yield zero.
#[must_use]
pub fn spring_force(spring: &RestSpring, positions: &[Vec3], stiffness: f32) -> Vec3 {
    let delta = positions[spring.b] - positions[spring.a];
    let length = delta.length();
    if length < MIN_SPRING_LENGTH {
        return Vec3::ZERO;
    }
    let direction = delta / length;
    stiffness * (length - spring.rest_length) * direction
}
