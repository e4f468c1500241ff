//! # Constraint Box Collisions
//!
//! Particles are kept inside an axis-aligned box centered at the origin. A
//! particle past a wall by `d` is mirrored back to `bound - e * d` and the
//! velocity component along that axis becomes `-e * v`, where `e` is the
//! collision elasticity.

use glam::Vec3;
use tracing::warn;

/// Reflection passes per particle before falling back to clamping.
pub const MAX_PASSES: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstraintBox {
    pub half_extents: Vec3,
}

/// What [`ConstraintBox::resolve`] did in one call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Individual wall reflections.
    pub reflections: usize,
    /// Particles that hit [`MAX_PASSES`] and were clamped.
    pub clamped: usize,
}

impl ConstraintBox {
    #[must_use]
    pub const fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    #[must_use]
    pub fn min(&self) -> Vec3 {
        -self.half_extents
    }

    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.half_extents
    }

    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.abs().cmple(self.half_extents).all()
    }

    /// Reflect every particle back inside the box.
    pub fn resolve(
        &self,
        positions: &mut [Vec3],
        velocities: &mut [Vec3],
        elasticity: f32,
    ) -> CollisionReport {
        let mut report = CollisionReport::default();
        for (i, (p, v)) in positions.iter_mut().zip(velocities.iter_mut()).enumerate() {
            match self.resolve_particle(p, v, elasticity) {
                Some(reflections) => report.reflections += reflections,
                None => {
                    warn!(
                        particle = i,
                        "collision passes exhausted; clamping to the constraint box"
                    );
                    report.clamped += 1;
                }
            }
        }
        report
    }

    /// Repeat per-axis reflection until the particle is inside.
    ///
    /// Returns the number of reflections, or `None` when the pass budget ran
    /// out and the particle was clamped onto the box with the offending
    /// velocity components zeroed.
    pub fn resolve_particle(
        &self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        elasticity: f32,
    ) -> Option<usize> {
        let mut reflections = 0;
        for _ in 0..MAX_PASSES {
            let mut hit = false;
            for axis in 0..3 {
                let bound = self.half_extents[axis];
                let (p, v) = (&mut position[axis], &mut velocity[axis]);
                if reflect(Face::Lower, -bound, p, v, elasticity)
                    || reflect(Face::Upper, bound, p, v, elasticity)
                {
                    hit = true;
                    reflections += 1;
                }
            }
            if !hit {
                return Some(reflections);
            }
        }

        if self.contains(*position) {
            return Some(reflections);
        }
        for axis in 0..3 {
            let bound = self.half_extents[axis];
            if position[axis].abs() > bound {
                position[axis] = position[axis].clamp(-bound, bound);
                velocity[axis] = 0.0;
            }
        }
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Face {
    Lower,
    Upper,
}

/// Mirror one coordinate about the wall at `wall` if it lies beyond it.
fn reflect(face: Face, wall: f32, position: &mut f32, velocity: &mut f32, elasticity: f32) -> bool {
    let beyond = match face {
        Face::Lower => *position < wall,
        Face::Upper => *position > wall,
    };
    if !beyond {
        return false;
    }
    let depth = *position - wall;
    *position = wall - elasticity * depth;
    *velocity = -elasticity * *velocity;
    true
}
