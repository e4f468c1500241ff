//! # Lattice State
//!
//! The authoritative physical state (64 positions and 64 velocities) and the
//! stateless conversion to and from the flat vector the integrator works on.
//! The flat layout is all positions (`x, y, z` per particle) followed by all
//! velocities.

use glam::Vec3;

use crate::lattice::POINT_COUNT;

/// Scalars in the flat state: 3 position and 3 velocity components per particle.
pub const STATE_LEN: usize = 6 * POINT_COUNT;
const VELOCITY_OFFSET: usize = 3 * POINT_COUNT;

/// Flat integrator representation of a [`LatticeState`].
pub type StateVector = [f32; STATE_LEN];

#[derive(Clone, Debug, PartialEq)]
pub struct LatticeState {
    pub positions: [Vec3; POINT_COUNT],
    pub velocities: [Vec3; POINT_COUNT],
}

impl LatticeState {
    /// Particles at the given positions, at rest.
    #[must_use]
    pub fn at_rest(positions: [Vec3; POINT_COUNT]) -> Self {
        Self {
            positions,
            velocities: [Vec3::ZERO; POINT_COUNT],
        }
    }

    #[must_use]
    pub fn to_array(&self) -> StateVector {
        to_array(&self.positions, &self.velocities)
    }

    #[must_use]
    pub fn from_array(state: &StateVector) -> Self {
        let (positions, velocities) = from_array(state);
        Self {
            positions,
            velocities,
        }
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.positions.iter().chain(&self.velocities).all(|v| v.is_finite())
    }
}

impl Default for LatticeState {
    fn default() -> Self {
        Self::at_rest([Vec3::ZERO; POINT_COUNT])
    }
}

/// Pack positions and velocities into the integrator's flat layout.
#[must_use]
pub fn to_array(positions: &[Vec3; POINT_COUNT], velocities: &[Vec3; POINT_COUNT]) -> StateVector {
    let mut state = [0.0; STATE_LEN];
    state[..VELOCITY_OFFSET].copy_from_slice(bytemuck::cast_slice(positions));
    state[VELOCITY_OFFSET..].copy_from_slice(bytemuck::cast_slice(velocities));
    state
}

/// Unpack the integrator's flat layout into positions and velocities.
#[must_use]
pub fn from_array(state: &StateVector) -> ([Vec3; POINT_COUNT], [Vec3; POINT_COUNT]) {
    let mut positions = [Vec3::ZERO; POINT_COUNT];
    let mut velocities = [Vec3::ZERO; POINT_COUNT];
    positions.copy_from_slice(bytemuck::cast_slice(&state[..VELOCITY_OFFSET]));
    velocities.copy_from_slice(bytemuck::cast_slice(&state[VELOCITY_OFFSET..]));
    (positions, velocities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_layout() {
        let mut state = LatticeState::default();
        state.positions[2] = Vec3::new(1.0, 2.0, 3.0);
        state.velocities[63] = Vec3::new(-4.0, -5.0, -6.0);

        let flat = state.to_array();
        assert_eq!(&flat[6..9], &[1.0, 2.0, 3.0]);
        assert_eq!(&flat[STATE_LEN - 3..], &[-4.0, -5.0, -6.0]);
        assert_eq!(LatticeState::from_array(&flat), state);
    }

    #[test]
    fn test_non_finite_detection() {
        let mut state = LatticeState::default();
        assert!(state.is_finite());
        state.velocities[10].y = f32::NAN;
        assert!(!state.is_finite());
    }
}
