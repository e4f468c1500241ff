//! # Simulation Parameters
//!
//! Tunables that may change at any time ([`SimParams`]) and scene geometry that
//! is fixed for one run ([`SceneConfig`]). Both deserialize from partial JSON;
//! missing fields take the defaults below.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::lattice::POINT_COUNT;

/// Gravitational acceleration in m/s².
pub const GRAVITY: f32 = 9.81;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Fixed integration step in seconds.
    pub dt: f32,
    /// Total mass of the lattice, spread evenly over the particles.
    pub mass: f32,
    pub internal_stiffness: f32,
    pub external_stiffness: f32,
    /// Linear viscous drag coefficient.
    pub damping: f32,
    /// Restitution applied on wall contact, in `[0, 1]`.
    pub collision_elasticity: f32,
    /// Largest speed a single disturbance can add to a particle.
    pub disturbance_velocity: f32,
    /// Pull the lattice corners towards the control frame.
    pub external_springs: bool,
    pub gravity: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            dt: 0.005,
            mass: 1.0,
            internal_stiffness: 50.0,
            external_stiffness: 10.0,
            damping: 0.03,
            collision_elasticity: 0.7,
            disturbance_velocity: 10.0,
            external_springs: true,
            gravity: false,
        }
    }
}

impl SimParams {
    /// Mass of a single particle.
    #[must_use]
    pub fn particle_mass(&self) -> f32 {
        self.mass / POINT_COUNT as f32
    }

    /// Check that every value is physically meaningful.
    ///
    /// The simulation itself never calls this; it is for the layer that
    /// accepts values from users or files.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ParamError> {
        positive("dt", self.dt)?;
        positive("mass", self.mass)?;
        non_negative("internal_stiffness", self.internal_stiffness)?;
        non_negative("external_stiffness", self.external_stiffness)?;
        non_negative("damping", self.damping)?;
        non_negative("disturbance_velocity", self.disturbance_velocity)?;
        within("collision_elasticity", self.collision_elasticity, 0.0, 1.0)
    }
}

/// Geometry fixed for the lifetime of a [`crate::Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Edge lengths of the lattice and of the control cube.
    pub cube_size: Vec3,
    /// Half-extents of the constraint box centered at the origin.
    pub constraint_half_extents: Vec3,
    /// Seed for the disturbance generator; random when absent.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cube_size: Vec3::ONE,
            constraint_half_extents: Vec3::new(5.0, 2.5, 2.5),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// # Errors
    ///
    /// Returns an error if a cube edge or a box half-extent is not positive.
    pub fn validate(&self) -> Result<(), ParamError> {
        for (name, v) in [
            ("cube_size", self.cube_size),
            ("constraint_half_extents", self.constraint_half_extents),
        ] {
            positive(name, v.min_element())?;
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ParamError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParamError::NonFinite { name })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ParamError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ParamError> {
    within(name, value, 0.0, f32::INFINITY)
}

fn within(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ParamError> {
    finite(name, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ParamError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimParams::default().validate().is_ok());
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_particle_mass_sums_to_total() {
        for mass in [0.5_f32, 1.0, 3.0, 64.0, 1e-3] {
            let params = SimParams {
                mass,
                ..SimParams::default()
            };
            let total = params.particle_mass() * POINT_COUNT as f32;
            assert!((total - mass).abs() <= mass * 1e-6, "mass={mass} total={total}");
        }
    }

    #[test]
    fn test_elasticity_out_of_range() {
        let params = SimParams {
            collision_elasticity: 1.5,
            ..SimParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::OutOfRange {
                name: "collision_elasticity",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_dt() {
        let params = SimParams {
            dt: 0.0,
            ..SimParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonPositive { name: "dt", .. })
        ));
    }

    #[test]
    fn test_nan_is_rejected() {
        let params = SimParams {
            damping: f32::NAN,
            ..SimParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamError::NonFinite { name: "damping" })
        ));
    }

    #[test]
    fn test_zero_size_scene_is_rejected() {
        let scene = SceneConfig {
            cube_size: Vec3::new(1.0, 0.0, 1.0),
            ..SceneConfig::default()
        };
        assert!(scene.validate().is_err());
    }
}
