//! # Disturbance
//!
//! One-shot random velocity kicks. Each particle gets a uniformly distributed
//! magnitude in `[0, max_speed]` along a uniformly distributed direction;
//! positions are left alone.

use std::f32::consts::TAU;

use fastrand::Rng;
use glam::Vec3;

/// Standard normal sample (Box-Muller).
pub fn standard_normal(rng: &mut Rng) -> f32 {
    // 1 - [0, 1) keeps ln away from zero
    let u1 = 1.0 - rng.f32();
    let u2 = rng.f32();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Unit vector uniformly distributed on the sphere.
///
/// Normalizes a standard normal 3-vector, drawing again on the (rare) exact
/// zero.
pub fn random_direction(rng: &mut Rng) -> Vec3 {
    loop {
        let v = Vec3::new(standard_normal(rng), standard_normal(rng), standard_normal(rng));
        if v != Vec3::ZERO {
            return v.normalize();
        }
    }
}

/// Add a random kick of at most `max_speed` to every velocity.
pub fn disturb(velocities: &mut [Vec3], max_speed: f32, rng: &mut Rng) {
    for v in velocities {
        let scale = rng.f32();
        *v += scale * max_speed * random_direction(rng);
    }
}
