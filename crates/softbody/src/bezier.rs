//! # Bezier Volume
//!
//! The 64 lattice points double as control points of a tricubic Bezier
//! volume. Renderers use it to carry an embedded mesh along with the
//! deforming lattice.

use glam::Vec3;

use crate::lattice::{index, GRID, POINT_COUNT};

/// Cubic Bernstein basis at `t`.
#[must_use]
pub fn bernstein(t: f32) -> [f32; GRID] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t]
}

/// Point of the volume at parametric coordinates `uvw` in `[0, 1]^3`.
#[must_use]
pub fn evaluate(points: &[Vec3; POINT_COUNT], uvw: Vec3) -> Vec3 {
    let bu = bernstein(uvw.x);
    let bv = bernstein(uvw.y);
    let bw = bernstein(uvw.z);

    let mut out = Vec3::ZERO;
    for (zi, wz) in bw.iter().enumerate() {
        for (yi, wy) in bv.iter().enumerate() {
            let wyz = wy * wz;
            for (xi, wx) in bu.iter().enumerate() {
                out += (wx * wyz) * points[index(xi, yi, zi)];
            }
        }
    }
    out
}

/// Map a point of the undeformed cube of `size` into the deformed volume.
#[must_use]
pub fn deform(points: &[Vec3; POINT_COUNT], size: Vec3, point: Vec3) -> Vec3 {
    evaluate(points, point / size + Vec3::splat(0.5))
}
