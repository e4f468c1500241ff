//! # Lattice Topology
//!
//! Reference geometry and spring connectivity of the 4×4×4 jelly lattice.
//!
//! Points are addressed by grid coordinates `(xi, yi, zi)` and flattened as
//! `16 * zi + 4 * yi + xi`. The same parametric [`CubeGrid`] also produces the
//! 2×2×2 corner set of the control frame, so both cubes share one definition
//! of "evenly spaced points in a centered box".

use glam::Vec3;

/// Points per axis of the simulated lattice.
pub const GRID: usize = 4;
/// Number of simulated point masses.
pub const POINT_COUNT: usize = GRID * GRID * GRID;
/// Number of cube corners.
pub const CORNER_COUNT: usize = 8;
/// Lattice indices of the eight geometric corners, in corner-grid order.
pub const CORNER_INDICES: [usize; CORNER_COUNT] = [0, 3, 12, 15, 48, 51, 60, 63];

/// Evenly spaced points filling a box centered at the origin.
///
/// Along every axis coordinate `i` sits at `-0.5 + i / (resolution - 1)`
/// before scaling by the box size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CubeGrid {
    resolution: usize,
}

impl CubeGrid {
    /// The 4×4×4 simulated lattice.
    pub const LATTICE: Self = Self::new(GRID);
    /// The 2×2×2 corners of a cube.
    pub const CORNERS: Self = Self::new(2);

    /// # Panics
    ///
    /// Panics if `resolution < 2`.
    #[must_use]
    pub const fn new(resolution: usize) -> Self {
        assert!(resolution >= 2, "a cube grid needs at least two points per axis");
        Self { resolution }
    }

    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.resolution * self.resolution * self.resolution
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn index(&self, xi: usize, yi: usize, zi: usize) -> usize {
        self.resolution * self.resolution * zi + self.resolution * yi + xi
    }

    /// Normalized coordinate of grid step `i` along one axis.
    #[must_use]
    pub fn coordinate(&self, i: usize) -> f32 {
        -0.5 + i as f32 / (self.resolution - 1) as f32
    }

    /// All grid points scaled by `size`, in index order.
    #[must_use]
    pub fn points(&self, size: Vec3) -> Vec<Vec3> {
        let mut points = vec![Vec3::ZERO; self.len()];
        for zi in 0..self.resolution {
            for yi in 0..self.resolution {
                for xi in 0..self.resolution {
                    let unit = Vec3::new(
                        self.coordinate(xi),
                        self.coordinate(yi),
                        self.coordinate(zi),
                    );
                    points[self.index(xi, yi, zi)] = size * unit;
                }
            }
        }
        points
    }
}

/// An unordered pair of lattice indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Spring {
    pub a: usize,
    pub b: usize,
}

impl Spring {
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

/// A spring together with its fixed design rest length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestSpring {
    pub a: usize,
    pub b: usize,
    pub rest_length: f32,
}

/// Flattened lattice index of grid point `(xi, yi, zi)`.
#[must_use]
pub const fn index(xi: usize, yi: usize, zi: usize) -> usize {
    CubeGrid::LATTICE.index(xi, yi, zi)
}

/// Undeformed positions of all 64 points for a cube of the given size.
#[must_use]
pub fn reference_positions(size: Vec3) -> [Vec3; POINT_COUNT] {
    let mut positions = [Vec3::ZERO; POINT_COUNT];
    positions.copy_from_slice(&CubeGrid::LATTICE.points(size));
    positions
}

/// Springs between grid neighbours along each axis.
#[must_use]
pub fn short_springs() -> Vec<Spring> {
    let mut springs = Vec::with_capacity(3 * GRID * GRID * (GRID - 1));
    for_each_point(|xi, yi, zi| {
        let from = index(xi, yi, zi);
        if xi + 1 < GRID {
            springs.push(Spring::new(from, index(xi + 1, yi, zi)));
        }
        if yi + 1 < GRID {
            springs.push(Spring::new(from, index(xi, yi + 1, zi)));
        }
        if zi + 1 < GRID {
            springs.push(Spring::new(from, index(xi, yi, zi + 1)));
        }
    });
    springs
}

/// Both diagonals of every unit square of the grid, in all three planes.
#[must_use]
pub fn face_diagonal_springs() -> Vec<Spring> {
    let last = GRID - 1;
    let mut springs = Vec::with_capacity(6 * GRID * last * last);
    for_each_point(|xi, yi, zi| {
        let from = index(xi, yi, zi);
        // xy plane
        if xi < last && yi < last {
            springs.push(Spring::new(from, index(xi + 1, yi + 1, zi)));
        }
        if xi < last && yi > 0 {
            springs.push(Spring::new(from, index(xi + 1, yi - 1, zi)));
        }
        // yz plane
        if yi < last && zi < last {
            springs.push(Spring::new(from, index(xi, yi + 1, zi + 1)));
        }
        if yi < last && zi > 0 {
            springs.push(Spring::new(from, index(xi, yi + 1, zi - 1)));
        }
        // zx plane
        if zi < last && xi < last {
            springs.push(Spring::new(from, index(xi + 1, yi, zi + 1)));
        }
        if zi < last && xi > 0 {
            springs.push(Spring::new(from, index(xi - 1, yi, zi + 1)));
        }
    });
    springs
}

/// Short springs followed by the face diagonals.
#[must_use]
pub fn all_springs() -> Vec<Spring> {
    let mut springs = short_springs();
    springs.extend(face_diagonal_springs());
    springs
}

#[must_use]
pub const fn corner_indices() -> [usize; CORNER_COUNT] {
    CORNER_INDICES
}

/// Reference positions of the eight corner points.
#[must_use]
pub fn corner_positions(size: Vec3) -> [Vec3; CORNER_COUNT] {
    let positions = reference_positions(size);
    CORNER_INDICES.map(|i| positions[i])
}

/// Attach rest lengths measured on the undeformed `reference` geometry.
#[must_use]
pub fn with_rest_lengths(springs: &[Spring], reference: &[Vec3]) -> Vec<RestSpring> {
    springs
        .iter()
        .map(|s| RestSpring {
            a: s.a,
            b: s.b,
            rest_length: (reference[s.b] - reference[s.a]).length(),
        })
        .collect()
}

fn for_each_point(mut f: impl FnMut(usize, usize, usize)) {
    for zi in 0..GRID {
        for yi in 0..GRID {
            for xi in 0..GRID {
                f(xi, yi, zi);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid_coords(i: usize) -> (i32, i32, i32) {
        ((i % 4) as i32, ((i / 4) % 4) as i32, (i / 16) as i32)
    }

    #[test]
    fn test_spring_counts() {
        assert_eq!(short_springs().len(), 144);
        assert_eq!(face_diagonal_springs().len(), 216);
        assert_eq!(all_springs().len(), 360);
    }

    #[test]
    fn test_short_springs_are_axis_neighbours() {
        for s in short_springs() {
            let (ax, ay, az) = grid_coords(s.a);
            let (bx, by, bz) = grid_coords(s.b);
            let d = [(bx - ax).abs(), (by - ay).abs(), (bz - az).abs()];
            assert_eq!(d.iter().sum::<i32>(), 1, "{s:?}");
        }
    }

    #[test]
    fn test_diagonals_span_one_face() {
        for s in face_diagonal_springs() {
            let (ax, ay, az) = grid_coords(s.a);
            let (bx, by, bz) = grid_coords(s.b);
            let d = [(bx - ax).abs(), (by - ay).abs(), (bz - az).abs()];
            assert_eq!(d.iter().filter(|&&c| c == 1).count(), 2, "{s:?}");
            assert_eq!(d.iter().filter(|&&c| c == 0).count(), 1, "{s:?}");
        }
    }

    #[test]
    fn test_springs_are_unique() {
        let mut seen = HashSet::new();
        for s in all_springs() {
            let key = (s.a.min(s.b), s.a.max(s.b));
            assert!(seen.insert(key), "duplicate spring {key:?}");
        }
    }

    #[test]
    fn test_reference_positions_unit_cube() {
        let p = reference_positions(Vec3::ONE);
        assert_eq!(p[0], Vec3::splat(-0.5));
        assert_eq!(p[63], Vec3::splat(0.5));
        let expected = Vec3::new(-0.5 + 1.0 / 3.0, -0.5 + 2.0 / 3.0, 0.5);
        assert!((p[index(1, 2, 3)] - expected).length() < 1e-6);
    }

    #[test]
    fn test_corner_grid_matches_lattice_corners() {
        let size = Vec3::new(2.0, 1.0, 3.0);
        let corners = CubeGrid::CORNERS.points(size);
        let lattice_corners = corner_positions(size);
        for (c, l) in corners.iter().zip(lattice_corners.iter()) {
            assert!((*c - *l).length() < 1e-6);
        }
    }

    #[test]
    fn test_rest_lengths() {
        let reference = reference_positions(Vec3::splat(3.0));
        let rest = with_rest_lengths(&all_springs(), &reference);
        for s in &rest[..144] {
            assert!((s.rest_length - 1.0).abs() < 1e-6);
        }
        for s in &rest[144..] {
            assert!((s.rest_length - 2.0_f32.sqrt()).abs() < 1e-6);
        }
    }
}
