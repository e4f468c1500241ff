//! # Control Frame
//!
//! The rigid cube the user drags around. It is never simulated: its pose is
//! set from outside and the lattice corners are pulled towards its corners.

use glam::{Mat4, Quat, Vec3};

use crate::lattice::{CubeGrid, CORNER_COUNT};

/// Rigid cube with a position and a pitch/yaw/roll orientation.
///
/// Every setter rebuilds the cached world transform, so [`Self::matrix`] and
/// [`Self::world_corners`] always reflect the latest pose.
#[derive(Clone, Debug)]
pub struct ControlFrame {
    position: Vec3,
    pitch: f32,
    yaw: f32,
    roll: f32,
    local_corners: [Vec3; CORNER_COUNT],
    matrix: Mat4,
}

impl ControlFrame {
    /// A frame at the origin with no rotation whose cube has the given size.
    #[must_use]
    pub fn new(size: Vec3) -> Self {
        let mut local_corners = [Vec3::ZERO; CORNER_COUNT];
        local_corners.copy_from_slice(&CubeGrid::CORNERS.points(size));
        Self {
            position: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            local_corners,
            matrix: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_matrix();
    }

    /// Rotation about x, in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        self.update_matrix();
    }

    /// Rotation about y, in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_matrix();
    }

    /// Rotation about z, in radians.
    #[must_use]
    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn set_roll(&mut self, roll: f32) {
        self.roll = roll;
        self.update_matrix();
    }

    /// `Rz(roll) * Ry(yaw) * Rx(pitch)`: pitch is applied first.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::ZYX, self.roll, self.yaw, self.pitch)
    }

    /// World transform, `T(position) * R(orientation)`.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Corners of the unit cube in frame space, before the transform.
    #[must_use]
    pub fn local_corners(&self) -> &[Vec3; CORNER_COUNT] {
        &self.local_corners
    }

    /// Corners in world space, ordered like [`crate::lattice::CORNER_INDICES`].
    #[must_use]
    pub fn world_corners(&self) -> [Vec3; CORNER_COUNT] {
        self.local_corners.map(|c| self.matrix.transform_point3(c))
    }

    fn update_matrix(&mut self) {
        self.matrix = Mat4::from_rotation_translation(self.orientation(), self.position);
    }
}

impl Default for ControlFrame {
    fn default() -> Self {
        Self::new(Vec3::ONE)
    }
}
