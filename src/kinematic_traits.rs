//! Defines the core types and the [`Kinematics`] trait shared by the solver components.

extern crate nalgebra as na;

use na::{Matrix4, Vector3};
use crate::kinematics_error::KinematicsError;

/// Pose is the cumulative homogeneous transform from the base frame to the end-effector.
/// ```
/// extern crate nalgebra as na;
/// use na::Matrix4;
///
/// type Pose = Matrix4<f64>;
///
/// // The arm base itself, no rotation and no translation.
/// let base: Pose = Matrix4::identity();
/// assert_eq!(base[(3, 3)], 1.0);
/// ```
pub type Pose = Matrix4<f64>;

/// Position of the end-effector, the translation column of the [`Pose`].
pub type Position = Vector3<f64>;

/// Lower bound of the servo angle domain, degrees.
pub const SERVO_MIN_DEG: f64 = 0.0;

/// Upper bound of the servo angle domain, degrees.
pub const SERVO_MAX_DEG: f64 = 180.0;

/// The centre of the servo range, where the reference arm is homed.
pub const SERVO_CENTER_DEG: f64 = 90.0;

pub trait Kinematics {
    /// Number of joints (degrees of freedom) this model expects.
    fn dof(&self) -> usize;

    /// Pose of the end-effector for the given joint angles in degrees.
    /// Must be a pure, deterministic function of `joints`.
    fn forward(&self, joints: &[f64]) -> Result<Pose, KinematicsError>;

    /// Cumulative pose after every link, base link first. The last entry equals
    /// the value returned by [`Kinematics::forward`].
    fn forward_with_link_poses(&self, joints: &[f64]) -> Result<Vec<Pose>, KinematicsError>;

    /// Position of the end-effector for the given joint angles in degrees.
    fn position(&self, joints: &[f64]) -> Result<Position, KinematicsError> {
        Ok(position_of(&self.forward(joints)?))
    }
}

/// Extracts the translation column from the homogeneous transform.
pub fn position_of(pose: &Pose) -> Position {
    Vector3::new(pose[(0, 3)], pose[(1, 3)], pose[(2, 3)])
}

/// Forward kinematics returning both the pose and the position extracted from it.
pub fn forward_kinematics(robot: &impl Kinematics, joints: &[f64])
    -> Result<(Pose, Position), KinematicsError> {
    let pose = robot.forward(joints)?;
    let position = position_of(&pose);
    Ok((pose, position))
}
