extern crate nalgebra as na;
use na::{DVector, Matrix3, Matrix3xX, Vector3};
use tracing::warn;
use crate::kinematic_traits::Kinematics;
use crate::kinematics_error::KinematicsError;
use crate::utils::is_valid;

/// Default perturbation of a joint when differentiating numerically, degrees.
pub const DEFAULT_EPSILON_DEG: f64 = 0.01;

/// Default damping factor of the least-squares solver.
pub const DEFAULT_DAMPING: f64 = 0.05;

/// Singular values below this are treated as zero by the pseudoinverse fallback.
const PSEUDO_INVERSE_EPSILON: f64 = 1e-10;

/// Struct representing the positional Jacobian matrix
pub struct Jacobian {
    /// A 3xN matrix, column j is the derivative of the end-effector position
    /// with respect to the angle of joint j, per radian.
    matrix: Matrix3xX<f64>,

    /// The disturbance value (degrees) used for computing the Jacobian
    epsilon: f64,
}

impl Jacobian {
    /// Constructs a new Jacobian struct by computing the Jacobian matrix for the given robot and joint configuration
    ///
    /// # Arguments
    ///
    /// * `robot` - A reference to the robot implementing the Kinematics trait
    /// * `joints` - Joint angles in degrees
    /// * `epsilon` - Perturbation in degrees used for numerical differentiation. Too small
    ///   values drown in rounding noise of the forward kinematics, too large values
    ///   measure the secant rather than the tangent.
    pub fn new(robot: &impl Kinematics, joints: &[f64], epsilon: f64) -> Result<Self, KinematicsError> {
        let matrix = compute_jacobian(robot, joints, epsilon)?;
        Ok(Self { matrix, epsilon })
    }

    pub fn matrix(&self) -> &Matrix3xX<f64> {
        &self.matrix
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// First-order change of the end-effector position for the given joint changes (radians).
    pub fn predict(&self, joint_deltas: &DVector<f64>) -> Vector3<f64> {
        &self.matrix * joint_deltas
    }

    /// Joint angle changes (radians) that move the end-effector by `position_delta`,
    /// see [`damped_least_squares`].
    pub fn damped_least_squares(&self, position_delta: &Vector3<f64>, damping: f64) -> DVector<f64> {
        damped_least_squares(&self.matrix, position_delta, damping)
    }
}

/// Function to compute the positional Jacobian matrix for a given robot and joint configuration
///
/// Forward difference: every joint is perturbed alone by `epsilon` degrees, the derivative
/// is expressed per radian.
pub fn compute_jacobian(robot: &impl Kinematics, joints: &[f64], epsilon: f64)
    -> Result<Matrix3xX<f64>, KinematicsError> {
    let current_position = robot.position(joints)?;
    let step = epsilon.to_radians();
    let mut jacobian = Matrix3xX::zeros(joints.len());
    let mut perturbed = joints.to_vec();

    for i in 0..joints.len() {
        perturbed[i] = joints[i] + epsilon;
        let perturbed_position = robot.position(&perturbed)?;
        perturbed[i] = joints[i];

        jacobian.set_column(i, &((perturbed_position - current_position) / step));
    }

    Ok(jacobian)
}

/// Damped least-squares solution of `J·Δθ = Δp`:
///
/// `Δθ = Jᵗ·(J·Jᵗ + λ²·I)⁻¹·Δp`
///
/// Small `damping` (λ) gives the nearly exact minimum norm solution that grows unbounded
/// near singular configurations, large `damping` keeps the step short at the price of
/// slower convergence. If the regularized matrix still cannot be inverted, falls back to
/// the pseudoinverse of `J`. If that fails too, returns a zero step. The returned vector
/// has one entry per Jacobian column, radians.
pub fn damped_least_squares(jacobian: &Matrix3xX<f64>, position_delta: &Vector3<f64>, damping: f64)
    -> DVector<f64> {
    let regularized: Matrix3<f64> =
        jacobian * jacobian.transpose() + Matrix3::identity() * (damping * damping);

    if let Some(inverse) = regularized.try_inverse() {
        let joint_deltas = jacobian.transpose() * (inverse * position_delta);
        if is_valid(joint_deltas.as_slice()) {
            return joint_deltas;
        }
    }

    warn!(damping, "regularized matrix is not invertible, using pseudoinverse");
    match jacobian.clone().pseudo_inverse(PSEUDO_INVERSE_EPSILON) {
        Ok(pseudo_inverse) => {
            let joint_deltas = pseudo_inverse * position_delta;
            if is_valid(joint_deltas.as_slice()) {
                return joint_deltas;
            }
            warn!("pseudoinverse produced non-finite values, not moving");
        }
        Err(err) => {
            warn!(err, "unable to compute the pseudoinverse of the Jacobian, not moving");
        }
    }
    DVector::zeros(jacobian.ncols())
}
