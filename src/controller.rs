//! Cartesian step controller and the host-facing joint operations.
//!
//! [`ArmController`] owns everything with state: the kinematic model, the joint angle store,
//! the motion settings and the transmitter. It is synchronous and single-threaded. A host
//! that shares it between threads puts it behind a `Mutex`.

use nalgebra::Vector3;
use tracing::debug;

use crate::constraints::JointLimits;
use crate::jacobian::Jacobian;
use crate::joint_store::{BoxedObserver, JointAngleStore};
use crate::kinematic_traits::{forward_kinematics, Kinematics, Pose, Position};
use crate::kinematics_error::KinematicsError;
use crate::settings::MotionSettings;
use crate::transmitter::Transmitter;
use crate::utils::{format_joints, is_valid};

/// How a Cartesian step ended. Running out of iterations is not an error: the arm stays
/// where the last iteration put it and `converged` is false.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Joint angles after the step, degrees.
    pub angles: Vec<f64>,

    /// Iterations actually run.
    pub iterations: usize,

    /// True if the position error dropped below the tolerance.
    pub converged: bool,

    /// Displacement actually achieved, measured from where the step started.
    pub achieved: Vector3<f64>,

    /// Distance between the requested and the achieved displacement.
    pub residual: f64,
}

pub struct ArmController<K: Kinematics, T: Transmitter> {
    robot: K,
    store: JointAngleStore,
    settings: MotionSettings,
    transmitter: T,
    home: Vec<f64>,
}

impl<K: Kinematics, T: Transmitter> ArmController<K, T> {
    /// Creates the controller with the arm at `home`. Nothing is transmitted until the
    /// first command; call [`ArmController::move_home`] to synchronize the hardware.
    pub fn new(robot: K, home: &[f64], limits: JointLimits, settings: MotionSettings, transmitter: T)
               -> Result<Self, KinematicsError> {
        KinematicsError::check_dof(robot.dof(), home.len())?;
        let store = JointAngleStore::new(home, limits)?;
        Ok(ArmController {
            robot,
            home: store.snapshot(),
            store,
            settings,
            transmitter,
        })
    }

    /// Binds angle observers, one per joint in joint order.
    pub fn with_observers(mut self, observers: Vec<Option<BoxedObserver>>)
        -> Result<Self, KinematicsError> {
        self.store = self.store.with_observers(observers)?;
        Ok(self)
    }

    pub fn robot(&self) -> &K {
        &self.robot
    }

    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut MotionSettings {
        &mut self.settings
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }

    /// Current joint angles, degrees.
    pub fn angles(&self) -> &[f64] {
        self.store.angles()
    }

    pub fn home(&self) -> &[f64] {
        &self.home
    }

    /// Pose and position for arbitrary joint angles. Does not touch the arm.
    pub fn forward_kinematics(&self, angles: &[f64]) -> Result<(Pose, Position), KinematicsError> {
        forward_kinematics(&self.robot, angles)
    }

    /// Pose and position of the arm as it is now.
    pub fn current_pose(&self) -> Result<(Pose, Position), KinematicsError> {
        forward_kinematics(&self.robot, self.store.angles())
    }

    /// Moves one joint to the angle (clamped to its limits) and dispatches it.
    /// Returns the angle actually stored. An index outside the arm fails.
    pub fn set_joint(&mut self, joint: usize, degrees: f64) -> Result<f64, KinematicsError> {
        let stored = self.store.set(joint, degrees)?;
        self.dispatch(joint);
        Ok(stored)
    }

    /// Moves one joint by the configured rotation step, up for a positive `direction`,
    /// down for a negative one.
    pub fn jog_joint(&mut self, joint: usize, direction: i8) -> Result<f64, KinematicsError> {
        let current = self.store.get(joint)?;
        let step = self.settings.rotation_step_deg * f64::from(direction.signum());
        self.set_joint(joint, current + step)
    }

    /// Puts every joint to its home angle and dispatches all of them.
    pub fn move_home(&mut self) -> Result<(), KinematicsError> {
        let home = self.home.clone();
        self.store.set_all(&home)?;
        self.send_all_joints();
        Ok(())
    }

    /// Dispatches the current angle of every joint, in joint order.
    pub fn send_all_joints(&mut self) {
        for joint in 0..self.store.dof() {
            self.dispatch(joint);
        }
    }

    /// Moves the end-effector by the displacement using the gain and iteration budget
    /// from the settings.
    pub fn step(&mut self, displacement: &Vector3<f64>) -> Result<StepOutcome, KinematicsError> {
        let (gain, budget) = (self.settings.gain, self.settings.max_iterations);
        self.step_cartesian(displacement.x, displacement.y, displacement.z, gain, budget)
    }

    /// Moves the end-effector by `gain * (dx, dy, dz)` using joint changes only,
    /// orientation unconstrained.
    ///
    /// Each iteration evaluates the Jacobian at the current angles, solves the damped
    /// least-squares problem for the part of the displacement not yet achieved, applies the
    /// clamped result and dispatches every joint. Stops once the achieved displacement is
    /// within the tolerance of the requested one, or when `max_iterations` is spent.
    /// The displacement must be small compared to the reach of the arm.
    pub fn step_cartesian(&mut self, dx: f64, dy: f64, dz: f64, gain: f64, max_iterations: usize)
                          -> Result<StepOutcome, KinematicsError> {
        let target = Vector3::new(dx, dy, dz) * gain;
        let start = self.robot.position(self.store.angles())?;

        let mut achieved = Vector3::zeros();
        let mut residual = target.norm();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations {
            iterations += 1;
            let angles = self.store.snapshot();
            let (_, position) = forward_kinematics(&self.robot, &angles)?;
            let jacobian = Jacobian::new(&self.robot, &angles, self.settings.jacobian_epsilon_deg)?;

            let remaining = target - (position - start);
            let deltas = jacobian.damped_least_squares(&remaining, self.settings.damping);
            if is_valid(deltas.as_slice()) {
                for (joint, delta) in deltas.iter().enumerate() {
                    self.store.set(joint, angles[joint] + delta.to_degrees())?;
                }
            }
            self.send_all_joints();

            achieved = self.robot.position(self.store.angles())? - start;
            residual = (achieved - target).norm();
            debug!(iterations, residual, angles = %format_joints(self.store.angles()), "cartesian step");

            if residual < self.settings.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            debug!(iterations, residual, "cartesian step budget spent, keeping best effort");
        }

        Ok(StepOutcome {
            angles: self.store.snapshot(),
            iterations,
            converged,
            achieved,
            residual,
        })
    }

    fn dispatch(&mut self, joint: usize) {
        let degrees = self.store.angles()[joint];
        // Fire and forget, transmitters log their own failures.
        let _ = self.transmitter.transmit(joint, degrees);
    }
}
