//! Forward kinematics and small-step inverse kinematics for hobby-servo robot arms
//!
//! The arm is described by a Denavit-Hartenberg table, one row per servo. Servo angles are
//! degrees in the range [0, 180]; a fixed offset per link maps them onto the DH joint angle.
//! The crate computes the end-effector pose for any set of servo angles, and moves the
//! end-effector by a small Cartesian displacement by iterating a damped least-squares
//! solution over a numerically estimated Jacobian.
//!
//! # Features
//!
//! - Forward kinematics of arbitrary serial DH chains, deterministic and continuous
//!   (no snapping to known poses).
//! - Numeric positional Jacobian with a tunable perturbation.
//! - Damped least-squares solver that stays finite near singular configurations, with
//!   a pseudoinverse fallback.
//! - Cartesian step controller with iteration budget and convergence tolerance. Joint limits
//!   are enforced by clamping; running out of iterations is a normal, best-effort outcome.
//! - Joint angle store with per-joint observers bound at construction time.
//! - Transmitters for the common `#<id>P<pulse>T<time>` serial servo controller boards,
//!   with linear or per-servo calibrated pulse mapping, and a dry-run variant.
//! - Arm description and settings from YAML (feature `allow_filesystem`).
//!
//! # Example
//!
//! ```
//! use servo_arm_kinematics::constraints::JointLimits;
//! use servo_arm_kinematics::controller::ArmController;
//! use servo_arm_kinematics::kinematics_impl::DhKinematics;
//! use servo_arm_kinematics::parameters::Parameters;
//! use servo_arm_kinematics::settings::MotionSettings;
//! use servo_arm_kinematics::transmitter::{DryRunTransmitter, PulseMapping};
//!
//! let parameters = Parameters::desk_arm();
//! let home = parameters.home.clone();
//! let mut arm = ArmController::new(
//!     DhKinematics::new(parameters),
//!     &home,
//!     JointLimits::servo_range(6),
//!     MotionSettings::default(),
//!     DryRunTransmitter::new(PulseMapping::Linear, 1000),
//! ).unwrap();
//!
//! // 0.5 mm along x
//! let outcome = arm.step_cartesian(0.5, 0.0, 0.0, 1.0, 5).unwrap();
//! assert!(outcome.converged);
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

pub mod parameter_error;
pub mod kinematics_error;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod constraints;

pub mod jacobian;

pub mod joint_store;

pub mod settings;

pub mod transmitter;

pub mod controller;

#[cfg(test)]
mod tests;
