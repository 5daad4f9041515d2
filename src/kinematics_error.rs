//! Errors reported by the kinematics core to its caller

use thiserror::Error;

/// Caller contract violations. Numeric trouble inside the solver and unreachable
/// targets are not errors and never appear here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KinematicsError {
    #[error("joint index {index} is out of range, the arm has {dof} joints")]
    JointIndexOutOfRange { index: usize, dof: usize },

    #[error("expected {expected} joint values, found {found}")]
    DofMismatch { expected: usize, found: usize },

    #[error("limits of joint {joint} are not a finite range ({from}, {to})")]
    InvalidLimits { joint: usize, from: f64, to: f64 },
}

impl KinematicsError {
    /// Fails with [`KinematicsError::DofMismatch`] unless `found` equals `expected`.
    pub fn check_dof(expected: usize, found: usize) -> Result<(), KinematicsError> {
        if expected != found {
            return Err(KinematicsError::DofMismatch { expected, found });
        }
        Ok(())
    }

    /// Fails with [`KinematicsError::JointIndexOutOfRange`] unless `index < dof`.
    pub fn check_index(index: usize, dof: usize) -> Result<(), KinematicsError> {
        if index >= dof {
            return Err(KinematicsError::JointIndexOutOfRange { index, dof });
        }
        Ok(())
    }
}
