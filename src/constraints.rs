use crate::kinematic_traits::{SERVO_MAX_DEG, SERVO_MIN_DEG};
use crate::kinematics_error::KinematicsError;

/// Per-joint angle limits in degrees. Every range is finite, ordered and lies inside
/// the servo domain [0, 180]; the constructors guarantee it, so the fields are private.
#[derive(Debug, Clone, PartialEq)]
pub struct JointLimits {
    from: Vec<f64>,
    to: Vec<f64>,
}

impl JointLimits {
    /// Limits narrowed to the servo domain. Swapped bounds are put in order.
    /// Non-finite bounds are rejected.
    pub fn new(from: Vec<f64>, to: Vec<f64>) -> Result<Self, KinematicsError> {
        KinematicsError::check_dof(from.len(), to.len())?;
        if let Some(joint) = (0..from.len()).find(|&i| !(from[i].is_finite() && to[i].is_finite())) {
            return Err(KinematicsError::InvalidLimits { joint, from: from[joint], to: to[joint] });
        }
        let (from, to) = from.iter().zip(&to)
            .map(|(&a, &b)| {
                let a = a.clamp(SERVO_MIN_DEG, SERVO_MAX_DEG);
                let b = b.clamp(SERVO_MIN_DEG, SERVO_MAX_DEG);
                (a.min(b), a.max(b))
            })
            .unzip();
        Ok(JointLimits { from, to })
    }

    /// Full servo range [0, 180] for every joint.
    pub fn servo_range(dof: usize) -> Self {
        JointLimits {
            from: vec![SERVO_MIN_DEG; dof],
            to: vec![SERVO_MAX_DEG; dof],
        }
    }

    pub fn dof(&self) -> usize {
        self.from.len()
    }

    /// Lower limit per joint
    pub fn from(&self) -> &[f64] {
        &self.from
    }

    /// Upper limit per joint, never less than the lower one
    pub fn to(&self) -> &[f64] {
        &self.to
    }

    /// Brings the value into the range of the given joint.
    pub fn clamp(&self, joint: usize, degrees: f64) -> Result<f64, KinematicsError> {
        KinematicsError::check_index(joint, self.dof())?;
        Ok(degrees.clamp(self.from[joint], self.to[joint]))
    }

    /// True if every angle is within the range of its joint.
    pub fn compliant(&self, angles: &[f64]) -> bool {
        angles.len() == self.dof()
            && angles.iter().enumerate()
            .all(|(i, &angle)| angle >= self.from[i] && angle <= self.to[i])
    }

    /// Centre of each joint range.
    pub fn centers(&self) -> Vec<f64> {
        self.from.iter().zip(&self.to).map(|(a, b)| (a + b) / 2.0).collect()
    }
}
