//! Exclusively owned joint angle state.
//!
//! The store is the only place where joint angles live between calls. Every write goes
//! through the joint limits, so the angles are always inside the servo domain. Readers
//! take snapshots, nobody keeps a private mutable copy.
//!
//! Observers (angle displays and the like) are bound to joints by index once, when the
//! store is built, and are told about every write with the value actually stored.

use crate::constraints::JointLimits;
use crate::kinematics_error::KinematicsError;

/// Receives the stored (already clamped) angle of a joint after every write.
pub trait JointObserver {
    fn joint_changed(&mut self, joint: usize, degrees: f64);
}

impl<F> JointObserver for F
where
    F: FnMut(usize, f64),
{
    fn joint_changed(&mut self, joint: usize, degrees: f64) {
        self(joint, degrees)
    }
}

pub type BoxedObserver = Box<dyn JointObserver + Send>;

pub struct JointAngleStore {
    angles: Vec<f64>,
    limits: JointLimits,
    observers: Vec<Option<BoxedObserver>>,
}

impl JointAngleStore {
    /// Creates the store at the given initial angles (clamped to the limits).
    pub fn new(initial: &[f64], limits: JointLimits) -> Result<Self, KinematicsError> {
        KinematicsError::check_dof(limits.dof(), initial.len())?;
        let centers = limits.centers();
        let angles = initial.iter().enumerate()
            .map(|(joint, &q)| Self::bounded(&limits, joint, q, centers[joint]))
            .collect::<Result<Vec<_>, _>>()?;
        let observers = (0..initial.len()).map(|_| None).collect();
        Ok(JointAngleStore { angles, limits, observers })
    }

    /// Binds one observer per joint, in joint order. `None` leaves a joint unobserved.
    pub fn with_observers(mut self, observers: Vec<Option<BoxedObserver>>)
        -> Result<Self, KinematicsError> {
        KinematicsError::check_dof(self.angles.len(), observers.len())?;
        self.observers = observers;
        Ok(self)
    }

    pub fn dof(&self) -> usize {
        self.angles.len()
    }

    /// Current angles, degrees.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Copy of the current angles.
    pub fn snapshot(&self) -> Vec<f64> {
        self.angles.clone()
    }

    pub fn get(&self, joint: usize) -> Result<f64, KinematicsError> {
        KinematicsError::check_index(joint, self.dof())?;
        Ok(self.angles[joint])
    }

    /// Writes the angle clamped to the joint limits and returns the stored value.
    /// A non-finite request other than ±∞ leaves the joint where it is.
    pub fn set(&mut self, joint: usize, degrees: f64) -> Result<f64, KinematicsError> {
        KinematicsError::check_index(joint, self.dof())?;
        let stored = Self::bounded(&self.limits, joint, degrees, self.angles[joint])?;
        self.angles[joint] = stored;
        if let Some(observer) = self.observers[joint].as_mut() {
            observer.joint_changed(joint, stored);
        }
        Ok(stored)
    }

    /// Writes all joints, see [`JointAngleStore::set`].
    pub fn set_all(&mut self, angles: &[f64]) -> Result<(), KinematicsError> {
        KinematicsError::check_dof(self.dof(), angles.len())?;
        for (joint, &q) in angles.iter().enumerate() {
            self.set(joint, q)?;
        }
        Ok(())
    }

    fn bounded(limits: &JointLimits, joint: usize, degrees: f64, fallback: f64)
        -> Result<f64, KinematicsError> {
        let q = if degrees.is_nan() { fallback } else { degrees };
        limits.clamp(joint, q)
    }
}

impl std::fmt::Debug for JointAngleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JointAngleStore")
            .field("angles", &self.angles)
            .field("limits", &self.limits)
            .field("observed", &self.observers.iter().filter(|o| o.is_some()).count())
            .finish()
    }
}
