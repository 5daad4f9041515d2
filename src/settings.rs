//! Motion settings: jog step, servo speed and the solver tuning knobs

use serde::Deserialize;
use crate::jacobian::{DEFAULT_DAMPING, DEFAULT_EPSILON_DEG};
use crate::parameter_error::ParameterError;

/// Settings supplied by the host. Every field has a default, so a partial YAML mapping
/// (or none at all) is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionSettings {
    /// Increment of a single joint jog, degrees (1 to 30).
    pub rotation_step_deg: f64,

    /// Duration of a servo move, milliseconds (100 to 5000). Sent as the `T` field.
    pub speed_ms: u32,

    /// Multiplier applied to a requested Cartesian displacement.
    pub gain: f64,

    /// Joint perturbation for the numeric Jacobian, degrees.
    pub jacobian_epsilon_deg: f64,

    /// Damping factor λ of the least-squares solver.
    pub damping: f64,

    /// Position error at which a Cartesian step counts as reached, length units of the chain.
    pub tolerance: f64,

    /// Iteration budget of a Cartesian step.
    pub max_iterations: usize,

    /// Pause after each command written to the link, milliseconds.
    pub pacing_ms: u64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        MotionSettings {
            rotation_step_deg: 2.0,
            speed_ms: 1000,
            gain: 1.0,
            jacobian_epsilon_deg: DEFAULT_EPSILON_DEG,
            damping: DEFAULT_DAMPING,
            tolerance: 1e-4,
            max_iterations: 5,
            pacing_ms: 0,
        }
    }
}

impl MotionSettings {
    pub const ROTATION_STEP_RANGE: (f64, f64) = (1.0, 30.0);
    pub const SPEED_RANGE: (u32, u32) = (100, 5000);

    pub fn validate(&self) -> Result<(), ParameterError> {
        let (min_step, max_step) = Self::ROTATION_STEP_RANGE;
        if !(min_step..=max_step).contains(&self.rotation_step_deg) {
            return Err(ParameterError::InvalidValue(format!(
                "rotation_step_deg must be within {}..={} (got {})",
                min_step, max_step, self.rotation_step_deg
            )));
        }

        let (min_speed, max_speed) = Self::SPEED_RANGE;
        if !(min_speed..=max_speed).contains(&self.speed_ms) {
            return Err(ParameterError::InvalidValue(format!(
                "speed_ms must be within {}..={} (got {})",
                min_speed, max_speed, self.speed_ms
            )));
        }

        for (name, value) in [
            ("jacobian_epsilon_deg", self.jacobian_epsilon_deg),
            ("tolerance", self.tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::InvalidValue(format!(
                    "{} must be positive and finite (got {})", name, value
                )));
            }
        }

        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ParameterError::InvalidValue(format!(
                "damping must be non-negative and finite (got {})", self.damping
            )));
        }

        if !self.gain.is_finite() {
            return Err(ParameterError::InvalidValue(format!(
                "gain must be finite (got {})", self.gain
            )));
        }

        if self.max_iterations == 0 {
            return Err(ParameterError::InvalidValue(
                "max_iterations must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = MotionSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_iterations, 5);
        assert_eq!(settings.damping, 0.05);
        assert_eq!(settings.jacobian_epsilon_deg, 0.01);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let bad = [
            MotionSettings { rotation_step_deg: 0.5, ..Default::default() },
            MotionSettings { rotation_step_deg: 31.0, ..Default::default() },
            MotionSettings { speed_ms: 50, ..Default::default() },
            MotionSettings { jacobian_epsilon_deg: 0.0, ..Default::default() },
            MotionSettings { tolerance: f64::NAN, ..Default::default() },
            MotionSettings { damping: -0.1, ..Default::default() },
            MotionSettings { gain: f64::INFINITY, ..Default::default() },
            MotionSettings { max_iterations: 0, ..Default::default() },
        ];
        for settings in bad.iter() {
            assert!(settings.validate().is_err(), "{:?} must be rejected", settings);
        }
    }

    #[test]
    fn test_zero_damping_allowed() {
        let settings = MotionSettings { damping: 0.0, ..Default::default() };
        assert!(settings.validate().is_ok());
    }
}
