//! Supports reading the arm description from YAML file (optional)

use std::path::Path;
use serde::Deserialize;
use serde_saphyr::Options;

use crate::constraints::JointLimits;
use crate::kinematic_traits::{SERVO_CENTER_DEG, SERVO_MAX_DEG, SERVO_MIN_DEG};
use crate::parameter_error::ParameterError;
use crate::parameters::{DhLink, Parameters};
use crate::settings::MotionSettings;
use crate::transmitter::PulseMapping;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LinkYaml {
    d: f64,
    a: f64,
    alpha: f64,
    #[serde(default)]
    offset: f64,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LimitsYaml {
    from: Vec<f64>,
    to: Vec<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum PulseYaml {
    Linear,
    Calibrated {
        zero_us: Vec<f64>,
        us_per_deg: Vec<f64>,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Root {
    dh_links: Vec<LinkYaml>,
    #[serde(default)]
    home: Option<Vec<f64>>,
    #[serde(default)]
    limits: Option<LimitsYaml>,
    #[serde(default)]
    settings: MotionSettings,
    #[serde(default)]
    pulse: Option<PulseYaml>,
}

/// Everything needed to build an arm controller, as read from one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmDescription {
    pub parameters: Parameters,
    pub limits: JointLimits,
    pub settings: MotionSettings,
    pub pulse: PulseMapping,
}

impl ArmDescription {
    /// Read the arm description from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Six servo desk arm, millimeters
    /// dh_links:
    ///   - { d: 170.0, a: 0.0,   alpha: deg(90),  offset: deg(-90) }
    ///   - { d: 0.0,   a: 130.0, alpha: 0.0 }
    ///   - { d: 0.0,   a: 30.0,  alpha: 0.0,      offset: deg(-180) }
    ///   - { d: 0.0,   a: 0.0,   alpha: deg(90),  offset: deg(-90) }
    ///   - { d: 0.0,   a: 0.0,   alpha: deg(-90), offset: deg(-90) }
    ///   - { d: 0.0,   a: 0.0,   alpha: 0.0,      offset: deg(-90) }
    /// home: [90, 90, 90, 90, 90, 90]
    /// limits:
    ///   from: [0, 15, 0, 0, 0, 0]
    ///   to: [180, 165, 180, 180, 180, 180]
    /// settings:
    ///   rotation_step_deg: 2
    ///   speed_ms: 1000
    ///   damping: 0.05
    /// pulse: linear
    /// ```
    /// DH twists and offsets are radians; `deg(angle)` converts (serde_saphyr).
    /// Joint angles (`home`, `limits`) are servo degrees. Everything except `dh_links`
    /// is optional: home defaults to the servo centre, limits to [0, 180], pulse
    /// mapping to linear.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let root: Root = serde_saphyr::from_str_with_options(
            contents,
            Options { angle_conversions: true, ..Default::default() }
        ).map_err(|e| ParameterError::ParseError(format!("{}", e)))?;

        let dof = root.dh_links.len();
        if dof == 0 {
            return Err(ParameterError::InvalidValue("dh_links must not be empty".to_string()));
        }

        // Geometric parameter sanity: all finite
        let mut links = Vec::with_capacity(dof);
        for (i, link) in root.dh_links.iter().enumerate() {
            for (name, val) in [("d", link.d), ("a", link.a), ("alpha", link.alpha), ("offset", link.offset)] {
                if !val.is_finite() {
                    return Err(ParameterError::InvalidValue(format!(
                        "dh_links[{}].{} must be finite (got {})", i, name, val
                    )));
                }
            }
            links.push(DhLink::new(link.d, link.a, link.alpha, link.offset));
        }

        let limits = match root.limits {
            Some(limits) => {
                let from = servo_angles(limits.from, dof, "limits.from")?;
                let to = servo_angles(limits.to, dof, "limits.to")?;
                if let Some(i) = (0..dof).find(|&i| from[i] > to[i]) {
                    return Err(ParameterError::InvalidValue(format!(
                        "limits of joint {} are reversed ({} > {})", i, from[i], to[i]
                    )));
                }
                JointLimits::new(from, to)
                    .map_err(|e| ParameterError::InvalidValue(e.to_string()))?
            }
            None => JointLimits::servo_range(dof),
        };

        let home = match root.home {
            Some(home) => servo_angles(home, dof, "home")?,
            None => vec![SERVO_CENTER_DEG; dof],
        };
        if !limits.compliant(&home) {
            return Err(ParameterError::InvalidValue(
                "home must lie within the joint limits".to_string()));
        }

        root.settings.validate()?;

        let pulse = match root.pulse {
            None | Some(PulseYaml::Linear) => PulseMapping::Linear,
            Some(PulseYaml::Calibrated { zero_us, us_per_deg }) => {
                check_length(zero_us.len(), dof, "pulse.calibrated.zero_us")?;
                check_length(us_per_deg.len(), dof, "pulse.calibrated.us_per_deg")?;
                if !zero_us.iter().chain(&us_per_deg).all(|v| v.is_finite()) {
                    return Err(ParameterError::InvalidValue(
                        "pulse calibration must be finite".to_string()));
                }
                PulseMapping::Calibrated { zero_us, us_per_deg }
            }
        };

        Ok(ArmDescription {
            parameters: Parameters { links, home },
            limits,
            settings: root.settings,
            pulse,
        })
    }
}

fn check_length(found: usize, expected: usize, field: &str) -> Result<(), ParameterError> {
    if found != expected {
        return Err(ParameterError::InvalidLength { field: field.to_string(), expected, found });
    }
    Ok(())
}

/// One angle per joint, every one inside the servo domain.
fn servo_angles(values: Vec<f64>, dof: usize, field: &str) -> Result<Vec<f64>, ParameterError> {
    check_length(values.len(), dof, field)?;
    if let Some(bad) = values.iter().find(|v| !(SERVO_MIN_DEG..=SERVO_MAX_DEG).contains(*v)) {
        return Err(ParameterError::InvalidValue(format!(
            "{} must be within [{}, {}] degrees (got {})", field, SERVO_MIN_DEG, SERVO_MAX_DEG, bad
        )));
    }
    Ok(values)
}
