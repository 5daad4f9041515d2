//! Hardcoded DH parameters for a few arms

use crate::kinematic_traits::SERVO_CENTER_DEG;
use crate::parameters::{DhLink, Parameters};
use std::f64::consts::{FRAC_PI_2, PI};

#[allow(dead_code)]
impl Parameters {
    /// Six-servo desk arm, millimeters. Base column 170 mm, upper arm 130 mm, forearm 30 mm,
    /// spherical wrist without own length.
    ///
    /// Offsets are chosen so that at home (every servo at 90°) the upper arm stands vertical
    /// and the forearm points forward along the base x axis. This puts the end-effector at
    /// (30, 0, 300) without any special casing and keeps the home pose away from
    /// the fully stretched singularity.
    pub fn desk_arm() -> Self {
        Parameters {
            links: vec![
                DhLink::new(170.0, 0.0, FRAC_PI_2, -FRAC_PI_2),
                DhLink::new(0.0, 130.0, 0.0, 0.0),
                DhLink::new(0.0, 30.0, 0.0, -PI),
                DhLink::new(0.0, 0.0, FRAC_PI_2, -FRAC_PI_2),
                DhLink::new(0.0, 0.0, -FRAC_PI_2, -FRAC_PI_2),
                DhLink::new(0.0, 0.0, 0.0, -FRAC_PI_2),
            ],
            home: vec![SERVO_CENTER_DEG; 6],
        }
    }

    /// Four-servo variant of the desk arm: base, shoulder, elbow and a wrist pitch servo
    /// carrying a 60 mm gripper.
    pub fn desk_arm_4dof() -> Self {
        Parameters {
            links: vec![
                DhLink::new(170.0, 0.0, FRAC_PI_2, -FRAC_PI_2),
                DhLink::new(0.0, 130.0, 0.0, 0.0),
                DhLink::new(0.0, 30.0, 0.0, -PI),
                DhLink::new(0.0, 60.0, 0.0, -FRAC_PI_2),
            ],
            home: vec![SERVO_CENTER_DEG; 4],
        }
    }

    /// Planar arm with all joint axes parallel to the base z axis. At 90° every link points
    /// along the base x axis.
    pub fn planar(lengths: &[f64]) -> Self {
        Parameters {
            links: lengths.iter()
                .map(|&a| DhLink::new(0.0, a, 0.0, -FRAC_PI_2))
                .collect(),
            home: vec![SERVO_CENTER_DEG; lengths.len()],
        }
    }
}
