use crate::kinematic_traits::{Kinematics, Pose};
use crate::kinematics_error::KinematicsError;
use crate::parameters::{DhLink, Parameters};
use nalgebra::Matrix4;

/// Forward kinematics of a serial chain described by Denavit-Hartenberg rows.
#[derive(Debug, Clone)]
pub struct DhKinematics {
    parameters: Parameters,
}

impl DhKinematics {
    /// Creates a new `DhKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        DhKinematics { parameters }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Transform of a single link with the joint angle (degrees) substituted into its row.
    fn link_transform(link: &DhLink, degrees: f64) -> Pose {
        dh_transform(degrees.to_radians() + link.offset, link.d, link.a, link.alpha)
    }
}

/// Homogeneous transform of one DH link (standard convention, Rz(θ)·Tz(d)·Tx(a)·Rx(α)).
/// Angles in radians.
pub fn dh_transform(theta: f64, d: f64, a: f64, alpha: f64) -> Pose {
    let (st, ct) = theta.sin_cos();
    let (sa, ca) = alpha.sin_cos();

    Matrix4::new(
        ct, -st * ca, st * sa, a * ct,
        st, ct * ca, -ct * sa, a * st,
        0.0, sa, ca, d,
        0.0, 0.0, 0.0, 1.0,
    )
}

impl Kinematics for DhKinematics {
    fn dof(&self) -> usize {
        self.parameters.links.len()
    }

    fn forward(&self, joints: &[f64]) -> Result<Pose, KinematicsError> {
        KinematicsError::check_dof(self.dof(), joints.len())?;
        Ok(self.parameters.links.iter()
            .zip(joints)
            .fold(Pose::identity(), |pose, (link, &q)| pose * Self::link_transform(link, q)))
    }

    fn forward_with_link_poses(&self, joints: &[f64]) -> Result<Vec<Pose>, KinematicsError> {
        KinematicsError::check_dof(self.dof(), joints.len())?;
        let mut poses = Vec::with_capacity(joints.len());
        let mut pose = Pose::identity();
        for (link, &q) in self.parameters.links.iter().zip(joints) {
            pose *= Self::link_transform(link, q);
            poses.push(pose);
        }
        Ok(poses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_zero_row_is_identity() {
        assert_eq!(dh_transform(0.0, 0.0, 0.0, 0.0), Matrix4::identity());
    }

    #[test]
    fn test_pure_translation() {
        let t = dh_transform(0.0, 2.0, 3.0, 0.0);
        assert_eq!(t[(0, 3)], 3.0);
        assert_eq!(t[(1, 3)], 0.0);
        assert_eq!(t[(2, 3)], 2.0);
    }

    #[test]
    fn test_rotated_link() {
        // Link of length 1 rotated by 90 degrees ends up on the y axis.
        let t = dh_transform(FRAC_PI_2, 0.0, 1.0, 0.0);
        assert!(t[(0, 3)].abs() < EPSILON);
        assert!((t[(1, 3)] - 1.0).abs() < EPSILON);

        // Twist of 90 degrees maps z onto -y.
        let t = dh_transform(0.0, 0.0, 0.0, FRAC_PI_2);
        assert!((t[(1, 2)] + 1.0).abs() < EPSILON);
        assert!((t[(2, 1)] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let t = dh_transform(0.3, 12.0, -4.0, -1.1);
        let r = t.fixed_view::<3, 3>(0, 0).into_owned();
        let should_be_identity = r * r.transpose();
        assert!((should_be_identity - nalgebra::Matrix3::identity()).norm() < EPSILON);
        assert!((r.determinant() - 1.0).abs() < EPSILON);
        assert_eq!(t.row(3).into_owned(), nalgebra::RowVector4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_link_poses_end_with_forward() {
        let robot = DhKinematics::new(Parameters::desk_arm());
        let joints = [10.0, 45.0, 120.0, 80.0, 30.0, 170.0];
        let poses = robot.forward_with_link_poses(&joints).unwrap();
        assert_eq!(poses.len(), 6);
        assert_eq!(poses[5], robot.forward(&joints).unwrap());
    }

    #[test]
    fn test_wrong_joint_count() {
        let robot = DhKinematics::new(Parameters::desk_arm());
        let result = robot.forward(&[90.0; 5]);
        assert_eq!(result.unwrap_err(), KinematicsError::DofMismatch { expected: 6, found: 5 });
        assert!(robot.forward_with_link_poses(&[90.0; 7]).is_err());
    }

    #[test]
    fn test_offset_applied() {
        // Servo at 90 with offset -90 is the DH zero.
        let link = DhLink::new(0.0, 1.0, 0.0, -FRAC_PI_2);
        let t = DhKinematics::link_transform(&link, 90.0);
        assert!((t[(0, 3)] - 1.0).abs() < EPSILON);
        let t = DhKinematics::link_transform(&link, 180.0);
        assert!((t[(1, 3)] - 1.0).abs() < EPSILON);
        let t = DhKinematics::link_transform(&DhLink::new(0.0, 1.0, 0.0, PI), 0.0);
        assert!((t[(0, 3)] + 1.0).abs() < EPSILON);
    }
}
