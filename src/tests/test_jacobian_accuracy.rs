#[cfg(test)]
mod tests {
    use nalgebra::{DVector, Vector3};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::jacobian::{DEFAULT_EPSILON_DEG, Jacobian};
    use crate::kinematic_traits::Kinematics;
    use crate::kinematics_impl::DhKinematics;
    use crate::parameters::Parameters;
    use crate::tests::test_utils::random_joints;

    #[test]
    fn test_desk_arm_home_columns() {
        // Shoulder and elbow turn about -y, the base about z.
        let robot = DhKinematics::new(Parameters::desk_arm());
        let jacobian = Jacobian::new(&robot, &[90.0; 6], DEFAULT_EPSILON_DEG).unwrap();
        let matrix = jacobian.matrix();
        assert_eq!(matrix.ncols(), 6);

        let expected = [
            Vector3::new(0.0, 30.0, 0.0),
            Vector3::new(-130.0, 0.0, 30.0),
            Vector3::new(0.0, 0.0, 30.0),
        ];
        for (j, column) in expected.iter().enumerate() {
            assert!((matrix.column(j) - column).norm() < 0.05,
                    "column {} is {} instead of {}", j, matrix.column(j), column);
        }
        // The wrist does not move the wrist centre.
        for j in 3..6 {
            assert!(matrix.column(j).norm() < 1e-9);
        }
    }

    #[test]
    fn test_first_order_prediction() {
        let robot = DhKinematics::new(Parameters::desk_arm());
        let mut rng = StdRng::seed_from_u64(2024);
        let delta_deg = 0.05;

        for _ in 0..30 {
            let joints = random_joints(&mut rng, 6);
            let base = robot.position(&joints).unwrap();
            let jacobian = Jacobian::new(&robot, &joints, DEFAULT_EPSILON_DEG).unwrap();

            for joint in 0..6 {
                let mut perturbed = joints.clone();
                perturbed[joint] += delta_deg;
                let actual = robot.position(&perturbed).unwrap();

                let mut deltas = DVector::zeros(6);
                deltas[joint] = delta_deg.to_radians();
                let predicted = base + jacobian.predict(&deltas);

                assert!((actual - predicted).norm() < 1e-3,
                        "joint {} at {:?}: predicted {} but got {}", joint, joints, predicted, actual);
            }
        }
    }

    #[test]
    fn test_smaller_epsilon_closer_to_tangent() {
        // Base joint of the planar arm: the exact derivative is known.
        let robot = DhKinematics::new(Parameters::planar(&[100.0, 80.0]));
        let joints = [60.0, 120.0];
        let exact = Vector3::new(50.0, 100.0 * 30f64.to_radians().cos() + 80.0, 0.0);

        let coarse = Jacobian::new(&robot, &joints, 1.0).unwrap();
        let fine = Jacobian::new(&robot, &joints, 0.01).unwrap();
        let coarse_error = (coarse.matrix().column(0) - exact).norm();
        let fine_error = (fine.matrix().column(0) - exact).norm();
        assert!(fine_error < coarse_error);
        assert!(fine_error < 0.05);
    }
}
