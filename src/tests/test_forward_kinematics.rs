#[cfg(test)]
mod tests {
    use nalgebra::Vector3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::kinematic_traits::{forward_kinematics, position_of, Kinematics};
    use crate::kinematics_impl::DhKinematics;
    use crate::parameters::Parameters;
    use crate::tests::test_utils::random_joints;

    const EPSILON: f64 = 1e-9;

    fn assert_position(actual: &Vector3<f64>, expected: &Vector3<f64>) {
        assert!((actual - expected).norm() < EPSILON, "{:?} is not {:?}", actual, expected);
    }

    #[test]
    fn test_desk_arm_home() {
        let robot = DhKinematics::new(Parameters::desk_arm());
        let (pose, position) = forward_kinematics(&robot, &[90.0; 6]).unwrap();
        assert_position(&position, &Vector3::new(30.0, 0.0, 300.0));
        assert_eq!(position, position_of(&pose));
    }

    #[test]
    fn test_desk_arm_base_rotation() {
        // Turning the base servo by 90 degrees swings the forearm from x onto y.
        let robot = DhKinematics::new(Parameters::desk_arm());
        let position = robot.position(&[180.0, 90.0, 90.0, 90.0, 90.0, 90.0]).unwrap();
        assert_position(&position, &Vector3::new(0.0, 30.0, 300.0));
    }

    #[test]
    fn test_desk_arm_4dof_home() {
        let robot = DhKinematics::new(Parameters::desk_arm_4dof());
        let position = robot.position(&[90.0; 4]).unwrap();
        assert_position(&position, &Vector3::new(90.0, 0.0, 300.0));
    }

    #[test]
    fn test_planar_arm() {
        let robot = DhKinematics::new(Parameters::planar(&[100.0, 80.0]));
        assert_position(&robot.position(&[90.0, 90.0]).unwrap(), &Vector3::new(180.0, 0.0, 0.0));
        assert_position(&robot.position(&[180.0, 90.0]).unwrap(), &Vector3::new(0.0, 180.0, 0.0));
        assert_position(&robot.position(&[90.0, 180.0]).unwrap(), &Vector3::new(100.0, 80.0, 0.0));
        assert_position(&robot.position(&[0.0, 0.0]).unwrap(), &Vector3::new(-80.0, -100.0, 0.0));
    }

    #[test]
    fn test_deterministic() {
        let robot = DhKinematics::new(Parameters::desk_arm());
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let joints = random_joints(&mut rng, 6);
            let first = robot.forward(&joints).unwrap();
            let second = robot.forward(&joints).unwrap();
            assert_eq!(first, second, "forward kinematics must be bit-identical for {:?}", joints);
        }
    }

    #[test]
    fn test_continuous() {
        let robot = DhKinematics::new(Parameters::desk_arm());
        let mut rng = StdRng::seed_from_u64(7);
        // Longest lever arm of the chain, bounds |dp| / |dθ| for any single joint.
        let reach = 170.0 + 130.0 + 30.0;

        for _ in 0..50 {
            let joints = random_joints(&mut rng, 6);
            let base = robot.position(&joints).unwrap();
            for joint in 0..6 {
                let mut previous = f64::INFINITY;
                for delta in [1e-1, 1e-3, 1e-5, 1e-7] {
                    let mut perturbed = joints.clone();
                    perturbed[joint] += delta;
                    let distance = (robot.position(&perturbed).unwrap() - base).norm();
                    assert!(distance <= reach * f64::to_radians(delta) + EPSILON,
                            "joint {} jumped by {} for {} degrees", joint, distance, delta);
                    assert!(distance <= previous + EPSILON);
                    previous = distance;
                }
            }
        }
    }

    #[test]
    fn test_home_is_not_special() {
        // Around the home pose the position changes smoothly, there is no snapping.
        let robot = DhKinematics::new(Parameters::desk_arm());
        let home = robot.position(&[90.0; 6]).unwrap();
        let near = robot.position(&[90.0, 90.0 + 1e-6, 90.0, 90.0, 90.0, 90.0]).unwrap();
        let distance = (near - home).norm();
        assert!(distance > 0.0);
        assert!(distance < 1e-4);
    }

    #[test]
    fn test_link_poses() {
        let robot = DhKinematics::new(Parameters::desk_arm());
        let poses = robot.forward_with_link_poses(&[90.0; 6]).unwrap();
        assert_position(&position_of(&poses[0]), &Vector3::new(0.0, 0.0, 170.0));
        assert_position(&position_of(&poses[1]), &Vector3::new(0.0, 0.0, 300.0));
        assert_position(&position_of(&poses[2]), &Vector3::new(30.0, 0.0, 300.0));
        assert_eq!(poses[5], robot.forward(&[90.0; 6]).unwrap());
    }
}
