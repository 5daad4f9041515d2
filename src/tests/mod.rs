mod test_utils;
mod test_forward_kinematics;
mod test_jacobian_accuracy;
