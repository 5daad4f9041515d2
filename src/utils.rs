//! Helper functions

use crate::kinematic_traits::Pose;

/// Checks if all elements in the slice are finite
pub fn is_valid(qs: &[f64]) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Formats joint angles (degrees) as `[ 90.00  45.00 ...]`.
pub fn format_joints(joints: &[f64]) -> String {
    let row_str = joints.iter()
        .map(|q| format!("{:6.2}", q))
        .collect::<Vec<_>>()
        .join(" ");
    format!("[{}]", row_str)
}

/// Formats the homogeneous transform as four rows with six decimals.
pub fn format_pose(pose: &Pose) -> String {
    let mut out = String::new();
    for i in 0..4 {
        let row = (0..4)
            .map(|j| format!("{:12.6}", pose[(i, j)]))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}
