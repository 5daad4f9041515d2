//! Defines the Denavit-Hartenberg chain description of the arm

use crate::utils::deg;

/// One row of the DH table. The joint angle itself is not stored here, it is substituted
/// at evaluation time as `theta = radians(joint angle) + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhLink {
    /// Offset along the previous z axis to the common normal.
    pub d: f64,

    /// Length of the common normal (link length).
    pub a: f64,

    /// Link twist about the common normal, radians.
    pub alpha: f64,

    /// Fixed offset added to the joint angle, radians. Allows servo 90° (the centre of the
    /// servo range) to correspond to any DH zero configuration.
    pub offset: f64,
}

impl DhLink {
    pub const fn new(d: f64, a: f64, alpha: f64, offset: f64) -> Self {
        DhLink { d, a, alpha, offset }
    }
}

/// Parameters of the kinematic chain. See [parameters_robots.rs](parameters_robots.rs) for
/// concrete arms. Lengths can be in any unit but must be the same along the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// DH rows, base link first. The number of rows is the number of joints.
    pub links: Vec<DhLink>,

    /// Joint angles in degrees the arm is at after initialization or homing.
    pub home: Vec<f64>,
}

impl Parameters {
    /// Degrees of freedom, one per DH row.
    pub fn dof(&self) -> usize {
        self.links.len()
    }

    /// Convert to string yaml representation (quick viewing, etc).
    pub fn to_yaml(&self) -> String {
        let links = self.links.iter()
            .map(|link| format!(
                "  - {{ d: {}, a: {}, alpha: {}, offset: {} }}\n",
                link.d, link.a, deg(&link.alpha), deg(&link.offset)
            ))
            .collect::<String>();
        format!(
            "dh_links:\n{}home: [{}]\n",
            links,
            self.home.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", ")
        )
    }
}
