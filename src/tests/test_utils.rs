use rand::rngs::StdRng;
use rand::Rng;

use crate::constraints::JointLimits;
use crate::controller::ArmController;
use crate::kinematics_impl::DhKinematics;
use crate::parameters::Parameters;
use crate::settings::MotionSettings;
use crate::transmitter::{TransmitError, Transmitter};

/// Remembers every dispatched (joint, angle) pair.
#[derive(Debug, Default)]
pub(crate) struct RecordingTransmitter {
    pub sent: Vec<(usize, f64)>,
}

impl Transmitter for RecordingTransmitter {
    fn transmit(&mut self, joint: usize, degrees: f64) -> Result<(), TransmitError> {
        self.sent.push((joint, degrees));
        Ok(())
    }
}

/// A link that is always down.
#[derive(Debug, Default)]
pub(crate) struct FailingTransmitter {
    pub attempts: usize,
}

impl Transmitter for FailingTransmitter {
    fn transmit(&mut self, _joint: usize, _degrees: f64) -> Result<(), TransmitError> {
        self.attempts += 1;
        Err(TransmitError::Io(std::io::Error::new(std::io::ErrorKind::NotConnected, "no port")))
    }
}

pub(crate) fn desk_arm_controller<T: Transmitter>(transmitter: T) -> ArmController<DhKinematics, T> {
    let parameters = Parameters::desk_arm();
    let home = parameters.home.clone();
    ArmController::new(
        DhKinematics::new(parameters),
        &home,
        JointLimits::servo_range(6),
        MotionSettings::default(),
        transmitter,
    ).expect("desk arm must be consistent")
}

/// Random servo angles, kept a little away from the ends of the range.
pub(crate) fn random_joints(rng: &mut StdRng, dof: usize) -> Vec<f64> {
    (0..dof).map(|_| rng.gen_range(1.0..179.0)).collect()
}
