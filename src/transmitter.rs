//! Command transmission to the servo controller board.
//!
//! The kinematics core only knows the [`Transmitter`] trait: a joint index and a target
//! angle in degrees. Everything below, the pulse width mapping and the ASCII line format
//! `#<servo>P<pulse>T<duration>\r\n`, belongs to the host side and lives here so that
//! hosts do not have to write it again.

use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::kinematic_traits::{SERVO_CENTER_DEG, SERVO_MAX_DEG, SERVO_MIN_DEG};

/// Accepts a joint index and target angle and delivers it to the hardware.
///
/// The kinematics core dispatches and moves on without looking at the result. The result
/// exists for hosts that call transmitters directly and want to log, retry or report.
pub trait Transmitter {
    fn transmit(&mut self, joint: usize, degrees: f64) -> Result<(), TransmitError>;
}

impl<T: Transmitter + ?Sized> Transmitter for &mut T {
    fn transmit(&mut self, joint: usize, degrees: f64) -> Result<(), TransmitError> {
        (**self).transmit(joint, degrees)
    }
}

impl<T: Transmitter + ?Sized> Transmitter for Box<T> {
    fn transmit(&mut self, joint: usize, degrees: f64) -> Result<(), TransmitError> {
        (**self).transmit(joint, degrees)
    }
}

#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("link write failed: {0}")]
    Io(#[from] io::Error),

    #[error("no servo calibration for joint {joint} ({servos} servos calibrated)")]
    UnknownServo { joint: usize, servos: usize },
}

/// One servo move as understood by the controller board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCommand {
    /// Servo channel, one-based (joint index + 1).
    pub servo_id: usize,

    /// Pulse width, microseconds.
    pub pulse_us: i64,

    /// Time to reach the position, milliseconds.
    pub duration_ms: u32,
}

impl ServoCommand {
    pub fn new(joint: usize, pulse_us: i64, duration_ms: u32) -> Self {
        ServoCommand { servo_id: joint + 1, pulse_us, duration_ms }
    }

    /// The ASCII line sent over the link, terminated by CR LF.
    pub fn to_wire(&self) -> String {
        format!("{}\r\n", self)
    }
}

impl fmt::Display for ServoCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}P{}T{}", self.servo_id, self.pulse_us, self.duration_ms)
    }
}

/// Mapping of the servo angle (degrees, [0, 180]) to the pulse width (microseconds).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PulseMapping {
    /// 500 µs at 0°, 2500 µs at 180°, truncated to whole microseconds.
    #[default]
    Linear,

    /// Per-servo calibration around the centre position:
    /// `zero_us + (angle - 90) * us_per_deg`, rounded.
    Calibrated {
        zero_us: Vec<f64>,
        us_per_deg: Vec<f64>,
    },
}

impl PulseMapping {
    pub const MIN_PULSE_US: f64 = 500.0;
    pub const PULSE_SPAN_US: f64 = 2000.0;

    /// Measured calibration of the six servos on the desk arm, taken as pulse steps per
    /// 10° with the centre at 1500 µs.
    pub fn desk_arm_calibration() -> Self {
        let per_10_deg = [72.222, 50.0, 116.7, 105.55, 111.11, 105.55];
        PulseMapping::Calibrated {
            zero_us: vec![1500.0; per_10_deg.len()],
            us_per_deg: per_10_deg.iter().map(|step| step / 10.0).collect(),
        }
    }

    /// Pulse width for the joint. The angle is brought into [0, 180] first.
    pub fn pulse_us(&self, joint: usize, degrees: f64) -> Result<i64, TransmitError> {
        let angle = degrees.clamp(SERVO_MIN_DEG, SERVO_MAX_DEG);
        match self {
            PulseMapping::Linear => {
                Ok((Self::MIN_PULSE_US + Self::PULSE_SPAN_US * angle / SERVO_MAX_DEG) as i64)
            }
            PulseMapping::Calibrated { zero_us, us_per_deg } => {
                let servos = zero_us.len().min(us_per_deg.len());
                if joint >= servos {
                    return Err(TransmitError::UnknownServo { joint, servos });
                }
                Ok((zero_us[joint] + (angle - SERVO_CENTER_DEG) * us_per_deg[joint]).round() as i64)
            }
        }
    }

    pub fn command(&self, joint: usize, degrees: f64, duration_ms: u32)
        -> Result<ServoCommand, TransmitError> {
        Ok(ServoCommand::new(joint, self.pulse_us(joint, degrees)?, duration_ms))
    }

    /// As [`PulseMapping::command`], logging a joint the mapping does not cover.
    fn checked_command(&self, joint: usize, degrees: f64, duration_ms: u32)
        -> Result<ServoCommand, TransmitError> {
        self.command(joint, degrees, duration_ms)
            .inspect_err(|err| warn!(joint, degrees, %err, "command not sent"))
    }
}

/// Writes servo commands to a byte link: an opened serial device, a socket or a buffer.
pub struct SerialTransmitter<W: Write> {
    link: W,
    mapping: PulseMapping,
    duration_ms: u32,
    pacing: Duration,
}

impl<W: Write> SerialTransmitter<W> {
    pub fn new(link: W, mapping: PulseMapping, duration_ms: u32) -> Self {
        SerialTransmitter { link, mapping, duration_ms, pacing: Duration::ZERO }
    }

    /// Pause after every written command, for boards that drop back-to-back lines.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn set_duration_ms(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
    }

    pub fn get_ref(&self) -> &W {
        &self.link
    }

    pub fn into_inner(self) -> W {
        self.link
    }
}

impl<W: Write> Transmitter for SerialTransmitter<W> {
    fn transmit(&mut self, joint: usize, degrees: f64) -> Result<(), TransmitError> {
        let command = self.mapping.checked_command(joint, degrees, self.duration_ms)?;
        let written = self.link.write_all(command.to_wire().as_bytes())
            .and_then(|_| self.link.flush());
        if let Err(err) = written {
            warn!(%command, %err, "servo board did not take the command");
            return Err(err.into());
        }
        debug!(%command, "sent");
        if !self.pacing.is_zero() {
            thread::sleep(self.pacing);
        }
        Ok(())
    }
}

/// Logs the commands instead of sending them, for running without a board attached.
/// The most recent commands are also kept for inspection, up to the history length
/// ([`DryRunTransmitter::DEFAULT_HISTORY`] unless set with
/// [`DryRunTransmitter::with_history`]); older ones are dropped.
#[derive(Debug)]
pub struct DryRunTransmitter {
    mapping: PulseMapping,
    duration_ms: u32,
    history: usize,
    sent: Vec<ServoCommand>,
}

impl DryRunTransmitter {
    pub const DEFAULT_HISTORY: usize = 1024;

    pub fn new(mapping: PulseMapping, duration_ms: u32) -> Self {
        DryRunTransmitter { mapping, duration_ms, history: Self::DEFAULT_HISTORY, sent: Vec::new() }
    }

    /// Keep at most `history` commands, 0 keeps none.
    pub fn with_history(mut self, history: usize) -> Self {
        self.history = history;
        let excess = self.sent.len().saturating_sub(history);
        self.sent.drain(..excess);
        self
    }

    /// Recorded commands, oldest first.
    pub fn commands(&self) -> &[ServoCommand] {
        &self.sent
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl Default for DryRunTransmitter {
    fn default() -> Self {
        DryRunTransmitter::new(PulseMapping::default(), 1000)
    }
}

impl Transmitter for DryRunTransmitter {
    fn transmit(&mut self, joint: usize, degrees: f64) -> Result<(), TransmitError> {
        let command = self.mapping.checked_command(joint, degrees, self.duration_ms)?;
        info!(%command, "link not open, not sent");
        if self.history == 0 {
            return Ok(());
        }
        if self.sent.len() >= self.history {
            self.sent.remove(0);
        }
        self.sent.push(command);
        Ok(())
    }
}
