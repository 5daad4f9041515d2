use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use servo_arm_kinematics::constraints::JointLimits;
use servo_arm_kinematics::controller::ArmController;
use servo_arm_kinematics::kinematics_impl::DhKinematics;
use servo_arm_kinematics::parameters::Parameters;
use servo_arm_kinematics::parameters_from_file::ArmDescription;
use servo_arm_kinematics::settings::MotionSettings;
use servo_arm_kinematics::transmitter::{DryRunTransmitter, PulseMapping, SerialTransmitter, Transmitter};
use servo_arm_kinematics::utils::{format_joints, format_pose};

/// Moves a servo arm by a small Cartesian step and prints the resulting pose.
///
/// Without --port the commands are only logged (RUST_LOG=info to see them).
#[derive(Parser, Debug)]
#[clap(author, version, name = "servo-arm")]
struct CommandLineArguments {
    /// YAML arm description. The built-in six servo desk arm is used if not given.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Serial device of the servo controller board, already configured (e.g. 9600 8N1).
    #[clap(long)]
    port: Option<PathBuf>,

    /// Servo move duration in milliseconds, overrides the configuration.
    #[clap(long)]
    speed: Option<u32>,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    dx: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    dy: f64,

    #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
    dz: f64,

    /// Multiplier of the displacement, overrides the configuration.
    #[clap(long)]
    gain: Option<f64>,

    /// Iteration budget, overrides the configuration.
    #[clap(long)]
    iterations: Option<usize>,

    /// Set this joint (0 based) to --angle before stepping.
    #[clap(long, requires = "angle")]
    joint: Option<usize>,

    /// Servo angle in degrees for --joint.
    #[clap(long)]
    angle: Option<f64>,

    /// Send the arm home first.
    #[clap(long)]
    home: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = CommandLineArguments::parse();

    let mut description = match &args.config {
        Some(path) => ArmDescription::from_yaml_file(path)
            .with_context(|| format!("reading arm description {}", path.display()))?,
        None => {
            let parameters = Parameters::desk_arm();
            ArmDescription {
                limits: JointLimits::servo_range(parameters.dof()),
                parameters,
                settings: MotionSettings::default(),
                pulse: PulseMapping::desk_arm_calibration(),
            }
        }
    };
    if let Some(speed) = args.speed {
        description.settings.speed_ms = speed;
    }
    if let Some(gain) = args.gain {
        description.settings.gain = gain;
    }
    if let Some(iterations) = args.iterations {
        description.settings.max_iterations = iterations;
    }
    description.settings.validate().context("invalid settings")?;

    let speed = description.settings.speed_ms;
    let transmitter: Box<dyn Transmitter> = match &args.port {
        Some(port) => {
            let link = OpenOptions::new().write(true).open(port)
                .with_context(|| format!("opening {}", port.display()))?;
            info!(port = %port.display(), "servo board link open");
            Box::new(SerialTransmitter::new(link, description.pulse.clone(), speed)
                .with_pacing(Duration::from_millis(description.settings.pacing_ms)))
        }
        None => Box::new(DryRunTransmitter::new(description.pulse.clone(), speed)),
    };

    let home = description.parameters.home.clone();
    let mut arm = ArmController::new(
        DhKinematics::new(description.parameters),
        &home,
        description.limits,
        description.settings,
        transmitter,
    )?;

    if args.home {
        arm.move_home()?;
    }
    if let Some(joint) = args.joint {
        let Some(angle) = args.angle else {
            bail!("--joint needs --angle");
        };
        let stored = arm.set_joint(joint, angle)?;
        println!("Joint {} set to {:.2}", joint, stored);
    }

    let (_, start) = arm.current_pose()?;
    println!("Start joints: {}", format_joints(arm.angles()));
    println!("Start position: [{:.4}, {:.4}, {:.4}]", start.x, start.y, start.z);
    let outcome = arm.step(&nalgebra::Vector3::new(args.dx, args.dy, args.dz))?;
    let (pose, position) = arm.current_pose()?;

    println!("Joints: {}", format_joints(&outcome.angles));
    println!("Pose:\n{}", format_pose(&pose));
    println!("Position: [{:.4}, {:.4}, {:.4}], moved by [{:.4}, {:.4}, {:.4}]",
             position.x, position.y, position.z,
             position.x - start.x, position.y - start.y, position.z - start.z);
    println!("{} after {} iteration(s), residual {:.6}",
             if outcome.converged { "Reached" } else { "Best effort" },
             outcome.iterations, outcome.residual);
    Ok(())
}
