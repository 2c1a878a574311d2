// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains helper types for reporting per-cycle task outcomes and velocity commands.
use nalgebra::Vector3;

/// Desired vehicle velocity produced by a planner for one control cycle.
///
/// Only the linear components are used by translation tasks; the angular
/// components are always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCommand {
    /// Desired linear velocity in \[m/s\].
    pub linear: Vector3<f64>,
    /// Desired angular velocity in \[rad/s\]. Zero for translation tasks.
    pub angular: Vector3<f64>,
}

impl VelocityCommand {
    /// Creates a command with the given linear velocity and zero angular velocity.
    pub fn new(linear: Vector3<f64>) -> Self {
        VelocityCommand {
            linear,
            angular: Vector3::zeros(),
        }
    }

    /// Creates an all-zero hold command.
    pub fn zero() -> Self {
        VelocityCommand::new(Vector3::zeros())
    }
}

/// Outcome a task reports to its executor after one poll.
///
/// `Running` is the only non-terminal kind. The executor is expected to stop
/// polling a task after any of `Done`, `Canceled`, `Aborted` or `Failed` and
/// to discard it; a task is never resumed after a terminal result.
///
/// A velocity command is carried on `Running` and on the final `Done` cycle
/// (a last hold command); the failure kinds carry diagnostic text instead.
/// The executor branches on the kind, never on the text.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskProgress {
    /// The task is still working towards its goal.
    Running(VelocityCommand),
    /// The goal was reached within tolerance.
    Done(VelocityCommand),
    /// Cancellation was requested and is hereby acknowledged.
    Canceled,
    /// An infrastructure dependency could not produce data, e.g. the pose
    /// lookup failed. Retrying is the executor's decision.
    Aborted { message: String },
    /// The task's own safety invariant was violated during execution.
    Failed { message: String },
}

impl TaskProgress {
    /// Returns whether the executor must stop polling after this result.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskProgress::Running(_))
    }

    /// Returns the velocity command to actuate this cycle, if any.
    pub fn velocity_command(&self) -> Option<&VelocityCommand> {
        match self {
            TaskProgress::Running(command) | TaskProgress::Done(command) => Some(command),
            _ => None,
        }
    }
}
