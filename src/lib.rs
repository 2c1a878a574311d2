// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! # quadtask-rs
//! quadtask-rs is a library of pollable flight-task state machines for
//! quadcopter motion control.
//!
//! A task is one episode of autonomous behavior. An external executor owns
//! the control-cycle loop: it constructs a task from a request plus a
//! validated threshold bundle, calls [`Task::poll`](`crate::Task::poll`) once
//! per cycle, actuates the returned velocity command and stops polling after
//! the first terminal result kind. A poll never blocks longer than the
//! configured transform timeout and never fails across the poll boundary;
//! every runtime outcome travels inside the returned
//! [`TaskProgress`](`crate::TaskProgress`) value.
//!
//! The library is divided into four main modules:
//! * [exception](`crate::exception`) - error taxonomy for construction and transform lookups.
//! * [parameters](`crate::parameters`) - the parameter store and validated thresholds.
//! * [transform](`crate::transform`) - the pose type and the seam to the transform provider.
//! * [task](`crate::task`) - the task contract, result kinds and the translation task
//!   with its stop planner.
//!
//! # Example:
//! ```no_run
//! use std::time::Duration;
//! use quadtask::{
//!     Pose, PoseSource, Task, TaskProgress, TaskResult, Thresholds, TransformError,
//!     TranslationRequest, TranslationTask,
//! };
//!
//! struct TfBuffer;
//! impl PoseSource for TfBuffer {
//!     fn lookup(
//!         &self,
//!         _source_frame: &str,
//!         _target_frame: &str,
//!         _timeout: Duration,
//!     ) -> Result<Pose, TransformError> {
//!         Ok(Pose::from_position(0., 0., 5.))
//!     }
//! }
//!
//! fn main() -> TaskResult<()> {
//!     let thresholds = Thresholds::new(0.1, 0.5, 2.0)?;
//!     let request = TranslationRequest::new(10., 0., 5.);
//!     let mut task = TranslationTask::new(request, thresholds, TfBuffer)?;
//!     loop {
//!         match task.poll() {
//!             TaskProgress::Running(command) => {
//!                 // hand the command to the actuation path
//!                 let _ = command;
//!             }
//!             progress => {
//!                 println!("task finished: {:?}", progress);
//!                 break;
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The executor may cancel a task from another execution context through a
//! [`CancelHandle`](`crate::CancelHandle`); the cancellation is observed on
//! the next poll and the task acknowledges it with
//! [`TaskProgress::Canceled`](`crate::TaskProgress::Canceled`).
pub mod exception;
pub mod parameters;
pub mod task;
pub mod transform;

pub use exception::TaskException;
pub use exception::TaskResult;
pub use exception::TransformError;
pub use parameters::{ParameterStore, Thresholds};
pub use task::control_types::{TaskProgress, VelocityCommand};
pub use task::stop_planner::{
    AccelerationLimiter, PlannerSettings, StopPlanner, TranslateStopPlanner,
};
pub use task::translation::{TranslationRequest, TranslationTask};
pub use task::{CancelHandle, Task};
pub use transform::{Pose, PoseSource, BODY_FRAME, MAP_FRAME};
