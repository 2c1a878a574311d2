// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the task abstraction polled by the executor and its implementations.
//!
//! A task is one episode of autonomous behavior. The executor owns the
//! control-cycle loop, constructs tasks from requests, calls [`Task::poll`]
//! once per cycle and actuates the returned velocity command. Polling stops
//! after the first terminal [`TaskProgress`](`crate::TaskProgress`) kind.
pub mod control_types;
pub mod stop_planner;
pub mod translation;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::task::control_types::TaskProgress;

/// One episode of autonomous behavior driven on a fixed control cycle.
pub trait Task {
    /// Advances the task by one control cycle.
    ///
    /// Never blocks beyond the bounded pose lookup and never panics; runtime
    /// failures travel inside the returned [`TaskProgress`](`crate::TaskProgress`)
    /// value so the executor can make scheduling decisions without error
    /// handling. Polling a task again after a terminal result is an executor
    /// bug and is not defended against.
    fn poll(&mut self) -> TaskProgress;

    /// Requests cancellation. Idempotent; safe before the first poll and
    /// after a terminal result. Returns an acknowledgment, always `true`.
    fn cancel(&self) -> bool;

    /// Task name for logging.
    fn name(&self) -> &'static str;
}

/// Requests cancellation of a task from another execution context.
///
/// Cloned from the owning task, e.g. for an operator-interrupt path. The
/// flag is write-once; cancellation is observed on the task's *next* poll,
/// never preemptively mid-call.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub(crate) fn new(flag: Arc<AtomicBool>) -> Self {
        CancelHandle { flag }
    }

    /// Sets the cancel flag. Idempotent; returns an acknowledgment, always `true`.
    pub fn cancel(&self) -> bool {
        self.flag.store(true, Ordering::Release);
        true
    }

    /// Returns whether cancellation has been requested.
    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
