// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the task that translates the vehicle to a target position.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nalgebra::Vector3;
use tracing::{error, info};

use crate::exception::{TaskException, TaskResult};
use crate::parameters::Thresholds;
use crate::task::control_types::TaskProgress;
use crate::task::stop_planner::{StopPlanner, TranslateStopPlanner};
use crate::task::{CancelHandle, Task};
use crate::transform::{PoseSource, BODY_FRAME, MAP_FRAME};

/// Immutable request to translate the vehicle to a target world-frame position.
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest {
    /// Target position in the world frame in \[m\].
    pub target: Vector3<f64>,
}

impl TranslationRequest {
    /// Creates a request for the given target coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        TranslationRequest {
            target: Vector3::new(x, y, z),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TranslationTaskState {
    Init,
    Translating,
}

/// Translates the vehicle to a fixed target position.
///
/// Holds the target and safety thresholds, polls the [`PoseSource`] each
/// cycle, enforces the minimum maneuver height and delegates motion shaping
/// to a [`StopPlanner`]. One instance serves one behavior episode: the
/// executor discards the task once a terminal
/// [`TaskProgress`](`crate::TaskProgress`) kind is returned.
pub struct TranslationTask<P: PoseSource, S: StopPlanner = TranslateStopPlanner> {
    pose_source: P,
    planner: S,
    thresholds: Thresholds,
    state: TranslationTaskState,
    canceled: Arc<AtomicBool>,
}

impl<P: PoseSource> TranslationTask<P> {
    /// Creates a translation task with the reference stop planner bound to
    /// the requested target.
    ///
    /// # Arguments
    /// * `request` - Target position, consumed here.
    /// * `thresholds` - Validated threshold bundle, see
    /// [`Thresholds`](`crate::parameters::Thresholds`).
    /// * `pose_source` - Resolves the vehicle pose each cycle.
    /// # Errors
    /// * [`InvalidTarget`](`crate::exception::TaskException::InvalidTarget`)
    /// if the target altitude is below the minimum maneuver height. Such a
    /// request can never be serviced, so it is rejected before any cycle
    /// runs. A vehicle that is currently below the floor but targets above
    /// it is legal; that condition is caught per-cycle in [`poll`](`Self::poll`).
    pub fn new(
        request: TranslationRequest,
        thresholds: Thresholds,
        pose_source: P,
    ) -> TaskResult<Self> {
        let planner = TranslateStopPlanner::new(
            request.target,
            thresholds.translation_xyz_tolerance,
        );
        TranslationTask::with_planner(request, thresholds, pose_source, planner)
    }
}

impl<P: PoseSource, S: StopPlanner> TranslationTask<P, S> {
    /// Creates a translation task with a custom stop planner.
    ///
    /// The planner must already be bound to the same target as `request`.
    /// # Errors
    /// * [`InvalidTarget`](`crate::exception::TaskException::InvalidTarget`)
    /// if the target altitude is below the minimum maneuver height.
    pub fn with_planner(
        request: TranslationRequest,
        thresholds: Thresholds,
        pose_source: P,
        planner: S,
    ) -> TaskResult<Self> {
        if request.target.z < thresholds.min_maneuver_height {
            return Err(TaskException::InvalidTarget {
                message: format!(
                    "requested z height {} is below the minimum maneuver height {}",
                    request.target.z, thresholds.min_maneuver_height
                ),
            });
        }
        Ok(TranslationTask {
            pose_source,
            planner,
            thresholds,
            state: TranslationTaskState::Init,
            canceled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns a handle that can cancel this task from another execution context.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(Arc::clone(&self.canceled))
    }
}

impl<P: PoseSource, S: StopPlanner> Task for TranslationTask<P, S> {
    fn poll(&mut self) -> TaskProgress {
        // Cancellation preempts everything else this cycle.
        if self.canceled.load(Ordering::Acquire) {
            return TaskProgress::Canceled;
        }

        if self.state == TranslationTaskState::Init {
            self.state = TranslationTaskState::Translating;
        }

        let pose = match self.pose_source.lookup(
            MAP_FRAME,
            BODY_FRAME,
            self.thresholds.transform_timeout,
        ) {
            Ok(pose) => pose,
            Err(ex) => {
                error!("translation task: exception when looking up transform: {}", ex);
                return TaskProgress::Aborted {
                    message: format!("exception when looking up transform during translation: {}", ex),
                };
            }
        };

        if !self
            .thresholds
            .above_min_maneuver_height(pose.position.z)
        {
            error!(
                "translation task: fell below minimum maneuver height (z = {})",
                pose.position.z
            );
            return TaskProgress::Failed {
                message: "fell below minimum maneuver height during translation".to_string(),
            };
        }

        let (command, reached) = self.planner.step(&pose);
        if reached {
            TaskProgress::Done(command)
        } else {
            TaskProgress::Running(command)
        }
    }

    fn cancel(&self) -> bool {
        info!("translation task canceled");
        self.canceled.store(true, Ordering::Release);
        true
    }

    fn name(&self) -> &'static str {
        "translation"
    }
}
