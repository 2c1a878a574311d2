// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the pose type and the seam to the external transform provider.
use crate::exception::TransformError;
use nalgebra::{UnitQuaternion, Vector3};
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Name of the world frame poses are resolved in.
pub const MAP_FRAME: &str = "map";
/// Name of the vehicle body frame.
pub const BODY_FRAME: &str = "quad";

/// Vehicle pose in a named world frame at a point in time.
///
/// Tasks copy the pose into the scope of a single poll and never cache it
/// across cycles.
#[derive(Debug, Clone, Copy)]
pub struct Pose {
    /// Position in the source frame in \[m\].
    pub position: Vector3<f64>,
    /// Orientation in the source frame. Unused by translation tasks.
    pub orientation: UnitQuaternion<f64>,
}

impl Pose {
    /// Creates a pose with identity orientation.
    pub fn from_position(x: f64, y: f64, z: f64) -> Self {
        Pose {
            position: Vector3::new(x, y, z),
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// Resolves the current vehicle pose in a world frame.
///
/// Implementations wrap whatever transform machinery the vehicle runs. A
/// lookup is a single fallible, bounded-latency call: it must return within
/// `timeout` and may fail transiently. Tasks never retry a failed lookup;
/// retry policy belongs to the executor or higher mission logic.
#[cfg_attr(test, automock)]
pub trait PoseSource {
    /// Resolves the latest pose of `target_frame` in `source_frame`.
    /// # Errors
    /// * [`TransformError`](`crate::exception::TransformError`) if the
    /// transform is missing, disconnected, expired or the lookup timed out.
    fn lookup(
        &self,
        source_frame: &str,
        target_frame: &str,
        timeout: Duration,
    ) -> Result<Pose, TransformError>;
}
