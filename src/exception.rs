// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains exception and Result definitions
use thiserror::Error;

/// Represents all errors which can occur while constructing or running a task.
#[derive(Error, Debug)]
pub enum TaskException {
    /// ConfigurationError is raised at construction time when a required
    /// parameter is missing from the parameter store or carries an invalid
    /// value. The task is never created.
    #[error("{message}")]
    ConfigurationError { message: String },

    /// InvalidTarget is raised at construction time when the requested target
    /// can never be serviced, e.g. a target altitude below the minimum
    /// maneuver height. Distinguishes a bad request from a bad runtime
    /// condition; the task is never created.
    #[error("{message}")]
    InvalidTarget { message: String },
}

/// creates a ConfigurationError from a parameter key that could not be looked up
pub(crate) fn create_missing_parameter_exception(key: &str) -> TaskException {
    TaskException::ConfigurationError {
        message: format!("could not look up parameter `{}`", key),
    }
}

/// Result type which can have TaskException as Error
pub type TaskResult<T> = Result<T, TaskException>;

/// Represents the ways a transform lookup between two frames can fail.
///
/// A task maps any of these to a terminal [`Aborted`](`crate::TaskProgress::Aborted`)
/// result; it never retries the lookup itself.
#[derive(Error, Debug)]
pub enum TransformError {
    /// No transform between the requested frames is known.
    #[error("no transform from `{source_frame}` to `{target_frame}` is available")]
    Lookup {
        source_frame: String,
        target_frame: String,
    },

    /// The frames exist but are not connected in the transform tree.
    #[error("frames `{source_frame}` and `{target_frame}` are not connected")]
    Connectivity {
        source_frame: String,
        target_frame: String,
    },

    /// The transform is known but not for the requested time.
    #[error("transform from `{source_frame}` to `{target_frame}` requires extrapolation")]
    Extrapolation {
        source_frame: String,
        target_frame: String,
    },

    /// The lookup did not complete within the allowed timeout.
    #[error("transform lookup timed out after {timeout:?}")]
    Timeout { timeout: std::time::Duration },
}
