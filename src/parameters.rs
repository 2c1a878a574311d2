// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the parameter store and the threshold bundle loaded from it.
use crate::exception::{create_missing_parameter_exception, TaskException, TaskResult};
use std::collections::HashMap;
use std::time::Duration;

/// Parameter key for [`Thresholds::translation_xyz_tolerance`].
pub const TRANSLATION_XYZ_TOLERANCE: &str = "translation_xyz_tolerance";
/// Parameter key for [`Thresholds::transform_timeout`], in seconds.
pub const TRANSFORM_TIMEOUT: &str = "transform_timeout";
/// Parameter key for [`Thresholds::min_maneuver_height`].
pub const MIN_MANEUVER_HEIGHT: &str = "min_maneuver_height";

/// A fully-populated key-value store of tunable parameters.
///
/// The executor fills the store once before constructing tasks. Lookups of
/// keys that were never supplied fail with
/// [`ConfigurationError`](`crate::exception::TaskException::ConfigurationError`),
/// so a misconfigured deployment is caught at task construction and not
/// mid-flight.
#[derive(Debug, Default, Clone)]
pub struct ParameterStore {
    values: HashMap<String, f64>,
}

impl ParameterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        ParameterStore {
            values: HashMap::new(),
        }
    }

    /// Sets a parameter, replacing any previous value under the same key.
    pub fn set(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
    }

    /// Looks up a parameter.
    /// # Errors
    /// * [`ConfigurationError`](`crate::exception::TaskException::ConfigurationError`)
    /// if the key was never supplied.
    pub fn get(&self, key: &str) -> TaskResult<f64> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| create_missing_parameter_exception(key))
    }
}

/// Validated threshold bundle consumed by a task at construction.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Per-axis distance below which the target counts as reached.
    pub translation_xyz_tolerance: f64,
    /// Upper bound on a single pose lookup.
    pub transform_timeout: Duration,
    /// Altitude floor below which maneuvers are unsafe.
    pub min_maneuver_height: f64,
}

impl Thresholds {
    /// Creates a threshold bundle, validating each field once.
    ///
    /// # Arguments
    /// * `translation_xyz_tolerance` - Reached tolerance, must be finite and positive.
    /// * `transform_timeout` - Pose lookup timeout in seconds, must be finite and positive.
    /// * `min_maneuver_height` - Altitude floor, must be finite.
    /// # Errors
    /// * [`ConfigurationError`](`crate::exception::TaskException::ConfigurationError`)
    /// if any value is out of range.
    pub fn new(
        translation_xyz_tolerance: f64,
        transform_timeout: f64,
        min_maneuver_height: f64,
    ) -> TaskResult<Self> {
        if !(translation_xyz_tolerance.is_finite() && translation_xyz_tolerance > 0.) {
            return Err(invalid_parameter(
                TRANSLATION_XYZ_TOLERANCE,
                translation_xyz_tolerance,
            ));
        }
        if !(transform_timeout.is_finite() && transform_timeout > 0.) {
            return Err(invalid_parameter(TRANSFORM_TIMEOUT, transform_timeout));
        }
        if !min_maneuver_height.is_finite() {
            return Err(invalid_parameter(MIN_MANEUVER_HEIGHT, min_maneuver_height));
        }
        Ok(Thresholds {
            translation_xyz_tolerance,
            transform_timeout: Duration::from_secs_f64(transform_timeout),
            min_maneuver_height,
        })
    }

    /// Loads and validates the threshold bundle from a parameter store.
    /// # Errors
    /// * [`ConfigurationError`](`crate::exception::TaskException::ConfigurationError`)
    /// if a key is missing or a value is out of range.
    pub fn from_store(store: &ParameterStore) -> TaskResult<Self> {
        Thresholds::new(
            store.get(TRANSLATION_XYZ_TOLERANCE)?,
            store.get(TRANSFORM_TIMEOUT)?,
            store.get(MIN_MANEUVER_HEIGHT)?,
        )
    }

    /// Returns whether the given altitude is strictly above the maneuver floor.
    pub fn above_min_maneuver_height(&self, current_height: f64) -> bool {
        current_height > self.min_maneuver_height
    }
}

fn invalid_parameter(key: &str, value: f64) -> TaskException {
    TaskException::ConfigurationError {
        message: format!("parameter `{}` has invalid value {}", key, value),
    }
}
