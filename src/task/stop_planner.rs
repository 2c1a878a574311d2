// Copyright (c) 2021 Marco Boneberger
// Licensed under the EUPL-1.2-or-later

//! Contains the stop-planner contract and the reference proportional planner.
use crate::task::control_types::VelocityCommand;
use crate::transform::Pose;
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Default proportional gain on position error.
pub static DEFAULT_POSITION_GAIN: f64 = 0.5;
/// Default horizontal speed limit in \[m/s\].
pub static DEFAULT_MAX_TRANSLATION_SPEED: f64 = 3.0;
/// Default vertical speed limit in \[m/s\].
pub static DEFAULT_MAX_Z_VELOCITY: f64 = 1.0;
/// Default control cycle rate in \[Hz\].
pub static DEFAULT_UPDATE_RATE: f64 = 50.0;

/// Shapes motion towards a fixed target bound at construction.
///
/// `step` is called once per control cycle with the latest pose. It must be a
/// function of pose and target plus bounded internal filtering state only:
/// no I/O, no blocking. The returned flag reports whether the position error
/// is within tolerance on all three axes; the command is emitted either way,
/// so the final cycle still carries a hold command.
pub trait StopPlanner {
    /// Produces the velocity command for this cycle and whether the target is reached.
    fn step(&mut self, pose: &Pose) -> (VelocityCommand, bool);
}

/// Tuning for [`TranslateStopPlanner`].
#[derive(Debug, Clone, Copy)]
pub struct PlannerSettings {
    /// Proportional gain applied to the position error.
    pub position_gain: f64,
    /// Speed limit on the x and y axes in \[m/s\].
    pub max_translation_speed: f64,
    /// Speed limit on the z axis in \[m/s\].
    pub max_z_velocity: f64,
    /// Control cycle rate in \[Hz\], used by smoothing and acceleration limiting.
    pub update_rate: f64,
    /// Low-pass cutoff frequency in \[Hz\] for the commanded velocity, if any.
    pub smoothing_cutoff: Option<f64>,
    /// Bound on the commanded acceleration in \[m/s²\], if any.
    pub max_translation_acceleration: Option<f64>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        PlannerSettings {
            position_gain: DEFAULT_POSITION_GAIN,
            max_translation_speed: DEFAULT_MAX_TRANSLATION_SPEED,
            max_z_velocity: DEFAULT_MAX_Z_VELOCITY,
            update_rate: DEFAULT_UPDATE_RATE,
            smoothing_cutoff: None,
            max_translation_acceleration: None,
        }
    }
}

/// Reference [`StopPlanner`]: per-axis proportional response with speed
/// clamps, optional command smoothing and optional acceleration limiting.
#[derive(Debug)]
pub struct TranslateStopPlanner {
    target: Vector3<f64>,
    tolerance: f64,
    settings: PlannerSettings,
    limiter: Option<AccelerationLimiter>,
    last_command: Vector3<f64>,
}

impl TranslateStopPlanner {
    /// Creates a planner for the given target with default tuning.
    ///
    /// # Arguments
    /// * `target` - Target position in the world frame in \[m\].
    /// * `tolerance` - Per-axis reached tolerance in \[m\].
    pub fn new(target: Vector3<f64>, tolerance: f64) -> Self {
        TranslateStopPlanner::with_settings(target, tolerance, PlannerSettings::default())
    }

    /// Creates a planner with explicit tuning.
    pub fn with_settings(target: Vector3<f64>, tolerance: f64, settings: PlannerSettings) -> Self {
        let limiter = settings
            .max_translation_acceleration
            .map(|max| AccelerationLimiter::new(max, settings.update_rate));
        TranslateStopPlanner {
            target,
            tolerance,
            settings,
            limiter,
            last_command: Vector3::zeros(),
        }
    }

    fn within_tolerance(&self, position: &Vector3<f64>) -> bool {
        let error = self.target - position;
        error.iter().all(|e| e.abs() <= self.tolerance)
    }
}

impl StopPlanner for TranslateStopPlanner {
    fn step(&mut self, pose: &Pose) -> (VelocityCommand, bool) {
        let error = self.target - pose.position;
        let max_xy = self.settings.max_translation_speed;
        let max_z = self.settings.max_z_velocity;
        let mut desired = Vector3::new(
            constrain(self.settings.position_gain * error.x, max_xy),
            constrain(self.settings.position_gain * error.y, max_xy),
            constrain(self.settings.position_gain * error.z, max_z),
        );
        if let Some(limiter) = &self.limiter {
            desired = limiter.limit(&self.last_command, &desired);
        }
        if let Some(cutoff) = self.settings.smoothing_cutoff {
            let sample_time = 1.0 / self.settings.update_rate;
            desired = Vector3::from_iterator(
                desired
                    .iter()
                    .zip(self.last_command.iter())
                    .map(|(&y, &y_last)| low_pass_filter(sample_time, y, y_last, cutoff)),
            );
        }
        self.last_command = desired;
        (
            VelocityCommand::new(desired),
            self.within_tolerance(&pose.position),
        )
    }
}

/// Bounds the change of a commanded velocity between consecutive cycles.
#[derive(Debug, Clone, Copy)]
pub struct AccelerationLimiter {
    max_translation_acceleration: f64,
    update_period: f64,
}

impl AccelerationLimiter {
    /// Creates a limiter for the given acceleration bound at the given cycle rate.
    ///
    /// # Arguments
    /// * `max_translation_acceleration` - Acceleration bound in \[m/s²\].
    /// * `update_rate` - Control cycle rate in \[Hz\].
    pub fn new(max_translation_acceleration: f64, update_rate: f64) -> Self {
        AccelerationLimiter {
            max_translation_acceleration,
            update_period: 1.0 / update_rate,
        }
    }

    /// Limits `desired` so the step from `current` stays within the
    /// acceleration bound. Commands within the bound pass through unchanged.
    pub fn limit(&self, current: &Vector3<f64>, desired: &Vector3<f64>) -> Vector3<f64> {
        let delta = desired - current;
        let max_delta = self.max_translation_acceleration * self.update_period;
        let delta_norm = delta.norm();
        if delta_norm > max_delta {
            current + delta * (max_delta / delta_norm)
        } else {
            *desired
        }
    }
}

/// Applies a first-order low-pass filter
///
/// # Arguments
/// * `sample_time` - Sample time constant
/// * `y` - Current value of the signal to be filtered
/// * `y_last` - Value of the signal to be filtered in the previous time step
/// * `cutoff_frequency` - Cutoff frequency of the low-pass filter
/// # Return
/// Filtered value.
pub fn low_pass_filter(sample_time: f64, y: f64, y_last: f64, cutoff_frequency: f64) -> f64 {
    let gain = sample_time / (sample_time + (1.0 / (2.0 * PI * cutoff_frequency)));
    gain * y + (1. - gain) * y_last
}

fn constrain(value: f64, limit: f64) -> f64 {
    value.max(-limit).min(limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Pose;

    fn float_compare(a: f64, b: f64, thresh: f64) {
        assert!((a - b).abs() < thresh, "{} !~ {}", a, b);
    }

    #[test]
    fn proportional_response_below_the_speed_limit() {
        let mut planner = TranslateStopPlanner::new(Vector3::new(2., -2., 5.), 0.1);
        let (command, reached) = planner.step(&Pose::from_position(0., 0., 5.));
        float_compare(command.linear.x, 1.0, 1e-12);
        float_compare(command.linear.y, -1.0, 1e-12);
        float_compare(command.linear.z, 0.0, 1e-12);
        assert_eq!(command.angular, Vector3::zeros());
        assert!(!reached);
    }

    #[test]
    fn commands_are_clamped_per_axis() {
        let mut planner = TranslateStopPlanner::new(Vector3::new(100., -100., 100.), 0.1);
        let (command, _) = planner.step(&Pose::from_position(0., 0., 0.));
        float_compare(command.linear.x, DEFAULT_MAX_TRANSLATION_SPEED, 1e-12);
        float_compare(command.linear.y, -DEFAULT_MAX_TRANSLATION_SPEED, 1e-12);
        float_compare(command.linear.z, DEFAULT_MAX_Z_VELOCITY, 1e-12);
    }

    #[test]
    fn reached_requires_all_three_axes_within_tolerance() {
        let mut planner = TranslateStopPlanner::new(Vector3::new(10., 0., 5.), 0.1);
        let (_, reached) = planner.step(&Pose::from_position(9.95, 0., 5.));
        assert!(reached);
        let (_, reached) = planner.step(&Pose::from_position(9.95, 0.2, 5.));
        assert!(!reached);
        let (_, reached) = planner.step(&Pose::from_position(9.95, 0., 4.8));
        assert!(!reached);
    }

    #[test]
    fn final_cycle_still_emits_a_hold_command() {
        let mut planner = TranslateStopPlanner::new(Vector3::new(10., 0., 5.), 0.1);
        let (command, reached) = planner.step(&Pose::from_position(9.95, 0., 5.));
        assert!(reached);
        float_compare(command.linear.x, 0.025, 1e-12);
    }

    #[test]
    fn low_pass_test() {
        float_compare(low_pass_filter(0.001, 1.0, 1.0, 100.0), 1., 1e-6);
        float_compare(low_pass_filter(0.001, 1.0, 0.0, 100.0), 0.3859, 1e-4);
        float_compare(low_pass_filter(0.001, 1.0, 0.0, 500.0), 0.7585, 1e-4);
    }

    #[test]
    fn smoothing_pulls_the_first_command_towards_zero() {
        let settings = PlannerSettings {
            smoothing_cutoff: Some(10.0),
            ..PlannerSettings::default()
        };
        let mut smoothed =
            TranslateStopPlanner::with_settings(Vector3::new(10., 0., 5.), 0.1, settings);
        let mut raw = TranslateStopPlanner::new(Vector3::new(10., 0., 5.), 0.1);
        let pose = Pose::from_position(0., 0., 5.);
        let (smoothed_command, _) = smoothed.step(&pose);
        let (raw_command, _) = raw.step(&pose);
        assert!(smoothed_command.linear.x > 0.);
        assert!(smoothed_command.linear.x < raw_command.linear.x);
    }

    #[test]
    fn limiter_passes_small_changes_through() {
        let limiter = AccelerationLimiter::new(2.0, 50.0);
        let current = Vector3::new(1.0, 0., 0.);
        let desired = Vector3::new(1.02, 0., 0.);
        assert_eq!(limiter.limit(&current, &desired), desired);
    }

    #[test]
    fn limiter_scales_large_changes_to_the_bound() {
        let limiter = AccelerationLimiter::new(2.0, 50.0);
        let current = Vector3::new(1.0, 0., 0.);
        let desired = Vector3::new(2.0, 0., 0.);
        let limited = limiter.limit(&current, &desired);
        // 2 m/s² over one 20 ms cycle allows a 0.04 m/s step
        float_compare(limited.x, 1.04, 1e-12);
        float_compare((limited - current).norm(), 0.04, 1e-12);
    }

    #[test]
    fn limited_planner_ramps_up_instead_of_jumping() {
        let settings = PlannerSettings {
            max_translation_acceleration: Some(2.0),
            ..PlannerSettings::default()
        };
        let mut planner =
            TranslateStopPlanner::with_settings(Vector3::new(10., 0., 5.), 0.1, settings);
        let pose = Pose::from_position(0., 0., 5.);
        let (first, _) = planner.step(&pose);
        let (second, _) = planner.step(&pose);
        float_compare(first.linear.x, 0.04, 1e-12);
        float_compare(second.linear.x, 0.08, 1e-12);
    }
}
