use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Motion constants, loadable from the `motion:` section of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// World units moved by one discrete key press or button click.
    pub step: f32,
    /// Fraction of `step` applied per frame while a direction is held.
    pub hold_factor: f32,
    /// Target x/z are clamped to `[-arena_half_extent, arena_half_extent]`.
    pub arena_half_extent: f32,
    /// Per-frame exponential smoothing of current x/z toward target.
    pub position_smoothing: f32,
    /// Per-call yaw interpolation toward the facing angle.
    pub turn_rate: f32,
    pub moving_quiet_ms: u64,
    pub walk_to_idle_ms: u64,
    pub jump_height: f32,
    pub jump_duration_ms: u64,
    pub reset_duration_ms: u64,
    pub dance_tick_ms: u64,
    /// Yaw added per procedural dance tick, radians.
    pub dance_spin: f32,
    /// Per-frame chance of an idle eye flash.
    pub flash_chance: f64,
    pub flash_duration_ms: u64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            step: 0.15,
            hold_factor: 0.4,
            arena_half_extent: 10.0,
            position_smoothing: 0.08,
            turn_rate: 0.1,
            moving_quiet_ms: 300,
            walk_to_idle_ms: 500,
            jump_height: 3.5,
            jump_duration_ms: 1200,
            reset_duration_ms: 1500,
            dance_tick_ms: 50,
            dance_spin: 0.05,
            flash_chance: 0.005,
            flash_duration_ms: 150,
        }
    }
}

impl MotionTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("motion.step", self.step)?;
        positive("motion.hold_factor", self.hold_factor)?;
        positive("motion.arena_half_extent", self.arena_half_extent)?;
        fraction("motion.position_smoothing", self.position_smoothing)?;
        fraction("motion.turn_rate", self.turn_rate)?;
        for (field, value) in [
            ("motion.moving_quiet_ms", self.moving_quiet_ms),
            ("motion.walk_to_idle_ms", self.walk_to_idle_ms),
            ("motion.jump_duration_ms", self.jump_duration_ms),
            ("motion.reset_duration_ms", self.reset_duration_ms),
            ("motion.dance_tick_ms", self.dance_tick_ms),
            ("motion.flash_duration_ms", self.flash_duration_ms),
        ] {
            if value == 0 {
                return Err(TuningError::ZeroDuration { field });
            }
        }
        if !(0.0..=1.0).contains(&self.flash_chance) {
            return Err(TuningError::Probability {
                field: "motion.flash_chance",
                value: self.flash_chance,
            });
        }
        Ok(())
    }

    pub fn moving_quiet(&self) -> Duration {
        Duration::from_millis(self.moving_quiet_ms)
    }

    pub fn walk_to_idle(&self) -> Duration {
        Duration::from_millis(self.walk_to_idle_ms)
    }

    pub fn jump_duration(&self) -> Duration {
        Duration::from_millis(self.jump_duration_ms)
    }

    pub fn reset_duration(&self) -> Duration {
        Duration::from_millis(self.reset_duration_ms)
    }

    pub fn dance_tick(&self) -> Duration {
        Duration::from_millis(self.dance_tick_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }
}

/// Orbit camera limits and input sensitivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitTuning {
    pub min_distance: f32,
    pub max_distance: f32,
    pub start_distance: f32,
    /// Keeps the polar angle inside `[margin, PI - margin]`.
    pub polar_margin: f32,
    /// Radians per pixel of drag.
    pub drag_sensitivity: f32,
    /// World units per wheel line.
    pub zoom_per_line: f32,
    /// Height of the look-at point above the ground.
    pub look_height: f32,
}

impl Default for OrbitTuning {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 25.0,
            start_distance: 12.0,
            polar_margin: 0.1,
            drag_sensitivity: 0.005,
            zoom_per_line: 1.0,
            look_height: 2.0,
        }
    }
}

impl OrbitTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("camera.min_distance", self.min_distance)?;
        positive("camera.drag_sensitivity", self.drag_sensitivity)?;
        positive("camera.zoom_per_line", self.zoom_per_line)?;
        if self.max_distance < self.min_distance {
            return Err(TuningError::Range {
                field: "camera.max_distance",
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if !(0.0..std::f32::consts::FRAC_PI_2).contains(&self.polar_margin) {
            return Err(TuningError::Range {
                field: "camera.polar_margin",
                min: 0.0,
                max: self.polar_margin,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be within [0, 1], got {value}")]
    Fraction { field: &'static str, value: f32 },
    #[error("{field} must be within [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must be a non-zero duration")]
    ZeroDuration { field: &'static str },
    #[error("{field} is out of range (min {min}, max {max})")]
    Range {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn fraction(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::Fraction { field, value })
    }
}
