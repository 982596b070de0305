use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// World-space coordinates of the robot root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Clamp x and z into `[-half_extent, half_extent]`. y is left alone.
    pub fn clamp_to_arena(self, half_extent: f32) -> Self {
        Self {
            x: self.x.clamp(-half_extent, half_extent),
            y: self.y,
            z: self.z.clamp(-half_extent, half_extent),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Everything the host applies to the robot root each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub position: Position,
    /// Rotation about the vertical axis, radians. Unbounded: the dance
    /// spin keeps adding to it.
    pub yaw: f32,
    /// Rotation about the forward (z) axis, radians.
    pub tilt: f32,
}

/// One exponential smoothing step from `current` toward `target`.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Step `current` toward `target` along the shorter arc.
pub fn lerp_angle(current: f32, target: f32, factor: f32) -> f32 {
    current + shortest_angle(current, target) * factor
}

/// Signed difference `target - current` wrapped into `(-PI, PI]`.
pub fn shortest_angle(current: f32, target: f32) -> f32 {
    let diff = (target - current).rem_euclid(TAU);
    if diff > PI { diff - TAU } else { diff }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_leaves_y_unbounded() {
        let clamped = Position::new(14.0, 40.0, -11.5).clamp_to_arena(10.0);
        assert_eq!(clamped, Position::new(10.0, 40.0, -10.0));
    }

    #[test]
    fn approach_moves_by_factor() {
        assert!((approach(0.0, 10.0, 0.08) - 0.8).abs() < 1e-6);
        assert_eq!(approach(3.0, 3.0, 0.08), 3.0);
    }

    #[test]
    fn shortest_angle_wraps() {
        assert!((shortest_angle(0.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((shortest_angle(0.1, TAU - 0.1) + 0.2).abs() < 1e-5);
        // A spun-up yaw still turns the short way round.
        let spun = 10.0 * TAU + 0.2;
        assert!((shortest_angle(spun, 0.0) + 0.2).abs() < 1e-4);
    }

    #[test]
    fn lerp_angle_takes_short_arc() {
        let next = lerp_angle(3.0, -3.0, 0.5);
        assert!(next > 3.0, "expected to cross PI, got {next}");
    }
}
