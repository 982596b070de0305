//! User intents and the orbit camera they steer.

use std::f32::consts::{FRAC_PI_2, PI};

use rand::Rng;

use crate::clock::Clock;
use crate::controller::MotionController;
use crate::pose::Position;
use crate::tuning::OrbitTuning;

/// Horizontal movement directions. Forward is -z, the way the camera looks
/// at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dx, dz)` for a move of `step` units.
    pub fn delta(self, step: f32) -> (f32, f32) {
        match self {
            Direction::Forward => (0.0, -step),
            Direction::Back => (0.0, step),
            Direction::Left => (-step, 0.0),
            Direction::Right => (step, 0.0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Forward => 1,
            Direction::Back => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
        }
    }
}

/// Set of directions currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    bits: u8,
}

impl HeldDirections {
    pub fn press(&mut self, direction: Direction) {
        self.bits |= direction.bit();
    }

    pub fn release(&mut self, direction: Direction) {
        self.bits &= !direction.bit();
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        if held {
            self.press(direction);
        } else {
            self.release(direction);
        }
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.bits & direction.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.contains(*direction))
    }
}

/// One discrete user intent: a key press or a button click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Dance,
    Reset,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Forward => "Up",
            Action::Back => "Down",
            Action::Left => "Left",
            Action::Right => "Right",
            Action::Jump => "Jump",
            Action::Dance => "Dance",
            Action::Reset => "Reset",
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Forward => Some(Direction::Forward),
            Action::Back => Some(Direction::Back),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Jump | Action::Dance | Action::Reset => None,
        }
    }
}

/// Route one action to exactly one controller call.
pub fn dispatch<C: Clock, R: Rng>(action: Action, controller: &mut MotionController<C, R>) {
    match action {
        Action::Forward => controller.step(Direction::Forward),
        Action::Back => controller.step(Direction::Back),
        Action::Left => controller.step(Direction::Left),
        Action::Right => controller.step(Direction::Right),
        Action::Jump => controller.jump(),
        Action::Dance => controller.toggle_dance(),
        Action::Reset => controller.reset(),
    }
}

/// Spherical-coordinate camera orbiting a fixed look-at point.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Position,
    /// Angle around the vertical axis; 0 looks from +z.
    pub azimuth: f32,
    /// Angle down from straight up.
    pub polar: f32,
    pub distance: f32,
    tuning: OrbitTuning,
}

impl OrbitCamera {
    /// Starts behind the robot, looking at it from slightly above.
    pub fn new(tuning: OrbitTuning) -> Self {
        let distance = tuning
            .start_distance
            .clamp(tuning.min_distance, tuning.max_distance);
        Self {
            target: Position::new(0.0, tuning.look_height, 0.0),
            azimuth: 0.0,
            polar: FRAC_PI_2 - 0.3,
            distance,
            tuning,
        }
    }

    pub fn tuning(&self) -> &OrbitTuning {
        &self.tuning
    }

    /// Rotate by a pointer drag measured in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.tuning.drag_sensitivity;
        let margin = self.tuning.polar_margin;
        self.azimuth -= dx * sensitivity;
        self.polar = (self.polar - dy * sensitivity).clamp(margin, PI - margin);
    }

    /// Dolly by wheel lines; positive lines move closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * self.tuning.zoom_per_line)
            .clamp(self.tuning.min_distance, self.tuning.max_distance);
    }

    pub fn eye(&self) -> Position {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Position::new(
            self.target.x + self.distance * sin_polar * sin_azimuth,
            self.target.y + self.distance * cos_polar,
            self.target.z + self.distance * sin_polar * cos_azimuth,
        )
    }
}
