//! Robot motion state machine.
//!
//! One [`MotionController`] owns every time-varying aspect of the robot:
//! target/current position, yaw and tilt, the moving/jumping/dancing/
//! resetting flags, clip cross-fade decisions, and the procedural jump arc,
//! dance loop, reset tween and idle micro-motion. The host calls
//! [`MotionController::tick`] once per frame after updating the clock, then
//! applies [`MotionController::pose`] and drains [`MotionCommand`]s.
//!
//! Every timed effect is either a [`Tween`] or a keyed deadline in a
//! [`TimerSet`], both advanced inside `tick`, so ordering is deterministic and
//! tests never wait on real time.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::time::Duration;

use crate::clock::{Clock, ManualClock};
use crate::easing::Easing;
use crate::input::{Direction, HeldDirections};
use crate::pose::{Pose, Position, approach, lerp_angle};
use crate::roles::ClipRole;
use crate::timers::{TimerKey, TimerSet};
use crate::tuning::MotionTuning;
use crate::tween::{Channel, Tween, TweenEvent, TweenSet};

const WALK_FADE: Duration = Duration::from_millis(200);
const JUMP_FADE: Duration = Duration::from_millis(100);
const DANCE_FADE: Duration = Duration::from_millis(300);
const DANCE_FADE_OUT: Duration = Duration::from_millis(500);
const IDLE_FADE: Duration = Duration::from_millis(500);
const TILT_SETTLE: Duration = Duration::from_millis(500);
/// Elapsed dance milliseconds → dance phase.
const DANCE_PHASE_PER_MS: f32 = 0.008;
const DANCE_BOB_RATE: f32 = 2.5;
const DANCE_BOB_HEIGHT: f32 = 0.2;
const DANCE_SWAY_RATE: f32 = 1.5;
const DANCE_SWAY_ANGLE: f32 = 0.2;
const BREATH_RATE: f32 = 1.2;
const BREATH_HEIGHT: f32 = 0.02;

/// Instructions for the host's animation mixer and materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCommand {
    /// Fade `clip` in over `fade` while fading out whatever plays.
    CrossFade {
        clip: ClipRole,
        fade: Duration,
        repeat: bool,
    },
    /// Fade every playing clip out over `fade`.
    FadeOutAll { fade: Duration },
    /// Switch the eyes (or visor) to the flash emissive.
    FlashEyes,
    /// Put back the emissive that was there before `FlashEyes`.
    RestoreEyes,
}

/// Highest-priority motion currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    Idle,
    Moving,
    Jumping,
    Dancing,
    Resetting,
}

/// What the loaded model offers the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelProfile {
    pub clips: HashSet<ClipRole>,
    /// True when an eyes or visor part exists to flash.
    pub flash_part: bool,
}

impl ModelProfile {
    /// Procedural-only model, such as the fallback robot.
    pub fn procedural(flash_part: bool) -> Self {
        Self {
            clips: HashSet::new(),
            flash_part,
        }
    }

    pub fn with_clips(clips: impl IntoIterator<Item = ClipRole>, flash_part: bool) -> Self {
        Self {
            clips: clips.into_iter().collect(),
            flash_part,
        }
    }

    pub fn has_clip(&self, clip: ClipRole) -> bool {
        self.clips.contains(&clip)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdleClip {
    Inactive,
    /// Waiting on a walk-to-idle or dance-to-idle deadline.
    Pending,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DanceMode {
    Clip,
    Procedural { started: Duration, next_tick: Duration },
}

pub struct MotionController<C: Clock = ManualClock, R: Rng = StdRng> {
    clock: C,
    rng: R,
    tuning: MotionTuning,
    model: Option<ModelProfile>,
    pose: Pose,
    target: Position,
    facing: f32,
    moving: bool,
    jumping: bool,
    dancing: bool,
    resetting: bool,
    flashing: bool,
    idle_clip: IdleClip,
    dance: Option<DanceMode>,
    tweens: TweenSet,
    timers: TimerSet,
    commands: Vec<MotionCommand>,
}

impl MotionController<ManualClock, StdRng> {
    pub fn new(tuning: MotionTuning) -> Self {
        Self::with_parts(ManualClock::new(), StdRng::from_entropy(), tuning)
    }
}

impl<C: Clock, R: Rng> MotionController<C, R> {
    pub fn with_parts(clock: C, rng: R, tuning: MotionTuning) -> Self {
        Self {
            clock,
            rng,
            tuning,
            model: None,
            pose: Pose::default(),
            target: Position::ORIGIN,
            facing: 0.0,
            moving: false,
            jumping: false,
            dancing: false,
            resetting: false,
            flashing: false,
            idle_clip: IdleClip::Inactive,
            dance: None,
            tweens: TweenSet::new(),
            timers: TimerSet::new(),
            commands: Vec::new(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn tuning(&self) -> &MotionTuning {
        &self.tuning
    }

    /// Hand the controller a model. Idle re-arms so the first idle frame
    /// starts the idle clip.
    pub fn attach_model(&mut self, profile: ModelProfile) {
        log::debug!(
            "motion model attached ({} clip roles, flash part: {})",
            profile.clips.len(),
            profile.flash_part
        );
        self.model = Some(profile);
        self.idle_clip = IdleClip::Inactive;
    }

    pub fn detach_model(&mut self) {
        self.model = None;
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&ModelProfile> {
        self.model.as_ref()
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn target(&self) -> Position {
        self.target
    }

    /// Facing angle computed by the last horizontal `move_by`.
    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn is_dancing(&self) -> bool {
        self.dancing
    }

    pub fn is_resetting(&self) -> bool {
        self.resetting
    }

    pub fn state(&self) -> MotionState {
        if self.jumping {
            MotionState::Jumping
        } else if self.dancing {
            MotionState::Dancing
        } else if self.resetting {
            MotionState::Resetting
        } else if self.moving {
            MotionState::Moving
        } else {
            MotionState::Idle
        }
    }

    /// Commands produced since the last drain, oldest first.
    pub fn drain_commands(&mut self) -> Vec<MotionCommand> {
        std::mem::take(&mut self.commands)
    }

    fn has_clip(&self, clip: ClipRole) -> bool {
        self.model.as_ref().is_some_and(|model| model.has_clip(clip))
    }

    fn idle_blocked(&self) -> bool {
        self.moving || self.jumping || self.dancing
    }

    /// Shift the target by a delta; turns toward horizontal motion.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        if self.jumping || self.model.is_none() {
            return;
        }
        let now = self.clock.now();

        self.target = Position::new(self.target.x + dx, self.target.y + dy, self.target.z + dz)
            .clamp_to_arena(self.tuning.arena_half_extent);

        if dx != 0.0 || dz != 0.0 {
            self.facing = dx.atan2(dz);
            self.pose.yaw = lerp_angle(self.pose.yaw, self.facing, self.tuning.turn_rate);
        }

        if !self.moving {
            log::trace!("moving");
        }
        self.moving = true;
        self.timers
            .schedule(TimerKey::MovingQuiet, now + self.tuning.moving_quiet());

        if self.has_clip(ClipRole::Walk) && !self.dancing {
            self.commands.push(MotionCommand::CrossFade {
                clip: ClipRole::Walk,
                fade: WALK_FADE,
                repeat: true,
            });
            self.idle_clip = IdleClip::Pending;
            self.timers
                .schedule(TimerKey::WalkToIdle, now + self.tuning.walk_to_idle());
        }
    }

    /// Start the procedural jump arc, plus the jump clip when there is one.
    pub fn jump(&mut self) {
        if self.jumping || self.dancing || self.model.is_none() {
            return;
        }
        let now = self.clock.now();

        if self.has_clip(ClipRole::Jump) {
            self.commands.push(MotionCommand::CrossFade {
                clip: ClipRole::Jump,
                fade: JUMP_FADE,
                repeat: false,
            });
            self.idle_clip = IdleClip::Inactive;
        }

        let arc = Tween::arc(
            Channel::Y,
            self.pose.position.y,
            self.tuning.jump_height,
            now,
            self.tuning.jump_duration(),
        )
        .with_easing(Easing::JumpCurve)
        .locked()
        .on_complete(TweenEvent::JumpLanded);

        // An unlocked y tween (a reset in flight) yields to the arc.
        self.tweens.start(arc);
        self.jumping = true;
        log::debug!("jump started at y = {:.3}", self.pose.position.y);
    }

    /// Flip dancing on or off.
    pub fn toggle_dance(&mut self) {
        if self.jumping || self.model.is_none() {
            return;
        }
        let now = self.clock.now();
        self.dancing = !self.dancing;

        if self.dancing {
            log::debug!("dance on");
            if self.has_clip(ClipRole::Dance) {
                self.commands.push(MotionCommand::CrossFade {
                    clip: ClipRole::Dance,
                    fade: DANCE_FADE,
                    repeat: true,
                });
                self.idle_clip = IdleClip::Inactive;
                self.timers.cancel(TimerKey::WalkToIdle);
                self.timers.cancel(TimerKey::DanceToIdle);
                self.dance = Some(DanceMode::Clip);
            } else {
                self.dance = Some(DanceMode::Procedural {
                    started: now,
                    next_tick: now + self.tuning.dance_tick(),
                });
            }
            return;
        }

        log::debug!("dance off");
        match self.dance.take() {
            Some(DanceMode::Clip) => {
                self.commands.push(MotionCommand::FadeOutAll {
                    fade: DANCE_FADE_OUT,
                });
                self.idle_clip = IdleClip::Pending;
                self.timers
                    .schedule(TimerKey::DanceToIdle, now + DANCE_FADE_OUT);
            }
            Some(DanceMode::Procedural { .. }) => {
                // Settle the bob; clip models get no breathing to do it.
                self.tweens.start(
                    Tween::lerp(Channel::Y, self.pose.position.y, 0.0, now, TILT_SETTLE)
                        .with_easing(Easing::EaseOutCubic),
                );
            }
            None => {}
        }
        self.tweens.start(
            Tween::lerp(Channel::Tilt, self.pose.tilt, 0.0, now, TILT_SETTLE)
                .with_easing(Easing::EaseOutCubic),
        );
    }

    /// Tween back to the origin facing forward, stopping any dance first.
    pub fn reset(&mut self) {
        if self.model.is_none() {
            return;
        }
        if self.dancing {
            self.toggle_dance();
        }
        let now = self.clock.now();
        let duration = self.tuning.reset_duration();

        self.target = Position::ORIGIN;
        self.tweens.cancel(Channel::Tilt);
        self.pose.tilt = 0.0;

        for channel in [Channel::X, Channel::Y, Channel::Z] {
            // The jump arc keeps y until it lands.
            if self.tweens.is_locked(channel) {
                continue;
            }
            let from = channel.read(&self.pose);
            self.tweens.start(
                Tween::lerp(channel, from, 0.0, now, duration).with_easing(Easing::EaseOutCubic),
            );
        }
        self.tweens.start(
            Tween::lerp(Channel::Yaw, self.pose.yaw, 0.0, now, duration)
                .with_easing(Easing::EaseOutCubic)
                .on_complete(TweenEvent::ResetSettled),
        );
        self.resetting = true;
        log::debug!("reset started");
    }

    /// Idle behaviour for one frame. Does nothing while moving, jumping or
    /// dancing.
    pub fn update_idle(&mut self) {
        if self.idle_blocked() {
            return;
        }
        let Some(model) = self.model.as_ref() else {
            return;
        };
        let now = self.clock.now();

        if model.has_clip(ClipRole::Idle) {
            if self.idle_clip == IdleClip::Inactive {
                self.commands.push(MotionCommand::CrossFade {
                    clip: ClipRole::Idle,
                    fade: IDLE_FADE,
                    repeat: true,
                });
                self.idle_clip = IdleClip::Active;
            }
            return;
        }

        let flash_part = model.flash_part;
        let t = now.as_secs_f32();
        if !self.tweens.is_active(Channel::Y) {
            self.pose.position.y = (t * BREATH_RATE).sin() * BREATH_HEIGHT;
        }

        if flash_part && !self.flashing && self.rng.gen_bool(self.tuning.flash_chance) {
            self.flashing = true;
            self.commands.push(MotionCommand::FlashEyes);
            self.timers
                .schedule(TimerKey::EyeFlashEnd, now + self.tuning.flash_duration());
        }
    }

    /// Per-frame movement for every held direction, at a reduced step.
    pub fn update_continuous(&mut self, held: HeldDirections) {
        let step = self.tuning.step * self.tuning.hold_factor;
        for direction in held.iter() {
            let (dx, dz) = direction.delta(step);
            self.move_by(dx, 0.0, dz);
        }
    }

    /// Discrete move for one key press or button click.
    pub fn step(&mut self, direction: Direction) {
        let (dx, dz) = direction.delta(self.tuning.step);
        self.move_by(dx, 0.0, dz);
    }

    /// Advance one frame at the clock's current time.
    pub fn tick(&mut self, held: HeldDirections) {
        if self.model.is_none() {
            return;
        }
        let now = self.clock.now();

        self.update_continuous(held);

        let smoothing = self.tuning.position_smoothing;
        self.pose.position.x = approach(self.pose.position.x, self.target.x, smoothing);
        self.pose.position.z = approach(self.pose.position.z, self.target.z, smoothing);

        for key in self.timers.due(now) {
            self.fire(key);
        }

        self.advance_dance(now);

        for event in self.tweens.advance(now, &mut self.pose) {
            match event {
                TweenEvent::JumpLanded => {
                    self.jumping = false;
                    log::debug!("jump landed");
                }
                TweenEvent::ResetSettled => {
                    self.resetting = false;
                    log::debug!("reset settled");
                }
            }
        }

        if !self.idle_blocked() {
            self.update_idle();
        }
    }

    fn fire(&mut self, key: TimerKey) {
        match key {
            TimerKey::MovingQuiet => {
                self.moving = false;
                log::trace!("movement quiet");
            }
            TimerKey::WalkToIdle => {
                if !self.moving && !self.dancing {
                    self.enter_idle_clip();
                } else {
                    self.rearm_idle_clip();
                }
            }
            TimerKey::DanceToIdle => {
                if !self.dancing {
                    self.enter_idle_clip();
                } else {
                    self.rearm_idle_clip();
                }
            }
            TimerKey::EyeFlashEnd => {
                self.flashing = false;
                self.commands.push(MotionCommand::RestoreEyes);
            }
        }
    }

    /// A skipped idle return leaves the clip for the next unblocked
    /// `update_idle` to start.
    fn rearm_idle_clip(&mut self) {
        if self.idle_clip == IdleClip::Pending {
            self.idle_clip = IdleClip::Inactive;
        }
    }

    fn enter_idle_clip(&mut self) {
        if self.idle_clip == IdleClip::Active || !self.has_clip(ClipRole::Idle) {
            return;
        }
        self.commands.push(MotionCommand::CrossFade {
            clip: ClipRole::Idle,
            fade: IDLE_FADE,
            repeat: true,
        });
        self.idle_clip = IdleClip::Active;
    }

    fn advance_dance(&mut self, now: Duration) {
        let Some(DanceMode::Procedural { started, next_tick }) = self.dance else {
            return;
        };
        let cadence = self.tuning.dance_tick();
        let mut next = next_tick;
        let mut last = None;
        while next <= now {
            self.pose.yaw += self.tuning.dance_spin;
            last = Some(next);
            next += cadence;
        }
        if let Some(sampled) = last {
            let t = sampled.saturating_sub(started).as_millis() as f32 * DANCE_PHASE_PER_MS;
            self.pose.position.y = (t * DANCE_BOB_RATE).sin() * DANCE_BOB_HEIGHT;
            self.pose.tilt = (t * DANCE_SWAY_RATE).sin() * DANCE_SWAY_ANGLE;
        }
        self.dance = Some(DanceMode::Procedural {
            started,
            next_tick: next,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::f32::consts::PI;

    type TestController = MotionController<ManualClock, StepRng>;

    const FRAME: Duration = Duration::from_millis(16);

    /// RNG whose `gen_bool` never fires.
    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    /// RNG whose `gen_bool` always fires.
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn controller(profile: ModelProfile, rng: StepRng) -> TestController {
        let mut controller =
            MotionController::with_parts(ManualClock::new(), rng, MotionTuning::default());
        controller.attach_model(profile);
        controller
    }

    fn procedural() -> TestController {
        controller(ModelProfile::procedural(true), never())
    }

    fn clipped() -> TestController {
        controller(ModelProfile::with_clips(ClipRole::ALL, true), never())
    }

    #[test]
    fn detached_controller_ignores_commands() {
        let mut controller = procedural();
        controller.detach_model();
        assert!(!controller.has_model());

        controller.step(Direction::Forward);
        controller.jump();
        controller.toggle_dance();
        controller.tick(HeldDirections::default());

        assert_eq!(controller.target(), Position::ORIGIN);
        assert!(!controller.is_jumping());
        assert!(!controller.is_dancing());
        assert!(controller.drain_commands().is_empty());
    }

    fn run_for(controller: &mut TestController, duration: Duration) {
        let end = controller.clock().now() + duration;
        while controller.clock().now() < end {
            controller.clock_mut().advance(FRAME);
            controller.tick(HeldDirections::default());
        }
    }

    #[test]
    fn single_forward_move_sets_target_and_facing() {
        let mut c = procedural();
        c.move_by(0.0, 0.0, -0.15);
        assert_eq!(c.target(), Position::new(0.0, 0.0, -0.15));
        assert!((c.facing() - PI).abs() < 1e-6);
        assert!(c.is_moving());
    }

    #[test]
    fn target_is_clamped_for_any_sequence() {
        let mut c = procedural();
        for _ in 0..200 {
            c.move_by(0.15, 0.0, 0.0);
        }
        assert_eq!(c.target().x, 10.0);

        let deltas = [(-7.0, 3.0), (-9.5, -40.0), (25.0, 0.2), (0.0, 13.0), (-0.1, -0.1)];
        for (dx, dz) in deltas {
            c.move_by(dx, 0.5, dz);
            let target = c.target();
            assert!((-10.0..=10.0).contains(&target.x));
            assert!((-10.0..=10.0).contains(&target.z));
        }
        // y is not clamped.
        assert!((c.target().y - 2.5).abs() < 1e-5);
    }

    #[test]
    fn operations_are_noops_without_model() {
        let mut c: TestController =
            MotionController::with_parts(ManualClock::new(), never(), MotionTuning::default());
        c.move_by(1.0, 0.0, 1.0);
        c.jump();
        c.toggle_dance();
        c.reset();
        c.tick(HeldDirections::default());
        assert_eq!(c.target(), Position::ORIGIN);
        assert_eq!(c.state(), MotionState::Idle);
        assert!(c.drain_commands().is_empty());
    }

    #[test]
    fn moving_clears_after_quiet_period() {
        let mut c = procedural();
        c.move_by(0.15, 0.0, 0.0);
        run_for(&mut c, Duration::from_millis(200));
        assert!(c.is_moving());

        // Another call restarts the quiet period.
        c.move_by(0.15, 0.0, 0.0);
        run_for(&mut c, Duration::from_millis(200));
        assert!(c.is_moving());

        run_for(&mut c, Duration::from_millis(120));
        assert!(!c.is_moving());
    }

    #[test]
    fn current_position_smooths_toward_target() {
        let mut c = procedural();
        c.move_by(1.0, 0.0, 0.0);
        c.clock_mut().advance(FRAME);
        c.tick(HeldDirections::default());
        assert!((c.pose().position.x - 0.08).abs() < 1e-6);

        run_for(&mut c, Duration::from_secs(3));
        assert!((c.pose().position.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn yaw_turns_a_fraction_per_call() {
        let mut c = procedural();
        c.move_by(1.0, 0.0, 0.0);
        let expected = (PI / 2.0) * 0.1;
        assert!((c.pose().yaw - expected).abs() < 1e-6);
        c.move_by(1.0, 0.0, 0.0);
        let expected = expected + (PI / 2.0 - expected) * 0.1;
        assert!((c.pose().yaw - expected).abs() < 1e-6);
    }

    #[test]
    fn vertical_only_move_keeps_facing() {
        let mut c = procedural();
        c.move_by(0.0, 1.0, 0.0);
        assert_eq!(c.facing(), 0.0);
        assert_eq!(c.pose().yaw, 0.0);
    }

    #[test]
    fn jump_arc_rises_and_lands() {
        let mut c = procedural();
        c.jump();
        assert!(c.is_jumping());
        assert_eq!(c.state(), MotionState::Jumping);

        run_for(&mut c, Duration::from_millis(600));
        assert!(c.pose().position.y > 3.0, "peak near 3.5, got {}", c.pose().position.y);

        run_for(&mut c, Duration::from_millis(620));
        assert!(!c.is_jumping());
        assert!(c.pose().position.y.abs() < 0.05);
    }

    #[test]
    fn jump_while_jumping_changes_nothing() {
        let mut c = procedural();
        c.jump();
        run_for(&mut c, Duration::from_millis(300));
        let pose = c.pose();
        let target = c.target();
        c.jump();
        assert!(c.is_jumping());
        assert_eq!(c.pose(), pose);
        assert_eq!(c.target(), target);
    }

    #[test]
    fn move_is_blocked_while_jumping() {
        let mut c = procedural();
        c.jump();
        c.move_by(1.0, 0.0, 1.0);
        assert_eq!(c.target(), Position::ORIGIN);
        assert!(!c.is_moving());
    }

    #[test]
    fn jump_with_clip_plays_once() {
        let mut c = clipped();
        c.drain_commands();
        c.jump();
        assert_eq!(
            c.drain_commands(),
            vec![MotionCommand::CrossFade {
                clip: ClipRole::Jump,
                fade: JUMP_FADE,
                repeat: false
            }]
        );
        assert!(c.is_jumping());
    }

    #[test]
    fn dance_then_jump_keeps_exclusion() {
        let mut c = procedural();
        c.toggle_dance();
        c.jump();
        assert!(c.is_dancing());
        assert!(!c.is_jumping());
    }

    #[test]
    fn jump_then_dance_keeps_exclusion() {
        let mut c = procedural();
        c.jump();
        c.toggle_dance();
        assert!(c.is_jumping());
        assert!(!c.is_dancing());

        for _ in 0..100 {
            c.clock_mut().advance(FRAME);
            c.tick(HeldDirections::default());
            assert!(!(c.is_jumping() && c.is_dancing()));
        }
        assert!(!c.is_jumping());
        c.toggle_dance();
        assert!(c.is_dancing());
    }

    #[test]
    fn procedural_dance_spins_every_tick() {
        let mut c = procedural();
        c.toggle_dance();
        assert_eq!(c.state(), MotionState::Dancing);

        c.clock_mut().advance(Duration::from_millis(500));
        c.tick(HeldDirections::default());
        assert!((c.pose().yaw - 0.5).abs() < 1e-5, "10 ticks of 0.05");

        let t = 500.0 * DANCE_PHASE_PER_MS;
        assert!((c.pose().position.y - (t * 2.5).sin() * 0.2).abs() < 1e-5);
        assert!((c.pose().tilt - (t * 1.5).sin() * 0.2).abs() < 1e-5);
    }

    #[test]
    fn dance_off_stops_spin_and_settles_tilt() {
        let mut c = procedural();
        c.toggle_dance();
        run_for(&mut c, Duration::from_millis(400));
        c.toggle_dance();
        assert!(!c.is_dancing());
        let yaw = c.pose().yaw;

        run_for(&mut c, Duration::from_millis(600));
        assert_eq!(c.pose().yaw, yaw);
        assert_eq!(c.pose().tilt, 0.0);
    }

    #[test]
    fn clip_dance_fades_back_to_idle_after_delay() {
        let mut c = clipped();
        c.clock_mut().advance(FRAME);
        c.tick(HeldDirections::default());
        c.drain_commands();

        c.toggle_dance();
        assert_eq!(
            c.drain_commands(),
            vec![MotionCommand::CrossFade {
                clip: ClipRole::Dance,
                fade: DANCE_FADE,
                repeat: true
            }]
        );
        run_for(&mut c, Duration::from_millis(100));
        assert_eq!(c.pose().yaw, 0.0, "no procedural spin with a dance clip");

        c.toggle_dance();
        assert_eq!(
            c.drain_commands(),
            vec![MotionCommand::FadeOutAll {
                fade: DANCE_FADE_OUT
            }]
        );

        run_for(&mut c, Duration::from_millis(400));
        assert!(c.drain_commands().is_empty(), "idle waits for the fade-out");

        run_for(&mut c, Duration::from_millis(150));
        assert_eq!(
            c.drain_commands(),
            vec![MotionCommand::CrossFade {
                clip: ClipRole::Idle,
                fade: IDLE_FADE,
                repeat: true
            }]
        );
    }

    #[test]
    fn reset_stops_dance_before_tweening() {
        let mut c = procedural();
        c.move_by(3.0, 0.0, -2.0);
        run_for(&mut c, Duration::from_millis(400));
        c.toggle_dance();
        run_for(&mut c, Duration::from_millis(300));

        c.reset();
        assert!(!c.is_dancing());
        assert!(c.is_resetting());
        assert_eq!(c.state(), MotionState::Resetting);
        assert_eq!(c.target(), Position::ORIGIN);
        assert_eq!(c.pose().tilt, 0.0);

        run_for(&mut c, Duration::from_millis(1520));
        assert!(!c.is_resetting());
        let pose = c.pose();
        assert!(pose.position.x.abs() < 1e-4);
        assert!(pose.position.z.abs() < 1e-4);
        assert!(pose.yaw.abs() < 1e-6);
    }

    #[test]
    fn reset_during_jump_leaves_arc_alone() {
        let mut c = procedural();
        c.jump();
        run_for(&mut c, Duration::from_millis(300));
        c.reset();
        assert!(c.is_jumping());
        run_for(&mut c, Duration::from_millis(1000));
        assert!(!c.is_jumping());
    }

    #[test]
    fn walk_clip_returns_to_idle_once_movement_stops() {
        let mut c = clipped();
        c.clock_mut().advance(FRAME);
        c.tick(HeldDirections::default());
        assert_eq!(
            c.drain_commands(),
            vec![MotionCommand::CrossFade {
                clip: ClipRole::Idle,
                fade: IDLE_FADE,
                repeat: true
            }]
        );

        c.move_by(0.15, 0.0, 0.0);
        assert_eq!(
            c.drain_commands(),
            vec![MotionCommand::CrossFade {
                clip: ClipRole::Walk,
                fade: WALK_FADE,
                repeat: true
            }]
        );

        // Quiet at 300ms, but idle waits for the 500ms deadline.
        run_for(&mut c, Duration::from_millis(400));
        assert!(!c.is_moving());
        assert!(c.drain_commands().is_empty());

        run_for(&mut c, Duration::from_millis(120));
        assert_eq!(
            c.drain_commands(),
            vec![MotionCommand::CrossFade {
                clip: ClipRole::Idle,
                fade: IDLE_FADE,
                repeat: true
            }]
        );

        run_for(&mut c, Duration::from_secs(1));
        assert!(c.drain_commands().is_empty(), "idle activates once");
    }

    #[test]
    fn walk_clip_skipped_while_dancing() {
        let mut c = clipped();
        c.toggle_dance();
        c.drain_commands();
        c.move_by(0.15, 0.0, 0.0);
        assert!(c.drain_commands().is_empty());
        assert!(c.is_moving());
    }

    #[test]
    fn walk_then_procedural_dance_returns_to_idle() {
        let idle_fade_in = MotionCommand::CrossFade {
            clip: ClipRole::Idle,
            fade: IDLE_FADE,
            repeat: true,
        };
        let mut c = controller(
            ModelProfile::with_clips([ClipRole::Idle, ClipRole::Walk], false),
            never(),
        );
        c.clock_mut().advance(FRAME);
        c.tick(HeldDirections::default());
        assert_eq!(c.drain_commands(), vec![idle_fade_in]);

        c.move_by(0.15, 0.0, 0.0);
        c.drain_commands();
        c.toggle_dance();

        // The walk-to-idle deadline passes while dancing.
        run_for(&mut c, Duration::from_secs(1));
        assert!(c.drain_commands().is_empty());
        assert!(c.pose().position.y.abs() > 0.01, "procedural bob");

        c.toggle_dance();
        assert!(c.drain_commands().is_empty());
        c.clock_mut().advance(FRAME);
        c.tick(HeldDirections::default());
        assert_eq!(c.drain_commands(), vec![idle_fade_in]);

        run_for(&mut c, Duration::from_millis(600));
        assert!(c.pose().position.y.abs() < 1e-5, "bob settles without breathing");
        assert!(c.drain_commands().is_empty());
    }

    #[test]
    fn idle_returns_after_jump_clip() {
        let mut c = clipped();
        c.clock_mut().advance(FRAME);
        c.tick(HeldDirections::default());
        c.drain_commands();

        c.jump();
        c.drain_commands();
        run_for(&mut c, Duration::from_millis(1300));
        assert!(!c.is_jumping());

        let idle_fades = c
            .drain_commands()
            .into_iter()
            .filter(|command| {
                *command
                    == MotionCommand::CrossFade {
                        clip: ClipRole::Idle,
                        fade: IDLE_FADE,
                        repeat: true,
                    }
            })
            .count();
        assert_eq!(idle_fades, 1);
    }

    #[test]
    fn idle_breathing_without_clips() {
        let mut c = procedural();
        c.clock_mut().set(Duration::from_secs(1));
        c.tick(HeldDirections::default());
        let expected = (1.0f32 * 1.2).sin() * 0.02;
        assert!((c.pose().position.y - expected).abs() < 1e-6);
    }

    #[test]
    fn idle_never_runs_while_busy() {
        let mut c = controller(ModelProfile::procedural(true), always());
        c.move_by(0.15, 0.0, 0.0);
        c.update_idle();
        assert!(c.drain_commands().is_empty());
        assert_eq!(c.pose().position.y, 0.0);

        run_for(&mut c, Duration::from_millis(100));
        assert!(c.is_moving());
        assert!(!c.drain_commands().contains(&MotionCommand::FlashEyes));
    }

    #[test]
    fn eye_flash_reverts_after_150ms() {
        let mut c = controller(ModelProfile::procedural(true), always());
        c.clock_mut().advance(FRAME);
        c.tick(HeldDirections::default());
        assert_eq!(c.drain_commands(), vec![MotionCommand::FlashEyes]);

        run_for(&mut c, Duration::from_millis(120));
        assert!(c.drain_commands().is_empty(), "no second flash while lit");

        run_for(&mut c, Duration::from_millis(40));
        let commands = c.drain_commands();
        assert_eq!(commands.first(), Some(&MotionCommand::RestoreEyes));
    }

    #[test]
    fn no_flash_without_part() {
        let mut c = controller(ModelProfile::procedural(false), always());
        run_for(&mut c, Duration::from_millis(200));
        assert!(c.drain_commands().is_empty());
    }

    #[test]
    fn held_directions_move_at_reduced_step() {
        let mut c = procedural();
        let mut held = HeldDirections::default();
        held.press(Direction::Forward);
        held.press(Direction::Right);
        c.clock_mut().advance(FRAME);
        c.tick(held);
        let target = c.target();
        assert!((target.z + 0.06).abs() < 1e-6);
        assert!((target.x - 0.06).abs() < 1e-6);
    }

    #[test]
    fn step_uses_full_press_delta() {
        let mut c = procedural();
        c.step(Direction::Back);
        assert!((c.target().z - 0.15).abs() < 1e-6);
        c.step(Direction::Left);
        assert!((c.target().x + 0.15).abs() < 1e-6);
    }
}
