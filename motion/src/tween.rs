use std::time::Duration;

use crate::easing::Easing;
use crate::pose::Pose;

/// Scalar of the pose a tween writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    Z,
    Yaw,
    Tilt,
}

impl Channel {
    pub fn read(self, pose: &Pose) -> f32 {
        match self {
            Self::X => pose.position.x,
            Self::Y => pose.position.y,
            Self::Z => pose.position.z,
            Self::Yaw => pose.yaw,
            Self::Tilt => pose.tilt,
        }
    }

    pub fn write(self, pose: &mut Pose, value: f32) {
        match self {
            Self::X => pose.position.x = value,
            Self::Y => pose.position.y = value,
            Self::Z => pose.position.z = value,
            Self::Yaw => pose.yaw = value,
            Self::Tilt => pose.tilt = value,
        }
    }
}

/// How eased progress turns into a channel value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenShape {
    /// `from + (to - from) * eased`
    Lerp,
    /// `from + sin(eased * PI) * height`: leaves and returns to `from`.
    Arc { height: f32 },
}

/// Signalled to the owner when a tween finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenEvent {
    JumpLanded,
    ResetSettled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub channel: Channel,
    pub start: Duration,
    pub duration: Duration,
    pub easing: Easing,
    pub from: f32,
    pub to: f32,
    pub shape: TweenShape,
    /// Locked tweens cannot be replaced or cancelled until they finish.
    pub locked: bool,
    pub on_complete: Option<TweenEvent>,
}

impl Tween {
    pub fn lerp(channel: Channel, from: f32, to: f32, start: Duration, duration: Duration) -> Self {
        Self {
            channel,
            start,
            duration,
            easing: Easing::Linear,
            from,
            to,
            shape: TweenShape::Lerp,
            locked: false,
            on_complete: None,
        }
    }

    pub fn arc(
        channel: Channel,
        base: f32,
        height: f32,
        start: Duration,
        duration: Duration,
    ) -> Self {
        Self {
            channel,
            start,
            duration,
            easing: Easing::Linear,
            from: base,
            to: base,
            shape: TweenShape::Arc { height },
            locked: false,
            on_complete: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn on_complete(mut self, event: TweenEvent) -> Self {
        self.on_complete = Some(event);
        self
    }

    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn value_at(&self, now: Duration) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            // Land exactly on the end value instead of a rounding residue.
            return self.to;
        }
        let eased = self.easing.apply(progress);
        match self.shape {
            TweenShape::Lerp => self.from + (self.to - self.from) * eased,
            TweenShape::Arc { height } => {
                self.from + (eased * std::f32::consts::PI).sin() * height
            }
        }
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Active tweens, at most one per channel.
#[derive(Debug, Clone, Default)]
pub struct TweenSet {
    active: Vec<Tween>,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween`, replacing whatever runs on its channel. Returns false
    /// (and drops `tween`) when the channel is held by a locked tween.
    pub fn start(&mut self, tween: Tween) -> bool {
        if let Some(index) = self.index_of(tween.channel) {
            if self.active[index].locked {
                return false;
            }
            self.active[index] = tween;
        } else {
            self.active.push(tween);
        }
        true
    }

    /// Drop the unlocked tween on `channel`, if any.
    pub fn cancel(&mut self, channel: Channel) -> bool {
        match self.index_of(channel) {
            Some(index) if !self.active[index].locked => {
                self.active.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, channel: Channel) -> bool {
        self.index_of(channel).is_some()
    }

    pub fn is_locked(&self, channel: Channel) -> bool {
        self.index_of(channel)
            .is_some_and(|index| self.active[index].locked)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Write every tween's value for `now` into `pose`, prune the finished
    /// ones and return their completion events in start order.
    pub fn advance(&mut self, now: Duration, pose: &mut Pose) -> Vec<TweenEvent> {
        let mut events = Vec::new();
        self.active.retain(|tween| {
            tween.channel.write(pose, tween.value_at(now));
            if tween.is_finished(now) {
                events.extend(tween.on_complete);
                false
            } else {
                true
            }
        });
        events
    }

    fn index_of(&self, channel: Channel) -> Option<usize> {
        self.active.iter().position(|tween| tween.channel == channel)
    }
}
