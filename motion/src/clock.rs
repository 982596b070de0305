use std::time::Duration;

/// Source of "now" for every deadline the controller schedules.
///
/// Times are offsets from an arbitrary origin (session start); only
/// differences between them matter.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Clock that only moves when told to.
///
/// The viewer sets it from the engine's frame time once per frame; tests
/// advance it explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute time. Going backwards is ignored so deadlines
    /// never fire twice.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(17));
        assert_eq!(clock.now(), Duration::from_millis(33));
    }

    #[test]
    fn set_never_rewinds() {
        let mut clock = ManualClock::new();
        clock.set(Duration::from_secs(2));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(2));
        clock.set(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }
}
