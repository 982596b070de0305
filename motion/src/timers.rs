use std::time::Duration;

/// One-shot deadlines the controller can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Clears the moving flag after a quiet period without `move_by` calls.
    MovingQuiet,
    /// Cross-fades from walk back to idle if movement has stopped.
    WalkToIdle,
    /// Cross-fades back to idle after a clip-driven dance fades out.
    DanceToIdle,
    /// Restores the eyes after an idle blink flash.
    EyeFlashEnd,
}

/// Wall-clock deadlines keyed by purpose.
///
/// Scheduling a key that is already pending moves its deadline instead of
/// adding a second entry, which is what debounces the moving flag.
#[derive(Debug, Clone, Default)]
pub struct TimerSet {
    pending: Vec<(TimerKey, Duration)>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, key: TimerKey, deadline: Duration) {
        match self.pending.iter_mut().find(|(pending, _)| *pending == key) {
            Some(entry) => entry.1 = deadline,
            None => self.pending.push((key, deadline)),
        }
    }

    pub fn cancel(&mut self, key: TimerKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != key);
        self.pending.len() != before
    }

    fn deadline(&self, key: TimerKey) -> Option<Duration> {
        self.pending
            .iter()
            .find(|(pending, _)| *pending == key)
            .map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.deadline(key).is_some()
    }

    /// Remove and return every key whose deadline is at or before `now`,
    /// earliest first.
    pub fn due(&mut self, now: Duration) -> Vec<TimerKey> {
        let mut fired: Vec<(TimerKey, Duration)> = Vec::new();
        self.pending.retain(|&(key, deadline)| {
            if deadline <= now {
                fired.push((key, deadline));
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|&(_, deadline)| deadline);
        fired.into_iter().map(|(key, _)| key).collect()
    }
}
