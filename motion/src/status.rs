use std::time::Duration;

/// How long a status message stays up after it is posted.
pub const STATUS_TTL: Duration = Duration::from_secs(3);
/// Fade-out time of the loading indicator once a model is ready.
pub const LOADING_FADE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub message: String,
    pub severity: Severity,
    pub posted_at: Duration,
}

/// Single-slot status sink; a new post replaces the previous message and
/// restarts the clear timer.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    entry: Option<StatusEntry>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, message: impl Into<String>, severity: Severity, now: Duration) {
        let message = message.into();
        log::debug!("status [{}] {}", severity.label(), message);
        self.entry = Some(StatusEntry {
            message,
            severity,
            posted_at: now,
        });
    }

    /// The message still on screen at `now`, if any.
    pub fn visible(&self, now: Duration) -> Option<&StatusEntry> {
        self.entry
            .as_ref()
            .filter(|entry| now.saturating_sub(entry.posted_at) < STATUS_TTL)
    }

    /// Last posted message regardless of expiry.
    pub fn last(&self) -> Option<&StatusEntry> {
        self.entry.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoadingPhase {
    #[default]
    Visible,
    Fading {
        since: Duration,
    },
    Hidden,
}

/// Loading overlay that fades out and is removed once a model is ready.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    phase: LoadingPhase,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin fading. Repeated calls keep the original fade start.
    pub fn finish(&mut self, now: Duration) {
        if self.phase == LoadingPhase::Visible {
            self.phase = LoadingPhase::Fading { since: now };
        }
    }

    pub fn opacity(&mut self, now: Duration) -> f32 {
        match self.phase {
            LoadingPhase::Visible => 1.0,
            LoadingPhase::Hidden => 0.0,
            LoadingPhase::Fading { since } => {
                let elapsed = now.saturating_sub(since);
                if elapsed >= LOADING_FADE {
                    self.phase = LoadingPhase::Hidden;
                    0.0
                } else {
                    1.0 - elapsed.as_secs_f32() / LOADING_FADE.as_secs_f32()
                }
            }
        }
    }

    pub fn is_removed(&self) -> bool {
        self.phase == LoadingPhase::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_clears_after_three_seconds() {
        let mut board = StatusBoard::new();
        board.post("Robot loaded", Severity::Success, Duration::from_secs(1));

        assert!(board.visible(Duration::from_millis(3900)).is_some());
        assert!(board.visible(Duration::from_secs(4)).is_none());
        assert_eq!(board.last().map(|e| e.severity), Some(Severity::Success));
    }

    #[test]
    fn new_post_restarts_timer() {
        let mut board = StatusBoard::new();
        board.post("first", Severity::Info, Duration::ZERO);
        board.post("second", Severity::Warning, Duration::from_secs(2));
        let entry = board.visible(Duration::from_secs(4)).expect("still visible");
        assert_eq!(entry.message, "second");
    }

    #[test]
    fn loading_indicator_fades_then_hides() {
        let mut indicator = LoadingIndicator::new();
        assert_eq!(indicator.opacity(Duration::from_secs(9)), 1.0);

        indicator.finish(Duration::from_secs(10));
        indicator.finish(Duration::from_secs(11));
        let half = indicator.opacity(Duration::from_millis(10_250));
        assert!((half - 0.5).abs() < 1e-4);
        assert!(!indicator.is_removed());

        assert_eq!(indicator.opacity(Duration::from_millis(10_500)), 0.0);
        assert!(indicator.is_removed());
    }
}
