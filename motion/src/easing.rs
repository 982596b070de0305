/// Progress curves used by tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// `1 - (1 - p)^3`
    EaseOutCubic,
    /// Quadratic ease-in for the first half joined to a cubic ease-out for
    /// the second. Both halves meet at 0.5, so the jump arc stays continuous.
    JumpCurve,
}

impl Easing {
    pub fn apply(self, progress: f32) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear => p,
            Self::EaseOutCubic => 1.0 - (1.0 - p).powi(3),
            Self::JumpCurve => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
