pub const HIGH_THRESHOLD: f64 = 70.0;
pub const MEDIUM_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

/// Step function over the raw score. Out-of-range values are not clamped:
/// negatives and NaN band `Low`, anything above 100 bands `High`.
pub fn band(score: f64) -> ScoreBand {
    if score >= HIGH_THRESHOLD {
        ScoreBand::High
    } else if score >= MEDIUM_THRESHOLD {
        ScoreBand::Medium
    } else {
        ScoreBand::Low
    }
}

/// Width of the rendered progress fill, in percent.
pub fn fill_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}
