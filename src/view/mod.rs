pub mod render;

use crate::classifier::{
    band, classify, fill_percent, ResolvedSource, ScoreBand, SourceRegistry, Verdict,
};
use crate::model::{AnalysisResult, Explanation};
use crate::session::RequestState;

pub use render::render;

pub const EMPTY_PROMPT: &str =
    "Paste or type news content and press Enter to check its credibility.";
pub const LOADING_TEXT: &str = "Analyzing...";
pub const DISCLAIMER: &str = "This system assists news verification and does not replace \
professional fact-checking. Always verify important information with multiple trusted sources.";

/// Everything the screen needs, derived from the session state alone.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    Empty,
    Loading,
    Error(String),
    Result(ResultView),
}

impl ScreenView {
    pub fn from_state(state: &RequestState, registry: &SourceRegistry) -> Self {
        match state {
            RequestState::Idle => ScreenView::Empty,
            RequestState::Loading => ScreenView::Loading,
            RequestState::Failed(message) => ScreenView::Error(message.clone()),
            RequestState::Succeeded(result) => {
                ScreenView::Result(ResultView::build(result, registry))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub verdict: Verdict,
    pub icon: &'static str,
    pub text: String,
}

impl Badge {
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Self {
                verdict: Verdict::Unverified,
                icon: "❓",
                text: "Unknown".to_string(),
            };
        }

        let verdict = classify(Some(trimmed));
        let icon = match verdict {
            Verdict::Real => "🟢",
            Verdict::Fake => "🔴",
            Verdict::Unverified => "🟡",
        };
        Self {
            verdict,
            icon,
            text: trimmed.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreView {
    /// As reported by the service, never clamped.
    pub value: f64,
    pub band: ScoreBand,
    /// Progress fill, clamped to 0..=100.
    pub fill_percent: f64,
}

impl ScoreView {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            band: band(value),
            fill_percent: fill_percent(value),
        }
    }

    pub fn display_value(&self) -> String {
        format!("{}/100", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub badge: Badge,
    pub score: ScoreView,
    pub summary: Option<String>,
    pub explanations: Vec<Explanation>,
    pub sources: Vec<ResolvedSource>,
}

impl ResultView {
    pub fn build(result: &AnalysisResult, registry: &SourceRegistry) -> Self {
        Self {
            badge: Badge::from_label(&result.label),
            score: ScoreView::new(result.trust_score),
            summary: result.summary().map(str::to_string),
            explanations: result.explanations.clone(),
            sources: result
                .sources
                .iter()
                .map(|source| registry.resolve(source))
                .collect(),
        }
    }
}
