use crate::classifier::ScoreBand;

use super::{ResultView, ScreenView, DISCLAIMER, EMPTY_PROMPT, LOADING_TEXT};

const BAR_CELLS: usize = 20;
const EMPTY_CELL: char = '░';

/// Plain-text rendering of a screen for the terminal front end.
pub fn render(view: &ScreenView) -> String {
    let mut lines = Vec::new();

    match view {
        ScreenView::Empty => lines.push(format!("📋 {EMPTY_PROMPT}")),
        ScreenView::Loading => lines.push(format!("⏳ {LOADING_TEXT}")),
        ScreenView::Error(message) => lines.push(format!("❌ {message}")),
        ScreenView::Result(result) => render_result(result, &mut lines),
    }

    if !matches!(view, ScreenView::Loading) {
        lines.push(String::new());
        lines.push(format!("⚠️  {DISCLAIMER}"));
    }

    lines.join("\n")
}

fn render_result(result: &ResultView, lines: &mut Vec<String>) {
    lines.push(format!("{} {}", result.badge.icon, result.badge.text));
    lines.push(format!("Trust Score {}", result.score.display_value()));
    lines.push(score_bar(result.score.fill_percent, result.score.band));

    if let Some(summary) = &result.summary {
        lines.push(String::new());
        lines.push(summary.clone());
    }

    if !result.explanations.is_empty() {
        lines.push(String::new());
        lines.push(format!("⚠️  Flagged Content ({})", result.explanations.len()));
        for item in &result.explanations {
            lines.push(format!("  \"{}\"", item.sentence));
            lines.push(format!("    💡 {}", item.reason));
        }
    }

    if !result.sources.is_empty() {
        lines.push(String::new());
        lines.push("🔗 Verify With Trusted Sources".to_string());
        for source in &result.sources {
            let target = match &source.url {
                Some(url) => url.as_str(),
                None => "(no link)",
            };
            lines.push(format!(
                "  {} {}  {}",
                source.category.icon(),
                source.name,
                target
            ));
        }
    }
}

fn score_bar(fill_percent: f64, band: ScoreBand) -> String {
    let cell = match band {
        ScoreBand::High => '🟩',
        ScoreBand::Medium => '🟨',
        ScoreBand::Low => '🟥',
    };
    let filled = ((fill_percent / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);

    let mut bar = String::with_capacity(BAR_CELLS * 4 + 2);
    bar.push('[');
    bar.extend(std::iter::repeat(cell).take(filled));
    bar.extend(std::iter::repeat(EMPTY_CELL).take(BAR_CELLS - filled));
    bar.push(']');
    bar
}
