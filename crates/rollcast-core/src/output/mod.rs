//! Output rendering for CLI payloads.
//!
//! Every command produces a serializable payload. Machine output wraps it in
//! an envelope carrying `schema_version`, `generated_at` and `command`;
//! human output renders Markdown; summary output is a single line.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use rollcast_common::SCHEMA_VERSION;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::{
    transition_probabilities, Forecast, Observation, OutcomeClass, PatternMetrics, StateBand,
    TransitionMatrix,
};
use crate::session::{HistoryRow, QuickStats};

/// Wrap `payload` with the standard envelope fields.
///
/// Object payloads are merged into the envelope; any other value is placed
/// under `data`.
pub fn envelope<T: Serialize + ?Sized>(
    command: &str,
    payload: &T,
    generated_at: DateTime<Utc>,
) -> serde_json::Result<Value> {
    let mut out = Map::new();
    out.insert("schema_version".into(), Value::from(SCHEMA_VERSION));
    out.insert("generated_at".into(), Value::from(generated_at.to_rfc3339()));
    out.insert("command".into(), Value::from(command));

    match serde_json::to_value(payload)? {
        Value::Object(fields) => {
            for (key, value) in fields {
                out.entry(key).or_insert(value);
            }
        }
        other => {
            out.insert("data".into(), other);
        }
    }
    Ok(Value::Object(out))
}

/// Pretty-printed envelope, ready for stdout.
pub fn to_json_string<T: Serialize + ?Sized>(command: &str, payload: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&envelope(command, payload, Utc::now())?)
}

fn class_heading(class: OutcomeClass) -> &'static str {
    match class {
        OutcomeClass::Small => "K (6-31)",
        OutcomeClass::Big => "B (32-54)",
    }
}

fn favored_label(class: Option<OutcomeClass>) -> &'static str {
    class.map_or("even", OutcomeClass::label)
}

// ============================================================================
// Markdown
// ============================================================================

pub fn render_observation_md(obs: &Observation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Observation {}", obs.id);
    let _ = writeln!(out);
    let _ = writeln!(out, "| Field | Value |");
    let _ = writeln!(out, "|-------|-------|");
    let _ = writeln!(out, "| First | {} ({}) |", obs.first_value, obs.first_state);
    let _ = writeln!(out, "| Second | {} ({}) |", obs.second_value, obs.second_state);
    let _ = writeln!(out, "| Class | {} |", obs.outcome_class);
    let _ = writeln!(out, "| Trend | {} {} ({:+}) |", obs.trend.arrow(), obs.trend, obs.delta);
    let _ = writeln!(out, "| Recorded | {} |", obs.created_at.to_rfc3339());
    out
}

/// Single forecast with its factor breakdown.
pub fn render_forecast_md(forecast: &Forecast) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Forecast (step {})", forecast.step);
    let _ = writeln!(out);
    let _ = writeln!(out, "| Class | Probability |");
    let _ = writeln!(out, "|-------|-------------|");
    for class in [OutcomeClass::Small, OutcomeClass::Big] {
        let _ = writeln!(out, "| {} | {}% |", class_heading(class), forecast.pct(class));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Confidence: {}%", forecast.confidence_pct);
    let _ = writeln!(out, "Favored: {}", favored_label(forecast.favored()));

    if forecast.is_degenerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Not enough data yet: the forecast is an even split with zero confidence."
        );
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Factors");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Factor | Weight | K | B | Rationale |");
    let _ = writeln!(out, "|--------|--------|---|---|-----------|");
    for factor in &forecast.factors {
        let _ = writeln!(
            out,
            "| {} | {:.0} | {:.1} | {:.1} | {} |",
            factor.kind, factor.weight, factor.small_score, factor.big_score, factor.rationale
        );
    }
    out
}

pub fn render_multi_step_md(forecasts: &[Forecast]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Forecast ({} steps)", forecasts.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "| Step | K | B | Confidence | Favored |");
    let _ = writeln!(out, "|------|---|---|------------|---------|");
    for f in forecasts {
        let _ = writeln!(
            out,
            "| {} | {}% | {}% | {}% | {} |",
            f.step,
            f.small_pct,
            f.big_pct,
            f.confidence_pct,
            favored_label(f.favored())
        );
    }
    out
}

/// Count table followed by row-normalized probabilities.
pub fn render_matrix_md(matrix: &TransitionMatrix) -> String {
    let mut out = String::new();
    let header = StateBand::ALL
        .iter()
        .map(|b| b.as_str())
        .collect::<Vec<_>>()
        .join(" | ");
    let rule = StateBand::ALL
        .iter()
        .map(|_| "---")
        .collect::<Vec<_>>()
        .join("|");

    let _ = writeln!(out, "# Transitions ({} observed)", matrix.total());
    let _ = writeln!(out);
    let _ = writeln!(out, "| From \\ To | {} | Total |", header);
    let _ = writeln!(out, "|---|{}|---|", rule);
    for from in StateBand::ALL {
        let cells = StateBand::ALL
            .iter()
            .map(|to| matrix.count(from, *to).to_string())
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "| {} | {} | {} |", from, cells, matrix.row_total(from));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Probabilities");
    let _ = writeln!(out);
    let _ = writeln!(out, "| From \\ To | {} |", header);
    let _ = writeln!(out, "|---|{}|", rule);
    for from in StateBand::ALL {
        let probs = transition_probabilities(matrix, from);
        let cells = StateBand::ALL
            .iter()
            .map(|to| format!("{:.1}%", probs.get(*to) * 100.0))
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "| {} | {} |", from, cells);
    }
    out
}

pub fn render_metrics_md(metrics: &PatternMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Pattern Metrics");
    let _ = writeln!(out);

    let _ = writeln!(out, "## Trend");
    let _ = writeln!(
        out,
        "rising {} / falling {} / flat {}",
        metrics.trend.rising, metrics.trend.falling, metrics.trend.flat
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## States");
    for band in StateBand::ALL {
        let _ = writeln!(out, "- {}: {}", band, metrics.states.get(band));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Classes");
    let _ = writeln!(out, "- K: {}", metrics.classes.small);
    let _ = writeln!(out, "- B: {}", metrics.classes.big);
    let _ = writeln!(out);

    let recent = &metrics.recent;
    let _ = writeln!(out, "## Recent window ({} entries)", recent.entries);
    let _ = writeln!(out, "- K: {}, B: {}", recent.small_count, recent.big_count);
    if let (Some(state), Some(class)) = (recent.last_state, recent.last_class) {
        let _ = writeln!(out, "- Last: {} ({})", state, class);
    }
    let _ = writeln!(out, "- Average second value: {:.1}", recent.average_second_value);
    let _ = writeln!(out);

    let d = &metrics.dispersion;
    let _ = writeln!(out, "## Dispersion");
    let _ = writeln!(out, "- Alternation: {:.1}%", metrics.alternation_pct);
    let _ = writeln!(out, "- Mean first / second: {:.1} / {:.1}", d.mean_first, d.mean_second);
    let _ = writeln!(out, "- Mean |delta|: {:.1}", d.mean_abs_delta);
    let _ = writeln!(out, "- Range: {:.0}..{:.0}, median {:.1}", d.min, d.max, d.median);
    let _ = writeln!(out, "- Std dev: {:.2}, volatility {:.1}%", d.std_dev, d.volatility_pct);
    out
}

pub fn render_insights_md(insights: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Insights");
    let _ = writeln!(out);
    for line in insights {
        let _ = writeln!(out, "- {}", line);
    }
    out
}

pub fn render_history_md(rows: &[HistoryRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# History ({} rows)", rows.len());
    let _ = writeln!(out);
    if rows.is_empty() {
        let _ = writeln!(out, "No observations recorded.");
        return out;
    }
    let _ = writeln!(out, "| # | Id | First | Second | States | Class | Trend | Recorded |");
    let _ = writeln!(out, "|---|----|-------|--------|--------|-------|-------|----------|");
    for row in rows {
        let o = &row.observation;
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} → {} | {} | {} {:+} | {} |",
            row.rank,
            o.id,
            o.first_value,
            o.second_value,
            o.first_state,
            o.second_state,
            o.outcome_class,
            o.trend.arrow(),
            o.delta,
            o.created_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    out
}

pub fn render_status_md(stats: &QuickStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Status");
    let _ = writeln!(out);
    let _ = writeln!(out, "Entries: {}", stats.total);
    match stats.small_share_pct {
        Some(pct) => {
            let _ = writeln!(out, "K share: {:.1}%", pct);
        }
        None => {
            let _ = writeln!(out, "K share: n/a");
        }
    }
    if let (Some(state), Some(trend)) = (stats.last_state, stats.last_trend) {
        let _ = writeln!(out, "Last: {} {} {}", state, trend.arrow(), trend);
    }
    let _ = writeln!(
        out,
        "Trends: rising {:.1}% / falling {:.1}% / flat {:.1}%",
        stats.rising_pct, stats.falling_pct, stats.flat_pct
    );
    out
}

// ============================================================================
// Summary (one line)
// ============================================================================

pub fn summary_forecast(forecast: &Forecast) -> String {
    format!(
        "step {}: K {}% / B {}% (confidence {}%)",
        forecast.step, forecast.small_pct, forecast.big_pct, forecast.confidence_pct
    )
}

pub fn summary_multi_step(forecasts: &[Forecast]) -> String {
    forecasts
        .iter()
        .map(|f| format!("{}:K{}/B{}@{}", f.step, f.small_pct, f.big_pct, f.confidence_pct))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn summary_matrix(matrix: &TransitionMatrix) -> String {
    let rows = StateBand::ALL
        .iter()
        .map(|b| format!("{}={}", b, matrix.row_total(*b)))
        .collect::<Vec<_>>()
        .join(" ");
    format!("transitions: {} ({})", matrix.total(), rows)
}

pub fn summary_metrics(metrics: &PatternMetrics) -> String {
    format!(
        "entries={} K={} B={} alternation={:.1}% volatility={:.1}%",
        metrics.classes.total(),
        metrics.classes.small,
        metrics.classes.big,
        metrics.alternation_pct,
        metrics.dispersion.volatility_pct
    )
}

pub fn summary_status(stats: &QuickStats) -> String {
    match (stats.small_share_pct, stats.last_state) {
        (Some(pct), Some(state)) => {
            format!("entries={} K={:.1}% last={}", stats.total, pct, state)
        }
        _ => format!("entries={}", stats.total),
    }
}

pub fn summary_observation(obs: &Observation) -> String {
    format!(
        "#{} {}→{} {} {}",
        obs.id, obs.first_value, obs.second_value, obs.second_state, obs.outcome_class
    )
}
