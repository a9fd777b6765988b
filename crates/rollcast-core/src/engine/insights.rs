//! Narrative observations over the pattern metrics.

use rollcast_config::EngineConfig;
use rollcast_math::{complementary_pct, round_half_up, share_pct};

use super::metrics::{alternation_rate, PatternMetrics};
use super::observation::Observation;

fn whole_pct(part: usize, total: usize) -> f64 {
    round_half_up(share_pct(part, total))
}

/// Ordered insight messages. A log shorter than `insights.min_entries`
/// yields exactly one message asking for more data.
pub fn insights(log: &[Observation], config: &EngineConfig) -> Vec<String> {
    let params = &config.insights;
    if log.len() < params.min_entries {
        return vec![format!(
            "Insufficient data: record at least {} entries to unlock insights",
            params.min_entries
        )];
    }

    let metrics = PatternMetrics::compute(log, params.recent_window);
    let mut out = Vec::with_capacity(6);

    let trend = metrics.trend;
    let total = trend.total();
    if trend.rising > trend.falling {
        out.push(format!(
            "Upward trend dominates: {}% of entries rise ({} up vs {} down)",
            whole_pct(trend.rising, total),
            trend.rising,
            trend.falling
        ));
    } else if trend.falling > trend.rising {
        out.push(format!(
            "Downward trend dominates: {}% of entries fall ({} down vs {} up)",
            whole_pct(trend.falling, total),
            trend.falling,
            trend.rising
        ));
    } else {
        out.push(format!(
            "Trend is balanced: {}% up, {}% down",
            whole_pct(trend.rising, total),
            whole_pct(trend.falling, total)
        ));
    }

    let (top, count) = metrics.states.dominant();
    out.push(format!("Most frequent state: {} ({} times)", top, count));

    let classes = metrics.classes;
    let (small_pct, big_pct) = complementary_pct(classes.small as f64, classes.big as f64);
    out.push(format!(
        "K:B ratio = {}%:{}% ({}:{})",
        small_pct, big_pct, classes.small, classes.big
    ));

    let recent = metrics.recent;
    let margin = params.recent_dominance_margin;
    if recent.small_count > recent.big_count + margin {
        out.push(format!(
            "Last {} entries lean K ({}:{}); probability of B is rising",
            recent.entries, recent.small_count, recent.big_count
        ));
    } else if recent.big_count > recent.small_count + margin {
        out.push(format!(
            "Last {} entries lean B ({}:{}); probability of K is rising",
            recent.entries, recent.big_count, recent.small_count
        ));
    } else {
        out.push(format!(
            "Last {} entries are balanced or volatile (K:B = {}:{})",
            recent.entries, recent.small_count, recent.big_count
        ));
    }

    let volatility = metrics.dispersion.volatility_pct;
    if volatility > params.volatility_high_pct {
        out.push(format!(
            "High volatility ({:.1}%): values swing widely",
            volatility
        ));
    } else if volatility < params.volatility_low_pct {
        out.push(format!("Low volatility ({:.1}%): values are stable", volatility));
    } else {
        out.push(format!("Normal volatility ({:.1}%)", volatility));
    }

    let alternation = alternation_rate(log);
    if alternation > config.thresholds.alternation_high_pct {
        out.push(format!(
            "Frequent K/B alternation ({:.0}%); expect the pattern to stabilize",
            alternation
        ));
    } else if alternation < config.thresholds.alternation_low_pct {
        out.push(format!(
            "Outcomes cluster ({:.0}% alternation); momentum is likely",
            alternation
        ));
    }

    out
}
