//! Worked examples with known answers.

use chrono::{TimeZone, Utc};
use rollcast_config::EngineConfig;
use rollcast_core::engine::{
    alternation_rate, build_transition_matrix, evaluate, FactorKind, OutcomeClass, StateBand,
};
use rollcast_core::Session;

fn session_of(pairs: &[(i64, i64)]) -> Session {
    let mut session = Session::new(EngineConfig::default());
    for (i, (first, second)) in pairs.iter().enumerate() {
        let at = Utc
            .timestamp_millis_opt(1_700_000_000_000 + i as i64 * 1_000)
            .unwrap();
        session.append_at(*first, *second, at).unwrap();
    }
    session
}

#[test]
fn three_entry_log() {
    let session = session_of(&[(10, 20), (15, 45), (50, 8)]);

    let states: Vec<(StateBand, StateBand)> = session
        .snapshot()
        .iter()
        .map(|o| (o.first_state, o.second_state))
        .collect();
    assert_eq!(
        states,
        vec![
            (StateBand::Low, StateBand::Mid),
            (StateBand::Mid, StateBand::Extreme),
            (StateBand::Extreme, StateBand::Low),
        ]
    );

    let matrix = session.transition_matrix();
    for from in StateBand::ALL {
        for to in StateBand::ALL {
            let expected = matches!(
                (from, to),
                (StateBand::Low, StateBand::Mid)
                    | (StateBand::Mid, StateBand::Extreme)
                    | (StateBand::Extreme, StateBand::Low)
            ) as u32;
            assert_eq!(matrix.count(from, to), expected, "{from}->{to}");
        }
    }

    let probs = rollcast_core::engine::transition_probabilities(&matrix, StateBand::Low);
    assert_eq!(probs.get(StateBand::Mid), 1.0);
    assert_eq!(probs.get(StateBand::Low), 0.0);
    assert_eq!(probs.get(StateBand::High), 0.0);
    assert_eq!(probs.get(StateBand::Extreme), 0.0);

    let forecast = session.predict(1);
    assert_eq!((forecast.small_pct, forecast.big_pct), (59, 41));
    assert_eq!(forecast.confidence_pct, 10);
    assert_eq!(forecast.factors.len(), 6);
    assert_eq!(forecast.favored(), Some(OutcomeClass::Small));
}

#[test]
fn empty_log() {
    let session = Session::default();
    let metrics = session.metrics();
    let d = metrics.dispersion;
    for value in [
        d.mean_first,
        d.mean_second,
        d.mean_abs_delta,
        d.min,
        d.max,
        d.median,
        d.std_dev,
        d.volatility_pct,
    ] {
        assert_eq!(value, 0.0);
    }
    assert_eq!(metrics.alternation_pct, 0.0);
    assert_eq!(metrics.recent.entries, 0);
    assert_eq!(metrics.recent.last_state, None);

    let insights = session.insights();
    assert_eq!(insights.len(), 1);
    assert!(insights[0].starts_with("Insufficient data"));

    assert_eq!(build_transition_matrix(session.snapshot()).total(), 0);
}

#[test]
fn five_small_entries_trigger_balancing() {
    let session = session_of(&[(10, 20), (12, 25), (20, 8), (15, 30), (7, 19)]);
    assert!(session
        .snapshot()
        .iter()
        .all(|o| o.outcome_class == OutcomeClass::Small));
    assert_eq!(alternation_rate(session.snapshot()), 0.0);

    let recent = evaluate(FactorKind::RecentPattern, session.snapshot(), session.config());
    assert_eq!(recent.small_score, 0.0);
    assert_eq!(recent.big_score, 15.0);
    assert_eq!(recent.favored(), Some(OutcomeClass::Big));

    // Zero alternation reads as momentum toward the last class.
    let alternation = evaluate(FactorKind::Alternation, session.snapshot(), session.config());
    assert_eq!(alternation.small_score, 5.0);
    assert_eq!(alternation.big_score, 0.0);
}

#[test]
fn factors_abstain_below_their_minimum() {
    let session = session_of(&[(40, 50)]);
    for kind in [FactorKind::MarkovTransition, FactorKind::Alternation, FactorKind::RecentPattern] {
        let result = evaluate(kind, session.snapshot(), session.config());
        assert_eq!((result.small_score, result.big_score), (0.0, 0.0), "{kind}");
        assert!(result.rationale.starts_with("Insufficient data"));
    }
    let state = evaluate(FactorKind::CurrentState, session.snapshot(), session.config());
    assert_eq!((state.small_score, state.big_score), (0.0, 25.0));
}
