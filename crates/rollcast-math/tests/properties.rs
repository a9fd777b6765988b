//! Property-based tests for rollcast-math numerical functions.
//!
//! Uses proptest to verify statistical identities hold across many random inputs.

use proptest::prelude::*;
use rollcast_math::{complementary_pct, mean, median, population_std_dev, share, summarize};

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-9;

fn value_domain() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((6i64..=54).prop_map(|v| v as f64), 0..200)
}

// ============================================================================
// summary properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Mean, median and extrema always lie inside [min, max].
    #[test]
    fn summary_is_bounded(values in value_domain()) {
        let s = summarize(&values);
        if values.is_empty() {
            prop_assert_eq!(s.count, 0);
            prop_assert_eq!(s.mean, 0.0);
            prop_assert_eq!(s.median, 0.0);
        } else {
            prop_assert!(s.min <= s.mean + TOL && s.mean <= s.max + TOL);
            prop_assert!(s.min <= s.median && s.median <= s.max);
            prop_assert!(s.std_dev >= 0.0);
            prop_assert!(s.std_dev <= (s.max - s.min) + TOL);
        }
    }

    /// Summaries never produce NaN.
    #[test]
    fn summary_is_finite(values in value_domain()) {
        let s = summarize(&values);
        for x in [s.mean, s.median, s.min, s.max, s.std_dev, s.cv_pct] {
            prop_assert!(x.is_finite(), "non-finite field in {:?}", s);
        }
    }

    /// Order of samples does not matter.
    #[test]
    fn summary_is_order_invariant(values in value_domain()) {
        let mut reversed = values.clone();
        reversed.reverse();
        let a = summarize(&values);
        let b = summarize(&reversed);
        prop_assert!((a.mean - b.mean).abs() < TOL);
        prop_assert_eq!(a.median, b.median);
        prop_assert!((a.std_dev - b.std_dev).abs() < TOL);
    }

    /// Shifting every sample shifts mean and median but not the spread.
    #[test]
    fn std_dev_is_shift_invariant(values in value_domain(), shift in -100.0..100.0f64) {
        let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();
        let sd = population_std_dev(&values, mean(&values));
        let sd_shifted = population_std_dev(&shifted, mean(&shifted));
        prop_assert!((sd - sd_shifted).abs() < 1e-6);
        if !values.is_empty() {
            prop_assert!((median(&shifted) - (median(&values) + shift)).abs() < 1e-6);
        }
    }
}

// ============================================================================
// percentage properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Complementary percentages always sum to exactly 100.
    #[test]
    fn complementary_pct_sums_to_100(a in 0.0..1000.0f64, b in 0.0..1000.0f64) {
        let (pa, pb) = complementary_pct(a, b);
        prop_assert_eq!(pa as u32 + pb as u32, 100);
    }

    /// The larger input never receives the smaller percentage.
    #[test]
    fn complementary_pct_is_monotone(a in 0.0..1000.0f64, b in 0.0..1000.0f64) {
        let (pa, pb) = complementary_pct(a, b);
        if a > b {
            prop_assert!(pa >= pb);
        } else if b > a {
            prop_assert!(pb >= pa);
        }
    }

    /// Shares are fractions in [0, 1].
    #[test]
    fn share_is_fraction(total in 0usize..500, part_seed in 0usize..500) {
        let part = if total == 0 { 0 } else { part_seed % (total + 1) };
        let s = share(part, total);
        prop_assert!((0.0..=1.0).contains(&s));
    }
}
