//! Share and percentage helpers.

/// Fraction `part / total`, 0 when `total` is 0.
pub fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}

/// Percentage `part / total * 100`, 0 when `total` is 0.
pub fn share_pct(part: usize, total: usize) -> f64 {
    share(part, total) * 100.0
}

/// Round to the nearest integer with ties toward positive infinity.
///
/// Matches the conventional "half up" rule used for displayed percentages,
/// so 12.5 rounds to 13 and -12.5 rounds to -12.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Split `a : b` into integer percentages that always sum to exactly 100.
///
/// The first share is rounded half up and the second is the complement.
/// When both inputs are zero (or not finite) the split is 50/50.
pub fn complementary_pct(a: f64, b: f64) -> (u8, u8) {
    let total = a + b;
    if total <= 0.0 || !total.is_finite() || !a.is_finite() {
        return (50, 50);
    }
    let first = round_half_up(100.0 * a / total).clamp(0.0, 100.0) as u8;
    (first, 100 - first)
}

/// Round to a fixed number of decimals for display-stable output.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (x * factor).round() / factor
}
