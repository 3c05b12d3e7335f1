// ==========================================
// Bakery Cost Calculator - presentation rounding
// ==========================================
// Applied once, after all arithmetic.
// Costs are non-negative, so half-away-from-zero is half-up.
// ==========================================

/// Round a currency amount to 2 decimals.
pub fn round_currency(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to the nearest whole currency unit.
pub fn round_whole(value: f64) -> f64 {
    value.round()
}

/// Scales, rounds, then divides back. Inputs whose decimal form sits on a
/// tie but is stored just below it round down: 1.005 gives 1.0, not 1.01.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
