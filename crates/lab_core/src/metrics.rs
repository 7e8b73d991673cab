//! Derived round-count metrics.
//!
//! Unbounded results are `f64::INFINITY`: a target that takes no expected
//! damage can never be killed. Averages over round counts skip infinite
//! entries instead of capping them.

/// Rounds needed to bring `target_hp` to 0 at `expected_per_round`.
///
/// Target HP floors at 1. Non-positive damage (including healing) gives
/// infinity.
#[must_use]
pub fn time_to_kill(target_hp: f64, expected_per_round: f64) -> f64 {
    if expected_per_round.is_nan() || expected_per_round <= 0.0 {
        return f64::INFINITY;
    }
    target_hp.max(1.0) / expected_per_round
}

/// Rounds this unit survives while taking `incoming_per_round`.
///
/// Same formula as [`time_to_kill`], read from the defender's side.
#[must_use]
pub fn effective_hp(hp: f64, incoming_per_round: f64) -> f64 {
    time_to_kill(hp, incoming_per_round)
}

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Mean of the finite values only, `None` when none are finite.
pub fn finite_mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    mean(values.into_iter().filter(|v| v.is_finite()))
}

/// Round to two decimals for display.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a round count, `∞` when unbounded.
#[must_use]
pub fn format_rounds(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", round2(value))
    } else {
        "∞".to_string()
    }
}
