//! The alignment lane.
//!
//! Every conversational turn gets a small posture value in the open interval
//! (-1, 1), derived from the length of the input, whether it is a question,
//! and how far into the conversation we are. The transform is linear up to
//! a clamp and a final `tanh`, so each value can be explained by hand.

/// Input length (in chars) at which the length ramp saturates.
pub const LENGTH_RAMP_CHARS: f64 = 400.0;

/// Amount subtracted when the trimmed input ends with `?`.
pub const QUESTION_PENALTY: f64 = 0.2;

/// Offset that recenters the ramp so short input sits on the negative side.
pub const CENTER_OFFSET: f64 = 0.3;

/// Number of turns over which the drift would reach 1.0 if uncapped.
pub const DRIFT_HORIZON_TURNS: f64 = 50.0;

/// Upper bound of the per-turn drift (reached at turn 15).
pub const DRIFT_CAP: f64 = 0.3;

/// Distance kept from ±1 before `tanh` is applied.
pub const BOUNDARY_EPSILON: f64 = 1e-6;

/// Computes the clamped pre-`tanh` alignment value.
///
/// Trimming uses the same whitespace rule as the console's sanitize step.
/// The order of operations is fixed: ramp, question penalty, centering,
/// drift, clamp.
pub fn pre_alignment(text: &str, turn_index: u64) -> f64 {
    let trimmed = text.trim();
    let length = trimmed.chars().count() as f64;

    let norm_len = (length / LENGTH_RAMP_CHARS).min(1.0);

    let mut raw = norm_len;
    if trimmed.ends_with('?') {
        raw -= QUESTION_PENALTY;
    }

    let centered = raw - CENTER_OFFSET;
    let drift = (turn_index as f64 / DRIFT_HORIZON_TURNS).min(DRIFT_CAP);
    let pre = centered + drift;

    let lo = -1.0 + BOUNDARY_EPSILON;
    let hi = 1.0 - BOUNDARY_EPSILON;
    lo.max(hi.min(pre))
}

/// Computes the alignment lane value for a turn.
///
/// Pure and total: always a finite value strictly inside (-1, 1).
pub fn compute(text: &str, turn_index: u64) -> f64 {
    pre_alignment(text, turn_index).tanh()
}

/// Renders an alignment value with an explicit sign and two decimals,
/// e.g. `+0.42` or `-0.07`. Non-finite values render as `+0.00`.
pub fn format_alignment(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:+.2}", value)
}

/// Like [`format_alignment`], with a missing value rendered as `+0.00`.
pub fn format_optional_alignment(value: Option<f64>) -> String {
    value.map_or_else(|| format_alignment(0.0), format_alignment)
}
