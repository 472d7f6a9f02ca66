//! Interaction record model.

use chrono::{DateTime, SecondsFormat, Utc};

/// One stored exchange: what the user typed, what the console replied,
/// and the alignment lane value of that turn.
///
/// Created once per non-empty conversational turn and never mutated
/// afterwards; records only leave the store through pruning or a clear.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    /// ISO 8601 UTC timestamp, second precision, trailing `Z`.
    pub timestamp: String,
    /// Sanitized user input.
    pub user_text: String,
    /// The generated reply.
    pub reply_text: String,
    /// Alignment lane value rounded to 4 decimals.
    pub alignment: f64,
}

impl InteractionRecord {
    /// Builds a record, rounding the alignment for storage.
    pub fn new(
        timestamp: impl Into<String>,
        user_text: impl Into<String>,
        reply_text: impl Into<String>,
        alignment: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            user_text: user_text.into(),
            reply_text: reply_text.into(),
            alignment: round_alignment(alignment),
        }
    }
}

/// Rounds to 4 decimal digits. Non-finite values are stored as 0.
pub fn round_alignment(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10_000.0).round() / 10_000.0
}

/// Formats a UTC instant as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The current UTC time as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn current_utc_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_rounds_alignment() {
        let record = InteractionRecord::new("t", "u", "r", -0.316_271_9);
        assert_eq!(record.alignment, -0.3163);
    }

    #[test]
    fn test_round_alignment_non_finite() {
        assert_eq!(round_alignment(f64::NAN), 0.0);
        assert_eq!(round_alignment(0.123_449), 0.1234);
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-09T07:05:01Z");
    }

    #[test]
    fn test_current_timestamp_shape() {
        let ts = current_utc_timestamp();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[10..11], "T");
    }
}
