//! Timestamp utilities: storage format, parsing `--at` values, durations.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, SubsecRound};

/// Storage format. Lexicographic order equals chronological order.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FMT).to_string()
}

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FMT).ok()
}

/// Current local time, truncated to milliseconds.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local().trunc_subsecs(3)
}

/// Parse a user supplied instant (`YYYY-MM-DDTHH:MM`, with optional seconds
/// and milliseconds; a space may replace the `T`).
pub fn parse_instant(s: &str) -> AppResult<NaiveDateTime> {
    const FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s.trim(), f).ok())
        .map(|ts| ts.trunc_subsecs(3))
        .ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

pub fn parse_optional_instant(input: Option<&String>) -> AppResult<Option<NaiveDateTime>> {
    input.map(|s| parse_instant(s)).transpose()
}

/// Hours between two instants, with sub-hour precision.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// Two decimals, e.g. `9.5` → `"9.50"`.
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}", hours)
}

/// `HH:MM:SS` or `--:--:--` for a missing value.
pub fn clock(ts: Option<&NaiveDateTime>) -> String {
    match ts {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_format_keeps_milliseconds() {
        let ts = parse_instant("2025-01-02T23:59:59.999").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-01-02T23:59:59.999");
        assert_eq!(parse_timestamp("2025-01-02T23:59:59.999"), Some(ts));
    }

    #[test]
    fn instant_accepts_minutes_only() {
        let ts = parse_instant("2025-01-02 09:30").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-01-02T09:30:00.000");
    }

    #[test]
    fn instant_rejects_garbage() {
        assert!(matches!(
            parse_instant("yesterday"),
            Err(AppError::InvalidTime(_))
        ));
    }

    #[test]
    fn hours_are_fractional() {
        let a = parse_instant("2025-01-02T18:00").unwrap();
        let b = parse_instant("2025-01-02T19:30").unwrap();
        assert_eq!(format_hours(hours_between(a, b)), "1.50");
        assert_eq!(clock(Some(&a)), "18:00:00");
        assert_eq!(clock(None), "--:--:--");
    }
}
