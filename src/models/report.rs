use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One row of a weekly report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DaySummary {
    pub day: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub week_start: NaiveDateTime,
    pub week_end: NaiveDateTime,
    /// Always seven entries, Monday first.
    pub days: Vec<DaySummary>,
    /// Hours with two decimals, e.g. "9.50".
    pub total_hours: String,
}

/// Single-day view used by `day --summary`.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub summary: DaySummary,
    pub sessions: usize,
    pub total_hours: String,
}
