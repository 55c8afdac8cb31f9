use crate::utils::time::hours_between;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A single clock-in / clock-out record ("ponto").
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Session {
    pub id: i64,
    pub worker_id: i64,                    // ⇔ sessions.worker_id (FK, ON DELETE CASCADE)
    pub start_time: NaiveDateTime,         // ⇔ sessions.start_time (TEXT, ms precision)
    pub end_time: Option<NaiveDateTime>,   // ⇔ sessions.end_time (NULL while open)
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Calendar day the session belongs to.
    pub fn day(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Worked hours; open sessions count as zero.
    pub fn worked_hours(&self) -> f64 {
        match self.end_time {
            Some(end) => hours_between(self.start_time, end),
            None => 0.0,
        }
    }
}

/// Session data before the store assigns an id. Always open.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub worker_id: i64,
    pub start_time: NaiveDateTime,
}
