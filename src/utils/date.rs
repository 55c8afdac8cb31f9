//! Day and week windows used to bucket sessions.
//!
//! All arithmetic is on naive local time: midnight is simply 00:00:00.000 of
//! the calendar date, without any timezone adjustment.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// A closed interval `[start, end]` with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Midnight of `date`.
pub fn local_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `[midnight(d), midnight(d) + 24h - 1ms]`
pub fn day_window(date: NaiveDate) -> Window {
    let start = local_midnight(date);
    Window {
        start,
        end: start + Duration::days(1) - Duration::milliseconds(1),
    }
}

/// Day window of the calendar day containing `instant`.
pub fn day_window_of(instant: NaiveDateTime) -> Window {
    day_window(instant.date())
}

/// Monday 00:00:00.000 → Sunday 23:59:59.999 of the week containing `now`.
pub fn week_window(now: NaiveDateTime) -> Window {
    // Sunday=0..Saturday=6; Sunday walks back six days to the previous Monday.
    let weekday = now.weekday().num_days_from_sunday() as i64;
    let back = (weekday + 6) % 7;
    let monday = now.date() - Duration::days(back);

    let start = local_midnight(monday);
    Window {
        start,
        end: start + Duration::days(7) - Duration::milliseconds(1),
    }
}

/// The seven dates of the week starting at `monday`.
pub fn week_days(monday: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
