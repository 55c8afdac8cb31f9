//! Daily and weekly reports. Read-only over the store.

use crate::db::store::{SessionStore, WorkerRegistry};
use crate::errors::{AppError, AppResult};
use crate::models::report::{DailyReport, DaySummary, WeeklyReport};
use crate::models::session::Session;
use crate::models::worker::Worker;
use crate::utils::date::{day_window, week_days, week_window, weekday_name};
use crate::utils::time::format_hours;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub struct ReportAggregator<'a, W: WorkerRegistry + ?Sized, S: SessionStore + ?Sized> {
    registry: &'a W,
    store: &'a S,
}

/// First session (in the given order) that starts on `date`.
fn summarize_day(date: NaiveDate, sessions: &[Session]) -> DaySummary {
    let first = sessions.iter().find(|s| s.start_time.date() == date);

    DaySummary {
        day: weekday_name(date.weekday()).to_string(),
        date,
        start_time: first.map(|s| s.start_time),
        end_time: first.and_then(|s| s.end_time),
    }
}

/// Sum of closed session durations; open sessions add nothing.
fn total_hours<'s>(sessions: impl IntoIterator<Item = &'s Session>) -> f64 {
    sessions.into_iter().map(Session::worked_hours).sum()
}

impl<'a, W: WorkerRegistry + ?Sized, S: SessionStore + ?Sized> ReportAggregator<'a, W, S> {
    pub fn new(registry: &'a W, store: &'a S) -> Self {
        Self { registry, store }
    }

    fn worker(&self, worker_id: i64) -> AppResult<Worker> {
        self.registry
            .find_by_id(worker_id)?
            .ok_or_else(|| AppError::WorkerNotFound(worker_id.to_string()))
    }

    /// Report for the Monday–Sunday week containing `now`.
    pub fn weekly_report(&self, worker_id: i64, now: NaiveDateTime) -> AppResult<WeeklyReport> {
        let worker = self.worker(worker_id)?;
        let week = week_window(now);

        // NOTE: the store filter is `start > week_start OR start < week_end`,
        // which lets sessions from other weeks through. The per-day rows are
        // unaffected (they match on date) but `total_hours` counts every
        // closed session of the worker. This is almost certainly meant to be
        // an AND; it is kept until the intended behaviour is confirmed.
        let sessions = self
            .store
            .find_sessions_matching_week_filter(worker.id, week.start, week.end)?;

        let days = week_days(week.start.date())
            .into_iter()
            .map(|d| summarize_day(d, &sessions))
            .collect();

        let total = total_hours(&sessions);
        log::debug!(
            "weekly report for {}: {} sessions, {:.3}h",
            worker.handle,
            sessions.len(),
            total
        );

        Ok(WeeklyReport {
            week_start: week.start,
            week_end: week.end,
            days,
            total_hours: format_hours(total),
        })
    }

    /// Summary of one date (today when `None`): first session of the day and
    /// hours worked across all sessions started that day.
    pub fn daily_summary(
        &self,
        worker_id: i64,
        day: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> AppResult<DailyReport> {
        let worker = self.worker(worker_id)?;
        let date = day.unwrap_or_else(|| now.date());
        let window = day_window(date);

        let mut sessions = self.store.list_by_worker(worker.id)?;
        sessions.retain(|s| s.start_time >= window.start && s.start_time <= window.end);
        sessions.reverse();

        Ok(DailyReport {
            summary: summarize_day(date, &sessions),
            sessions: sessions.len(),
            total_hours: format_hours(total_hours(&sessions)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lifecycle::SessionLifecycle;
    use crate::core::registry::RegistryLogic;
    use crate::db::memory::MemoryStore;
    use crate::utils::time::parse_instant;

    fn at(s: &str) -> NaiveDateTime {
        parse_instant(s).unwrap()
    }

    fn setup() -> (MemoryStore, Worker) {
        let store = MemoryStore::new();
        let w = RegistryLogic::register(&store, "Ana Souza").unwrap();
        (store, w)
    }

    fn work(store: &MemoryStore, w: &Worker, from: &str, to: Option<&str>) {
        let lc = SessionLifecycle::new(store, store);
        lc.open(w.id, at(from)).unwrap();
        if let Some(to) = to {
            lc.close(w.id, at(to)).unwrap();
        }
    }

    #[test]
    fn two_sessions_same_day_sum_to_nine_and_a_half() {
        let (store, w) = setup();
        work(&store, &w, "2025-06-04T09:00", Some("2025-06-04T17:00"));
        work(&store, &w, "2025-06-04T18:00", Some("2025-06-04T19:30"));

        let report = ReportAggregator::new(&store, &store)
            .weekly_report(w.id, at("2025-06-05T12:00"))
            .unwrap();

        assert_eq!(report.total_hours, "9.50");

        // Wednesday shows the first session of the day.
        let wed = &report.days[2];
        assert_eq!(wed.day, "Wednesday");
        assert_eq!(wed.start_time, Some(at("2025-06-04T09:00")));
        assert_eq!(wed.end_time, Some(at("2025-06-04T17:00")));
    }

    #[test]
    fn seven_days_monday_first_with_gaps() {
        let (store, w) = setup();
        work(&store, &w, "2025-06-02T08:30", Some("2025-06-02T12:45"));
        work(&store, &w, "2025-06-08T10:00", Some("2025-06-08T11:00"));

        let report = ReportAggregator::new(&store, &store)
            .weekly_report(w.id, at("2025-06-08T20:00"))
            .unwrap();

        assert_eq!(report.days.len(), 7);
        assert_eq!(report.week_start, at("2025-06-02T00:00"));
        assert_eq!(report.week_end, at("2025-06-08T23:59:59.999"));
        assert_eq!(report.days[0].day, "Monday");
        assert_eq!(report.days[0].start_time, Some(at("2025-06-02T08:30")));
        assert_eq!(report.days[6].day, "Sunday");
        assert_eq!(report.days[6].end_time, Some(at("2025-06-08T11:00")));
        assert!(report.days[1..6].iter().all(|d| d.start_time.is_none()));
        assert_eq!(report.total_hours, "5.25");
    }

    #[test]
    fn open_sessions_count_zero_but_still_show_up() {
        let (store, w) = setup();
        work(&store, &w, "2025-06-03T09:00", None);

        let report = ReportAggregator::new(&store, &store)
            .weekly_report(w.id, at("2025-06-03T10:00"))
            .unwrap();

        assert_eq!(report.total_hours, "0.00");
        assert_eq!(report.days[1].start_time, Some(at("2025-06-03T09:00")));
        assert_eq!(report.days[1].end_time, None);
    }

    /// Known defect kept for compatibility: the OR filter admits sessions
    /// from other weeks into the total.
    #[test]
    fn permissive_week_filter_counts_other_weeks() {
        let (store, w) = setup();
        work(&store, &w, "2025-05-20T09:00", Some("2025-05-20T10:00"));
        work(&store, &w, "2025-06-03T09:00", Some("2025-06-03T11:00"));

        let report = ReportAggregator::new(&store, &store)
            .weekly_report(w.id, at("2025-06-04T09:00"))
            .unwrap();

        assert_eq!(report.total_hours, "3.00");
        // Only the in-week session appears in the daily rows.
        assert_eq!(
            report.days.iter().filter(|d| d.start_time.is_some()).count(),
            1
        );
    }

    #[test]
    fn empty_week() {
        let (store, w) = setup();
        let report = ReportAggregator::new(&store, &store)
            .weekly_report(w.id, at("2025-06-04T09:00"))
            .unwrap();
        assert_eq!(report.total_hours, "0.00");
        assert!(report.days.iter().all(|d| d.start_time.is_none()));
    }

    #[test]
    fn unknown_worker() {
        let store = MemoryStore::new();
        let agg = ReportAggregator::new(&store, &store);
        assert!(matches!(
            agg.weekly_report(3, at("2025-06-04T09:00")),
            Err(AppError::WorkerNotFound(_))
        ));
        assert!(matches!(
            agg.daily_summary(3, None, at("2025-06-04T09:00")),
            Err(AppError::WorkerNotFound(_))
        ));
    }

    #[test]
    fn daily_summary_sums_the_day_only() {
        let (store, w) = setup();
        work(&store, &w, "2025-06-03T09:00", Some("2025-06-03T17:00"));
        work(&store, &w, "2025-06-04T09:00", Some("2025-06-04T12:00"));
        work(&store, &w, "2025-06-04T13:00", Some("2025-06-04T14:15"));

        let daily = ReportAggregator::new(&store, &store)
            .daily_summary(w.id, NaiveDate::from_ymd_opt(2025, 6, 4), at("2025-06-09T08:00"))
            .unwrap();

        assert_eq!(daily.sessions, 2);
        assert_eq!(daily.total_hours, "4.25");
        assert_eq!(daily.summary.day, "Wednesday");
        assert_eq!(daily.summary.start_time, Some(at("2025-06-04T09:00")));
    }
}
