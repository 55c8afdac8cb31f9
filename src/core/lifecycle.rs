//! Session lifecycle: open, close, look up by date, list.
//!
//! Per worker and day a session goes Closed → Open → Closed. The lifecycle
//! itself holds no lock between "is anything open?" and "create"; the store's
//! write-time uniqueness rule (see [`crate::db::store`]) settles races, and a
//! conflict it reports is turned into [`AppError::AlreadyOpen`].

use crate::db::store::{SessionStore, StoreError, WorkerRegistry};
use crate::errors::{AppError, AppResult};
use crate::models::session::{NewSession, Session};
use crate::models::worker::Worker;
use crate::utils::date::{day_window, day_window_of};
use chrono::{NaiveDate, NaiveDateTime, SubsecRound};

pub struct SessionLifecycle<'a, W: WorkerRegistry + ?Sized, S: SessionStore + ?Sized> {
    registry: &'a W,
    store: &'a S,
}

impl<'a, W: WorkerRegistry + ?Sized, S: SessionStore + ?Sized> SessionLifecycle<'a, W, S> {
    pub fn new(registry: &'a W, store: &'a S) -> Self {
        Self { registry, store }
    }

    fn worker(&self, worker_id: i64) -> AppResult<Worker> {
        self.registry
            .find_by_id(worker_id)?
            .ok_or_else(|| AppError::WorkerNotFound(worker_id.to_string()))
    }

    /// Clock in at `now`, truncated to milliseconds. Fails with `AlreadyOpen`
    /// when a session started today is still open.
    pub fn open(&self, worker_id: i64, now: NaiveDateTime) -> AppResult<Session> {
        let now = now.trunc_subsecs(3);
        let worker = self.worker(worker_id)?;
        let today = day_window_of(now);

        if self
            .store
            .find_open_session_in_range(worker.id, today.start, today.end)?
            .is_some()
        {
            return Err(AppError::AlreadyOpen(worker.handle));
        }

        let session = self
            .store
            .create(NewSession {
                worker_id: worker.id,
                start_time: now,
            })
            .map_err(|e| match e {
                StoreError::Conflict(_) => AppError::AlreadyOpen(worker.handle.clone()),
                other => AppError::from(other),
            })?;

        log::info!("opened session {} for {} at {}", session.id, worker.handle, now);
        Ok(session)
    }

    /// Clock out. The open session may have started on an earlier day.
    pub fn close(&self, worker_id: i64, now: NaiveDateTime) -> AppResult<Session> {
        let now = now.trunc_subsecs(3);
        let worker = self.worker(worker_id)?;

        let mut session = self
            .store
            .find_open_session(worker.id)?
            .ok_or_else(|| AppError::NoOpenSession(worker.handle.clone()))?;

        if now <= session.start_time {
            log::warn!(
                "closing session {} at {} which is not after its start {}",
                session.id,
                now,
                session.start_time
            );
        }

        session.end_time = Some(now);
        self.store.update(&session).map_err(|e| match e {
            StoreError::Stale(_) => AppError::NoOpenSession(worker.handle.clone()),
            other => AppError::from(other),
        })?;

        log::info!("closed session {} for {} at {}", session.id, worker.handle, now);
        Ok(session)
    }

    /// Closed session lying strictly inside the day window of `day`
    /// (today when `None`). Sessions starting exactly at midnight, still open,
    /// or ending after the last millisecond of the day are not found.
    pub fn find_on_date(
        &self,
        worker_id: i64,
        day: Option<NaiveDate>,
        now: NaiveDateTime,
    ) -> AppResult<Session> {
        let worker = self.worker(worker_id)?;
        let date = day.unwrap_or_else(|| now.date());
        let window = day_window(date);

        self.store
            .find_session_in_strict_range(worker.id, window.start, window.end)?
            .ok_or_else(|| AppError::NotFound(format!("{} on {}", worker.handle, date)))
    }

    /// Every session of the worker, newest first.
    pub fn list_all(&self, worker_id: i64) -> AppResult<Vec<Session>> {
        let worker = self.worker(worker_id)?;
        Ok(self.store.list_by_worker(worker.id)?)
    }
}
