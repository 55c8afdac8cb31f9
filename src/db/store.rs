//! Repository interfaces consumed by the core.
//!
//! # Concurrency contract
//!
//! The lifecycle checks for an open session and then creates one in two
//! separate calls, without any lock of its own. Implementations of
//! [`SessionStore::create`] MUST therefore reject a second open session for the
//! same worker and calendar day at write time with [`StoreError::Conflict`]
//! (a uniqueness constraint or an equivalent check-and-insert under a lock).
//! Likewise [`SessionStore::update`] MUST only close a session that is still
//! open and report [`StoreError::Stale`] otherwise.
//!
//! Every call must complete or fail within a bounded time; timeouts surface as
//! [`StoreError::Unavailable`].

use crate::models::session::{NewSession, Session};
use crate::models::worker::{NewWorker, Worker};
use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness rule was violated by the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The row changed between read and write.
    #[error("stale write: {0}")]
    Stale(String),

    /// Infrastructure failure (busy, timeout, I/O, corrupt data).
    #[error("{0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(err, msg)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Conflict(msg.unwrap_or_else(|| err.to_string()))
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable mapping from workers to their sessions.
pub trait SessionStore: Send + Sync {
    /// Open session whose `start_time` lies in `[start, end]`.
    fn find_open_session_in_range(
        &self,
        worker_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Option<Session>>;

    /// Any open session of the worker, the most recent when several exist.
    fn find_open_session(&self, worker_id: i64) -> StoreResult<Option<Session>>;

    /// Earliest session with `start_time > start` and `end_time < end`.
    /// Open sessions never match.
    fn find_session_in_strict_range(
        &self,
        worker_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Option<Session>>;

    /// All sessions of the worker, newest `start_time` first.
    fn list_by_worker(&self, worker_id: i64) -> StoreResult<Vec<Session>>;

    /// Sessions with `start_time > week_start OR start_time < week_end`,
    /// oldest first.
    fn find_sessions_matching_week_filter(
        &self,
        worker_id: i64,
        week_start: NaiveDateTime,
        week_end: NaiveDateTime,
    ) -> StoreResult<Vec<Session>>;

    fn create(&self, session: NewSession) -> StoreResult<Session>;

    /// Persist `session.end_time` on a session that is still open.
    fn update(&self, session: &Session) -> StoreResult<()>;
}

/// Owner of workers and of handle uniqueness.
pub trait WorkerRegistry: Send + Sync {
    fn find_by_handle(&self, handle: &str) -> StoreResult<Option<Worker>>;

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Worker>>;

    fn highest_id(&self) -> StoreResult<Option<i64>>;

    /// Fails with [`StoreError::Conflict`] when the handle is taken.
    fn create(&self, worker: NewWorker) -> StoreResult<Worker>;

    fn list_all(&self) -> StoreResult<Vec<Worker>>;

    /// Remove the worker and every session they own.
    fn delete(&self, id: i64) -> StoreResult<bool>;
}
