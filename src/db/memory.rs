//! In-memory implementation of the store traits.
//!
//! Every operation runs under a single mutex, so the check-then-insert in
//! `create` is atomic and the concurrency contract holds across threads.

use crate::db::store::{SessionStore, StoreError, StoreResult, WorkerRegistry};
use crate::models::session::{NewSession, Session};
use crate::models::worker::{NewWorker, Worker};
use chrono::{NaiveDateTime, SubsecRound};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    workers: Vec<Worker>,
    sessions: Vec<Session>,
    next_worker_id: i64,
    next_session_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn sessions_of(&self, worker_id: i64) -> StoreResult<Vec<Session>> {
        let state = self.lock()?;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.worker_id == worker_id)
            .cloned()
            .collect())
    }
}

fn sorted_by_start(mut sessions: Vec<Session>) -> Vec<Session> {
    sessions.sort_by_key(|s| (s.start_time, s.id));
    sessions
}

impl SessionStore for MemoryStore {
    fn find_open_session_in_range(
        &self,
        worker_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Option<Session>> {
        Ok(sorted_by_start(self.sessions_of(worker_id)?)
            .into_iter()
            .find(|s| s.is_open() && s.start_time >= start && s.start_time <= end))
    }

    fn find_open_session(&self, worker_id: i64) -> StoreResult<Option<Session>> {
        Ok(sorted_by_start(self.sessions_of(worker_id)?)
            .into_iter()
            .rev()
            .find(Session::is_open))
    }

    fn find_session_in_strict_range(
        &self,
        worker_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<Option<Session>> {
        Ok(sorted_by_start(self.sessions_of(worker_id)?)
            .into_iter()
            .find(|s| s.start_time > start && s.end_time.is_some_and(|e| e < end)))
    }

    fn list_by_worker(&self, worker_id: i64) -> StoreResult<Vec<Session>> {
        let mut out = sorted_by_start(self.sessions_of(worker_id)?);
        out.reverse();
        Ok(out)
    }

    fn find_sessions_matching_week_filter(
        &self,
        worker_id: i64,
        week_start: NaiveDateTime,
        week_end: NaiveDateTime,
    ) -> StoreResult<Vec<Session>> {
        // Same permissive OR as the SQLite store.
        Ok(sorted_by_start(self.sessions_of(worker_id)?)
            .into_iter()
            .filter(|s| s.start_time > week_start || s.start_time < week_end)
            .collect())
    }

    fn create(&self, session: NewSession) -> StoreResult<Session> {
        let mut state = self.lock()?;

        let day = session.start_time.date();
        if state
            .sessions
            .iter()
            .any(|s| s.worker_id == session.worker_id && s.is_open() && s.day() == day)
        {
            return Err(StoreError::Conflict(format!(
                "worker {} already has an open session on {}",
                session.worker_id, day
            )));
        }

        state.next_session_id += 1;
        let created = Session {
            id: state.next_session_id,
            worker_id: session.worker_id,
            start_time: session.start_time.trunc_subsecs(3),
            end_time: None,
        };
        state.sessions.push(created.clone());
        Ok(created)
    }

    fn update(&self, session: &Session) -> StoreResult<()> {
        let mut state = self.lock()?;

        let stored = state
            .sessions
            .iter_mut()
            .find(|s| s.id == session.id && s.is_open())
            .ok_or_else(|| StoreError::Stale(format!("session {} is no longer open", session.id)))?;

        match session.end_time {
            Some(end) => {
                stored.end_time = Some(end.trunc_subsecs(3));
                Ok(())
            }
            None => Err(StoreError::Stale(format!(
                "session {} has no end time to persist",
                session.id
            ))),
        }
    }
}

impl WorkerRegistry for MemoryStore {
    fn find_by_handle(&self, handle: &str) -> StoreResult<Option<Worker>> {
        let state = self.lock()?;
        Ok(state.workers.iter().find(|w| w.handle == handle).cloned())
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Worker>> {
        let state = self.lock()?;
        Ok(state.workers.iter().find(|w| w.id == id).cloned())
    }

    fn highest_id(&self) -> StoreResult<Option<i64>> {
        let state = self.lock()?;
        Ok(state.workers.iter().map(|w| w.id).max())
    }

    fn create(&self, worker: NewWorker) -> StoreResult<Worker> {
        let mut state = self.lock()?;

        if state.workers.iter().any(|w| w.handle == worker.handle) {
            return Err(StoreError::Conflict(format!(
                "handle {} already exists",
                worker.handle
            )));
        }

        state.next_worker_id += 1;
        let created = Worker {
            id: state.next_worker_id,
            display_name: worker.display_name,
            handle: worker.handle,
        };
        state.workers.push(created.clone());
        Ok(created)
    }

    fn list_all(&self) -> StoreResult<Vec<Worker>> {
        let state = self.lock()?;
        Ok(state.workers.clone())
    }

    fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut state = self.lock()?;
        let before = state.workers.len();
        state.workers.retain(|w| w.id != id);
        if state.workers.len() == before {
            return Ok(false);
        }
        state.sessions.retain(|s| s.worker_id != id);
        Ok(true)
    }
}
