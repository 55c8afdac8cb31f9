//! Unified application error type.
//! Core, stores, config and cli all return AppError so that every failure
//! reaches the caller as a typed, recoverable value.

use crate::db::store::StoreError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Input errors
    // ---------------------------
    #[error("Invalid name '{0}': a first and a last name are required")]
    InvalidName(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Lookup misses
    // ---------------------------
    #[error("Worker not found: {0}")]
    WorkerNotFound(String),

    #[error("No session found for {0}")]
    NotFound(String),

    #[error("No open session for worker {0}")]
    NoOpenSession(String),

    // ---------------------------
    // Invariant guards
    // ---------------------------
    #[error("A session is already open today for worker {0}")]
    AlreadyOpen(String),

    #[error("Handle '{0}' is already taken by another worker")]
    HandleCollision(String),

    // ---------------------------
    // Store errors
    // ---------------------------
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Write rejected by the store: {0}")]
    StoreRejected(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Output
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Only infrastructure failures are worth retrying; everything else is a
    /// definitive answer about the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::StoreUnavailable(_))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
            // Callers map these to AlreadyOpen / HandleCollision / NoOpenSession.
            // Unmapped ones are still definitive, never retryable.
            StoreError::Conflict(msg) | StoreError::Stale(msg) => AppError::StoreRejected(msg),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::from(StoreError::from(e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
