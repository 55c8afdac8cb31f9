pub mod config;
pub mod init;
pub mod log;
pub mod session;
pub mod week;
pub mod worker;

use crate::config::Config;
use crate::core::RegistryLogic;
use crate::db::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::worker::Worker;
use crate::ui::messages::warning;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use serde::Serialize;

/// Open the configured database. The store lives for the whole command and
/// is passed by reference to every component.
pub fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    let path = cfg.database_path();
    SqliteStore::open(&path.to_string_lossy(), cfg.busy_timeout_ms)
}

pub fn resolve_worker(store: &SqliteStore, handle: &str) -> AppResult<Worker> {
    RegistryLogic::by_handle(store, handle)
}

pub fn parse_optional_date(input: Option<&String>) -> AppResult<Option<NaiveDate>> {
    input
        .map(|s| parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone())))
        .transpose()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write to the internal log table. Never fails the command.
pub fn record(store: &SqliteStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = store.log(operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}
