use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, Transaction};

/// Latest schema version, tracked in `PRAGMA user_version`.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// v1: workers and sessions.
///
/// `open_day` is the calendar day of `start_time`; together with the partial
/// unique index it guarantees at most one open session per worker and day,
/// whatever the number of concurrent writers.
fn create_core_tables(tx: &Transaction<'_>) -> rusqlite::Result<()> {
    tx.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            display_name  TEXT NOT NULL,
            handle        TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   INTEGER NOT NULL REFERENCES workers(id) ON DELETE CASCADE,
            start_time  TEXT NOT NULL,
            end_time    TEXT,
            open_day    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_worker_start
            ON sessions(worker_id, start_time);

        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_open_per_day
            ON sessions(worker_id, open_day) WHERE end_time IS NULL;
        "#,
    )
}

fn apply_migration(tx: &Transaction<'_>, version: i32) -> rusqlite::Result<()> {
    match version {
        1 => create_core_tables(tx),
        _ => Ok(()),
    }
}

/// Public entry point: run all pending migrations.
///
/// Invoked every time a store is opened, so it must be idempotent.
pub fn run_pending_migrations(conn: &mut Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let mut version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "database version ({}) is newer than supported schema ({})",
            version, CURRENT_SCHEMA_VERSION
        )));
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;

    while version < CURRENT_SCHEMA_VERSION {
        let next = version + 1;
        apply_migration(&tx, next)
            .map_err(|e| AppError::Migration(format!("migration to version {next} failed: {e}")))?;

        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'Schema upgraded')",
            [format!("v{next}")],
        )?;

        log::info!("applied schema migration v{next}");
        version = next;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(())
}
