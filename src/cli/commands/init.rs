use crate::cli::commands::record;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::SqliteStore;
use crate::db::migrate::CURRENT_SCHEMA_VERSION;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing pontolog…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database    : {}", db_path.display());

    let store = SqliteStore::open(&db_path.to_string_lossy(), cfg.busy_timeout_ms)?;

    info(format!("Schema version: v{}", CURRENT_SCHEMA_VERSION));

    record(
        &store,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    );

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
