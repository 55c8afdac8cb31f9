#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pl() -> Command {
    cargo_bin_cmd!("pontolog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_pontolog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create the schema without touching the user's config file
pub fn init_db(db_path: &str) {
    pl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialized DB with one registered worker, `ana.souza01`.
pub fn init_db_with_worker(db_path: &str) -> &'static str {
    init_db(db_path);
    pl().args(["--db", db_path, "worker", "add", "Ana", "Souza"])
        .assert()
        .success();
    "ana.souza01"
}

/// Open and close one session through the CLI.
pub fn clock_session(db_path: &str, handle: &str, start: &str, end: &str) {
    pl().args(["--db", db_path, "open", handle, "--at", start])
        .assert()
        .success();
    pl().args(["--db", db_path, "close", handle, "--at", end])
        .assert()
        .success();
}
