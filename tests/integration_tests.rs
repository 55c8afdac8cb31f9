use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{clock_session, init_db, init_db_with_worker, pl, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates");

    pl().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_worker_add_allocates_sequential_handles() {
    let db_path = setup_test_db("worker_add_seq");
    init_db(&db_path);

    pl().args(["--db", &db_path, "worker", "add", "Ana", "Souza"])
        .assert()
        .success()
        .stdout(contains("ana.souza01"));

    pl().args(["--db", &db_path, "worker", "add", "João", "da", "Silva"])
        .assert()
        .success()
        .stdout(contains("joão.silva02"));

    pl().args(["--db", &db_path, "worker", "list"])
        .assert()
        .success()
        .stdout(contains("ana.souza01").and(contains("joão.silva02")))
        .stdout(contains("João da Silva"));
}

#[test]
fn test_worker_add_rejects_single_name() {
    let db_path = setup_test_db("worker_add_single");
    init_db(&db_path);

    pl().args(["--db", &db_path, "worker", "add", "Ana"])
        .assert()
        .failure()
        .stderr(contains("Invalid name"));
}

#[test]
fn test_worker_show_by_id_and_handle() {
    let db_path = setup_test_db("worker_show");
    let handle = init_db_with_worker(&db_path);

    pl().args(["--db", &db_path, "--json", "worker", "show", "--id", "1"])
        .assert()
        .success()
        .stdout(contains("\"handle\": \"ana.souza01\""));

    pl().args(["--db", &db_path, "worker", "show", handle])
        .assert()
        .success()
        .stdout(contains("Ana Souza"));

    pl().args(["--db", &db_path, "worker", "show", "nobody.here01"])
        .assert()
        .failure()
        .stderr(contains("Worker not found"));
}

#[test]
fn test_open_twice_same_day_is_rejected() {
    let db_path = setup_test_db("open_twice");
    let handle = init_db_with_worker(&db_path);

    pl().args(["--db", &db_path, "open", handle, "--at", "2025-06-02T09:00"])
        .assert()
        .success()
        .stdout(contains("clocked in at 09:00:00"));

    pl().args(["--db", &db_path, "open", handle, "--at", "2025-06-02T13:00"])
        .assert()
        .failure()
        .stderr(contains("already open today").and(contains(handle)));

    // A new day is a new window.
    pl().args(["--db", &db_path, "open", handle, "--at", "2025-06-03T09:00"])
        .assert()
        .success();
}

#[test]
fn test_close_without_open_session_fails() {
    let db_path = setup_test_db("close_without_open");
    let handle = init_db_with_worker(&db_path);

    pl().args(["--db", &db_path, "close", handle, "--at", "2025-06-02T17:00"])
        .assert()
        .failure()
        .stderr(contains("No open session"));
}

#[test]
fn test_open_close_then_day_lookup() {
    let db_path = setup_test_db("open_close_day");
    let handle = init_db_with_worker(&db_path);

    pl().args(["--db", &db_path, "open", handle, "--at", "2025-06-02T09:00"])
        .assert()
        .success();

    pl().args(["--db", &db_path, "close", handle, "--at", "2025-06-02T17:30"])
        .assert()
        .success()
        .stdout(contains("17:30:00").and(contains("8.50h")));

    pl().args(["--db", &db_path, "day", handle, "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("09:00:00").and(contains("17:30:00")));

    pl().args(["--db", &db_path, "day", handle, "--date", "2025-06-03"])
        .assert()
        .failure()
        .stderr(contains("No session found"));
}

#[test]
fn test_day_summary_reports_total() {
    let db_path = setup_test_db("day_summary");
    let handle = init_db_with_worker(&db_path);
    clock_session(&db_path, handle, "2025-06-02T09:00", "2025-06-02T12:00");

    pl().args(["--db", &db_path, "day", handle, "--date", "2025-06-02", "--summary"])
        .assert()
        .success()
        .stdout(contains("Monday").and(contains("3.00h")));
}

#[test]
fn test_day_rejects_bad_date() {
    let db_path = setup_test_db("day_bad_date");
    let handle = init_db_with_worker(&db_path);

    pl().args(["--db", &db_path, "day", handle, "--date", "2025-13-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_open_rejects_bad_instant() {
    let db_path = setup_test_db("open_bad_instant");
    let handle = init_db_with_worker(&db_path);

    pl().args(["--db", &db_path, "open", handle, "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));
}

#[test]
fn test_sessions_empty_and_listed() {
    let db_path = setup_test_db("sessions_listed");
    let handle = init_db_with_worker(&db_path);

    pl().args(["--db", &db_path, "sessions", handle])
        .assert()
        .success()
        .stdout(contains("No sessions for ana.souza01."));

    clock_session(&db_path, handle, "2025-06-02T09:00", "2025-06-02T17:30");
    clock_session(&db_path, handle, "2025-06-03T08:00", "2025-06-03T09:00");

    pl().args(["--db", &db_path, "sessions", handle])
        .assert()
        .success()
        .stdout(contains("2025-06-02").and(contains("2025-06-03")))
        .stdout(contains("8.50").and(contains("1.00")));
}

#[test]
fn test_week_report_totals_closed_sessions() {
    let db_path = setup_test_db("week_total");
    let handle = init_db_with_worker(&db_path);

    clock_session(&db_path, handle, "2025-06-02T09:00", "2025-06-02T17:30");
    clock_session(&db_path, handle, "2025-06-03T09:00", "2025-06-03T10:00");

    // Still open: shows on Wednesday, adds nothing to the total.
    pl().args(["--db", &db_path, "open", handle, "--at", "2025-06-04T09:00"])
        .assert()
        .success();

    pl().args(["--db", &db_path, "week", handle, "--date", "2025-06-05"])
        .assert()
        .success()
        .stdout(contains("Monday").and(contains("Sunday")))
        .stdout(contains("Total hours: 9.50"));
}

#[test]
fn test_week_report_json() {
    let db_path = setup_test_db("week_json");
    let handle = init_db_with_worker(&db_path);
    clock_session(&db_path, handle, "2025-06-02T09:00", "2025-06-02T17:30");

    pl().args(["--db", &db_path, "--json", "week", handle, "--date", "2025-06-02"])
        .assert()
        .success()
        .stdout(contains("\"total_hours\": \"8.50\""))
        .stdout(contains("\"week_start\": \"2025-06-02T00:00:00\""))
        .stdout(contains("\"day\": \"Sunday\""));
}

#[test]
fn test_worker_del_removes_sessions() {
    let db_path = setup_test_db("worker_del");
    let handle = init_db_with_worker(&db_path);
    clock_session(&db_path, handle, "2025-06-02T09:00", "2025-06-02T17:30");

    pl().args(["--db", &db_path, "worker", "del", handle])
        .assert()
        .success()
        .stdout(contains("Deleted ana.souza01"));

    pl().args(["--db", &db_path, "sessions", handle])
        .assert()
        .failure()
        .stderr(contains("Worker not found"));

    pl().args(["--db", &db_path, "--json", "worker", "list"])
        .assert()
        .success()
        .stdout(contains("[]"));
}

#[test]
fn test_log_print_records_operations() {
    let db_path = setup_test_db("log_print");
    let handle = init_db_with_worker(&db_path);
    clock_session(&db_path, handle, "2025-06-02T09:00", "2025-06-02T17:30");

    pl().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("register").and(contains("ana.souza01")))
        .stdout(contains("open").and(contains("close")));
}
