//! `open`, `close`, `day` and `sessions`.

use crate::cli::commands::{open_store, parse_optional_date, print_json, record, resolve_worker};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::{ReportAggregator, SessionLifecycle};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::ui::render::{daily_text, session_line, sessions_table};
use crate::utils::time::{clock, now, parse_optional_instant};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;
    let lifecycle = SessionLifecycle::new(&store, &store);

    match &cli.command {
        Commands::Open { handle, at } => {
            let worker = resolve_worker(&store, handle)?;
            let instant = parse_optional_instant(at.as_ref())?.unwrap_or_else(now);

            let session = lifecycle.open(worker.id, instant)?;
            record(
                &store,
                "open",
                &worker.handle,
                &format!("Session {} opened at {}", session.id, session.start_time),
            );

            if cli.json {
                print_json(&session)?;
            } else {
                success(format!(
                    "{} clocked in at {} on {}.",
                    worker.handle,
                    clock(Some(&session.start_time)),
                    session.day()
                ));
            }
        }

        Commands::Close { handle, at } => {
            let worker = resolve_worker(&store, handle)?;
            let instant = parse_optional_instant(at.as_ref())?.unwrap_or_else(now);

            let session = lifecycle.close(worker.id, instant)?;
            record(
                &store,
                "close",
                &worker.handle,
                &format!("Session {} closed at {}", session.id, instant),
            );

            if cli.json {
                print_json(&session)?;
            } else {
                success(format!("{} clocked out: {}", worker.handle, session_line(&session)));
            }
        }

        Commands::Day {
            handle,
            date,
            summary,
        } => {
            let worker = resolve_worker(&store, handle)?;
            let day = parse_optional_date(date.as_ref())?;

            if *summary {
                let report =
                    ReportAggregator::new(&store, &store).daily_summary(worker.id, day, now())?;
                if cli.json {
                    print_json(&report)?;
                } else {
                    print!("{}", daily_text(&report));
                }
            } else {
                let session = lifecycle.find_on_date(worker.id, day, now())?;
                if cli.json {
                    print_json(&session)?;
                } else {
                    println!("{}", session_line(&session));
                }
            }
        }

        Commands::Sessions { handle } => {
            let worker = resolve_worker(&store, handle)?;
            let sessions = lifecycle.list_all(worker.id)?;

            if cli.json {
                print_json(&sessions)?;
            } else if sessions.is_empty() {
                println!("No sessions for {}.", worker.handle);
            } else {
                print!("{}", sessions_table(&sessions, cfg.separator()));
            }
        }

        _ => {}
    }

    Ok(())
}
