//! pontolog library root.
//!
//! The engine lives in [`core`]: worker registration, the session lifecycle
//! (open / close / find by date / list) and the weekly report. It talks to
//! storage only through the traits in [`db::store`]; [`db::SqliteStore`] and
//! [`db::MemoryStore`] implement them. [`run`] wires everything to the CLI.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Worker { .. } => cli::commands::worker::handle(cli, cfg),
        Commands::Open { .. }
        | Commands::Close { .. }
        | Commands::Day { .. }
        | Commands::Sessions { .. } => cli::commands::session::handle(cli, cfg),
        Commands::Week { .. } => cli::commands::week::handle(cli, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is loaded once and only read afterwards.
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
