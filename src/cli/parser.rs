use clap::{Parser, Subcommand};

/// Command-line interface definition for pontolog
/// Clock workers in and out and report worked hours, backed by SQLite
#[derive(Parser)]
#[command(
    name = "pontolog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work sessions per worker and report daily and weekly hours",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(global = true, long = "json")]
    pub json: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Register, inspect and remove workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Clock a worker in (open a session)
    Open {
        /// Worker handle, e.g. joão.silva01
        handle: String,

        #[arg(
            long = "at",
            help = "Instant to record instead of now (YYYY-MM-DDTHH:MM[:SS[.mmm]])"
        )]
        at: Option<String>,
    },

    /// Clock a worker out (close the open session)
    Close {
        handle: String,

        #[arg(
            long = "at",
            help = "Instant to record instead of now (YYYY-MM-DDTHH:MM[:SS[.mmm]])"
        )]
        at: Option<String>,
    },

    /// Show the session of a given day
    Day {
        handle: String,

        #[arg(long = "date", help = "Day to look up (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "summary", help = "Show first IN/OUT and total hours of the day")]
        summary: bool,
    },

    /// List all sessions of a worker, newest first
    Sessions { handle: String },

    /// Weekly report (Monday to Sunday)
    Week {
        handle: String,

        #[arg(
            long = "date",
            help = "Any day of the week to report (YYYY-MM-DD), default today"
        )]
        date: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Register a worker from their full name
    Add {
        /// Full name (first and last name at least)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List registered workers
    List,

    /// Show one worker by handle or id
    Show {
        handle: Option<String>,

        #[arg(long = "id", conflicts_with = "handle")]
        id: Option<i64>,
    },

    /// Delete a worker and all their sessions
    Del { handle: String },
}
