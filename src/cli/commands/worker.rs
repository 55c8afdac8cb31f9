use crate::cli::commands::{open_store, print_json, record};
use crate::cli::parser::{Cli, Commands, WorkerAction};
use crate::config::Config;
use crate::core::RegistryLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::ui::render::workers_table;

/// Handle the `worker` subcommands
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Worker { action } = &cli.command else {
        return Ok(());
    };

    let store = open_store(cfg)?;

    match action {
        WorkerAction::Add { name } => {
            let full_name = name.join(" ");
            let worker = RegistryLogic::register(&store, &full_name)?;

            record(
                &store,
                "register",
                &worker.handle,
                &format!("Registered '{}' (id {})", worker.display_name, worker.id),
            );

            if cli.json {
                print_json(&worker)?;
            } else {
                success(format!(
                    "Registered {} as {} (id {}).",
                    worker.display_name, worker.handle, worker.id
                ));
            }
        }

        WorkerAction::List => {
            let workers = RegistryLogic::list(&store)?;
            if cli.json {
                print_json(&workers)?;
            } else if workers.is_empty() {
                println!("No workers registered.");
            } else {
                print!("{}", workers_table(&workers, cfg.separator()));
            }
        }

        WorkerAction::Show { handle, id } => {
            let worker = match (handle, id) {
                (_, Some(id)) => RegistryLogic::by_id(&store, *id)?,
                (Some(h), None) => RegistryLogic::by_handle(&store, h)?,
                (None, None) => {
                    return Err(AppError::WorkerNotFound(
                        "specify a handle or --id".to_string(),
                    ));
                }
            };

            if cli.json {
                print_json(&worker)?;
            } else {
                print!(
                    "{}",
                    workers_table(std::slice::from_ref(&worker), cfg.separator())
                );
            }
        }

        WorkerAction::Del { handle } => {
            let worker = RegistryLogic::remove(&store, handle)?;
            record(
                &store,
                "delete",
                &worker.handle,
                "Deleted worker and all of their sessions",
            );
            success(format!("Deleted {} and all of their sessions.", worker.handle));
        }
    }

    Ok(())
}
