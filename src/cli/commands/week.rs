use crate::cli::commands::{open_store, parse_optional_date, print_json, resolve_worker};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::ReportAggregator;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::ui::render::weekly_table;
use crate::utils::date::local_midnight;
use crate::utils::time::now;

/// Handle the `week` command
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Week { handle, date } = &cli.command else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let worker = resolve_worker(&store, handle)?;

    let reference = parse_optional_date(date.as_ref())?
        .map(local_midnight)
        .unwrap_or_else(now);

    let report = ReportAggregator::new(&store, &store).weekly_report(worker.id, reference)?;

    if cli.json {
        print_json(&report)?;
    } else {
        header(format!(
            "{} - week of {}",
            worker.handle,
            report.week_start.date()
        ));
        print!("{}", weekly_table(&report, cfg.separator()));
    }

    Ok(())
}
