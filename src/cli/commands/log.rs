use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::LogEntry;
use crate::errors::AppResult;
use crate::utils::colors::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// ANSI colour by operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "open" => Colour::Green,
        "close" => Colour::Red,
        "register" => Colour::Cyan,
        "delete" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, operation coloured, cut to MAX_OP_WIDTH visible chars.
fn op_target_cell(entry: &LogEntry) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub fn render_log(entries: &[LogEntry]) -> String {
    let cells: Vec<String> = entries.iter().map(op_target_cell).collect();

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
    let op_w = cells
        .iter()
        .map(|c| strip_ansi(c).chars().count())
        .max()
        .unwrap_or(10)
        .min(MAX_OP_WIDTH);

    let mut out = String::new();
    for (entry, cell) in entries.iter().zip(&cells) {
        let padding = " ".repeat(op_w.saturating_sub(strip_ansi(cell).chars().count()));
        out.push_str(&format!(
            "{:>id_w$}: {:<date_w$} | {}{} => {}\n",
            entry.id,
            entry.date,
            cell,
            padding,
            entry.message,
            id_w = id_w,
            date_w = date_w
        ));
    }
    out
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store = open_store(cfg)?;
        let entries = store.load_log()?;

        println!("📜 Internal log:\n");
        print!("{}", render_log(&entries));
    }

    Ok(())
}
