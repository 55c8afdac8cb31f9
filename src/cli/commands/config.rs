use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

fn platform_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".into()
            } else {
                "nano".into()
            }
        })
}

/// True when the editor ran and exited cleanly.
fn run_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// `config --print` shows the effective configuration (defaults filled in,
/// `--db` applied); `config --edit` opens the file itself.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        println!("📄 Configuration ({}):\n", path.display());
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("{}", yaml);
    }

    if *edit_config {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} does not exist, run `pontolog init` first",
                path.display()
            )));
        }

        let fallback = platform_editor();
        let chosen = editor.clone().unwrap_or_else(|| fallback.clone());

        if run_editor(&chosen, &path) {
            success(format!("{} saved with '{}'", path.display(), chosen));
        } else if chosen != fallback && run_editor(&fallback, &path) {
            warning(format!("'{}' failed, used '{}' instead", chosen, fallback));
            success(format!("{} saved with '{}'", path.display(), fallback));
        } else {
            return Err(AppError::Config(format!(
                "no usable editor for {}",
                path.display()
            )));
        }
    }

    Ok(())
}
