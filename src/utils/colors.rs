/// ANSI color helper utilities for terminal output.
use regex::Regex;
use std::sync::OnceLock;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Remove ANSI escape sequences, leaving only visible text.
pub fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let re = ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));
    re.replace_all(s, "").into_owned()
}

/// Grey out placeholders like `--:--:--`.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Clock-in in green, clock-out in red, placeholders in grey.
pub fn colorize_in_out(value: &str, is_in: bool) -> String {
    if value.trim().is_empty() || value.trim() == "--:--:--" {
        return format!("{GREY}{value}{RESET}");
    }

    if is_in {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}
