//! Handle allocation: `first.last` plus a two digit sequence.

use crate::errors::{AppError, AppResult};

/// Separator between first and last name in a handle.
pub const HANDLE_SEPARATOR: char = '.';

/// Derive a handle from a full name and the next sequence value.
///
/// The sequence is zero-padded to two digits and only its last two digits are
/// kept, so sequence 100 yields the same suffix as sequence 0. The caller is
/// responsible for detecting the resulting collisions.
pub fn allocate(full_name: &str, next_sequence: u64) -> AppResult<String> {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();

    // At least a first and a last name; middle names are ignored.
    let [first, .., last] = tokens.as_slice() else {
        return Err(AppError::InvalidName(full_name.to_string()));
    };

    Ok(format!(
        "{}{}{}{}",
        first.to_lowercase(),
        HANDLE_SEPARATOR,
        last.to_lowercase(),
        sequence_suffix(next_sequence)
    ))
}

fn sequence_suffix(seq: u64) -> String {
    let padded = format!("{:02}", seq);
    padded[padded.len() - 2..].to_string()
}
