//! Minimal line-based prompts for values not supplied as flags.

use std::io::{self, Write};

/// Asks for a text value, falling back to `default` on an empty answer.
pub fn text(message: &str, default: Option<&str>) -> io::Result<String> {
    match default {
        Some(default) => print!("{message} [{default}]: "),
        None => print!("{message}: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let value = line.trim();
    if value.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(value.to_string())
    }
}

/// Asks until `valid` accepts the answer; an empty final answer is returned
/// as-is so the caller can treat it as a skip or a cancellation.
pub fn text_validated(
    message: &str,
    default: Option<&str>,
    hint: &str,
    valid: impl Fn(&str) -> bool,
) -> io::Result<String> {
    loop {
        let value = text(message, default)?;
        if value.is_empty() || valid(&value) {
            return Ok(value);
        }
        eprintln!("{hint}");
    }
}

/// Yes/no confirmation.
pub fn confirm(message: &str, default: bool) -> io::Result<bool> {
    let choices = if default { "Y/n" } else { "y/N" };
    print!("{message} [{choices}]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    match line.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "y" | "yes" => Ok(true),
        _ => Ok(false),
    }
}
