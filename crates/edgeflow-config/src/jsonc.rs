//! JSONC cleanup for wrangler configuration files.
//!
//! wrangler ships its config as `wrangler.jsonc`: plain JSON plus C-style
//! comments, sometimes with a UTF-8 BOM when edited on Windows. serde_json
//! accepts neither, so both are stripped before parsing.

use regex::Regex;

/// Strips a leading BOM and C-style comments from JSONC text.
///
/// A `//` sequence is treated as a comment only when the preceding character
/// is not `\` or `:`, which keeps `"https://..."` string values intact.
/// This is a heuristic, not a comment-aware parser: a `//` inside a string
/// that is not preceded by one of those characters will still be eaten.
pub fn strip_comments(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let comment = Regex::new(r"(?m)/\*[\s\S]*?\*/|([^\\:]|^)//.*$").unwrap();
    comment.replace_all(text, "$1").into_owned()
}
