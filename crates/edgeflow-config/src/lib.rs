//! wrangler.jsonc store for edgeflow.
//!
//! The configuration file is the one piece of durable state the deployment
//! flow owns, so every update is a full read-merge-write round trip: load
//! (or synthesize) the whole document, mutate the typed view, write the
//! whole document back. Partial patches are never applied.

pub mod document;
pub mod error;
mod jsonc;

pub use document::{DEFAULT_CONFIG_FILE, DEFAULT_MAIN, KvNamespace, WranglerConfig};
pub use error::{ConfigError, Result};

use std::fs;
use std::path::Path;

/// Loads and parses an existing config file.
pub fn load(path: &Path) -> Result<WranglerConfig> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cleaned = jsonc::strip_comments(&raw);
    serde_json::from_str(&cleaned).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the config file, or synthesizes a default document when the path
/// does not exist yet.
pub fn load_or_default(path: &Path) -> Result<WranglerConfig> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "loading existing wrangler config");
        load(path)
    } else {
        tracing::debug!(path = %path.display(), "config not found, synthesizing default");
        Ok(WranglerConfig::synthesized())
    }
}

/// Serializes the whole document with 2-space indentation and overwrites
/// the file.
pub fn save(path: &Path, config: &WranglerConfig) -> Result<()> {
    let mut text = serde_json::to_string_pretty(config)?;
    text.push('\n');
    fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
