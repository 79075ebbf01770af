//! Deployment error types.
//!
//! Every variant is fatal: the orchestration sequence runs each external
//! step exactly once and aborts the remainder on the first failure.

use thiserror::Error;

use crate::driver::DeployPhase;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("invalid input: {0}")]
    Input(String),

    #[error("not authenticated: {0}")]
    Auth(String),

    #[error("command failed: {command}: {}", render_output(.stdout, .stderr))]
    Command {
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("namespace creation could not be verified: {0}")]
    ResourceCreation(String),

    #[error("deployment step out of order: expected phase {expected}, currently {actual}")]
    InvalidTransition {
        expected: DeployPhase,
        actual: DeployPhase,
    },

    #[error(transparent)]
    Config(#[from] edgeflow_config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;

/// Renders captured command output for error messages: stderr when present,
/// falling back to stdout since some tools report failures there.
fn render_output(stdout: &str, stderr: &str) -> String {
    if !stderr.is_empty() {
        stderr.to_string()
    } else if !stdout.is_empty() {
        stdout.to_string()
    } else {
        "(no output)".to_string()
    }
}
