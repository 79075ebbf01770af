//! wrangler gateway error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WranglerError {
    #[error("wrangler not found. Please install: npm install -g wrangler")]
    NotFound,

    #[error("wrangler authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("wrangler command failed: {command}: {}", render_output(.stdout, .stderr))]
    CommandFailed {
        command: String,
        stdout: String,
        stderr: String,
    },

    #[error("namespace creation failed: {0}")]
    CreationFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WranglerError>;

/// Renders captured command output for error messages: stderr when present,
/// falling back to stdout since wrangler reports some failures there.
pub(crate) fn render_output(stdout: &str, stderr: &str) -> String {
    if !stderr.is_empty() {
        stderr.to_string()
    } else if !stdout.is_empty() {
        stdout.to_string()
    } else {
        "(no output)".to_string()
    }
}

impl From<WranglerError> for edgeflow_deploy::DeployError {
    fn from(err: WranglerError) -> Self {
        use edgeflow_deploy::DeployError;
        match err {
            WranglerError::NotFound => DeployError::Command {
                command: "wrangler".to_string(),
                stdout: String::new(),
                stderr: "wrangler not found. Please install: npm install -g wrangler".to_string(),
            },
            WranglerError::AuthenticationFailed(message) => DeployError::Auth(message),
            WranglerError::CommandFailed {
                command,
                stdout,
                stderr,
            } => DeployError::Command {
                command,
                stdout,
                stderr,
            },
            WranglerError::CreationFailed(message) => DeployError::ResourceCreation(message),
            WranglerError::Io(source) => DeployError::Io(source),
        }
    }
}
