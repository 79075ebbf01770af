//! Subprocess gateway.
//!
//! All backend interaction funnels through here: spawn the tool, capture
//! stdout and stderr, turn a non-zero exit into a typed error carrying both
//! streams. Secrets are written to the child's stdin and never appear in
//! argv, a file, or the environment.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;

use crate::error::{Result, WranglerError};

/// Runs an external command, synchronously or asynchronously, with
/// identical capture and failure semantics.
#[derive(Debug, Clone)]
pub struct Gateway {
    program: String,
    base_args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl Gateway {
    /// Builds a gateway from a command prefix such as `"npx wrangler"`.
    /// The prefix is whitespace-split; the first token is the program.
    pub fn new(command: &str) -> Result<Self> {
        let mut tokens = command.split_whitespace().map(str::to_string);
        let program = tokens.next().ok_or_else(|| {
            WranglerError::CommandFailed {
                command: command.to_string(),
                stdout: String::new(),
                stderr: "empty command".to_string(),
            }
        })?;
        Ok(Self {
            program,
            base_args: tokens.collect(),
            cwd: None,
        })
    }

    /// Runs subsequent commands from the given working directory.
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Renders the full command line for logs and error messages.
    pub fn render(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(self.base_args.iter().map(String::as_str));
        parts.extend(args);
        parts.join(" ")
    }

    /// Runs the command to completion and returns trimmed stdout.
    ///
    /// `input`, when present, is piped to the child's stdin and the channel
    /// is closed before waiting. Non-zero exit fails with
    /// [`WranglerError::CommandFailed`].
    pub async fn run(&self, args: &[&str], input: Option<&str>) -> Result<String> {
        let command_line = self.render(args);
        tracing::debug!(command = %command_line, "running");

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let mut child = cmd.spawn().map_err(|err| self.spawn_error(err))?;
        if let Some(input) = input {
            // Scope the handle so stdin closes before the child is awaited.
            let mut stdin = child.stdin.take().ok_or_else(|| {
                WranglerError::Io(std::io::Error::other("child stdin not captured"))
            })?;
            stdin.write_all(input.as_bytes()).await?;
            drop(stdin);
        }

        let output = child.wait_with_output().await?;
        self.finish(command_line, output.status, output.stdout, output.stderr)
    }

    /// Blocking variant of [`Gateway::run`] with the same semantics.
    pub fn run_blocking(&self, args: &[&str], input: Option<&str>) -> Result<String> {
        use std::io::Write;

        let command_line = self.render(args);
        tracing::debug!(command = %command_line, "running (blocking)");

        let mut cmd = std::process::Command::new(&self.program);
        cmd.args(&self.base_args)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let mut child = cmd.spawn().map_err(|err| self.spawn_error(err))?;
        if let Some(input) = input {
            let mut stdin = child.stdin.take().ok_or_else(|| {
                WranglerError::Io(std::io::Error::other("child stdin not captured"))
            })?;
            stdin.write_all(input.as_bytes())?;
            drop(stdin);
        }

        let output = child.wait_with_output()?;
        self.finish(command_line, output.status, output.stdout, output.stderr)
    }

    fn spawn_error(&self, err: std::io::Error) -> WranglerError {
        if err.kind() == std::io::ErrorKind::NotFound {
            WranglerError::NotFound
        } else {
            WranglerError::Io(err)
        }
    }

    fn finish(
        &self,
        command: String,
        status: std::process::ExitStatus,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    ) -> Result<String> {
        let stdout = String::from_utf8_lossy(&stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
        if !status.success() {
            return Err(WranglerError::CommandFailed {
                command,
                stdout,
                stderr,
            });
        }
        Ok(stdout)
    }
}
