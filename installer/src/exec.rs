//! External process execution.
//!
//! This module provides the [`CommandExecutor`] abstraction used by every
//! stage that invokes an external tool (git, node, npm, npx). Captured runs
//! return the full [`Output`] so callers can classify failures from stderr;
//! streaming runs inherit the operator's terminal for long build steps.

use crate::error::Result;
use camino::Utf8Path;
use std::process::{Command, ExitStatus, Output, Stdio};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command and captures its output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while spawning the command.
    fn run(&self, cmd: &str, args: &[&str], cwd: Option<&Utf8Path>) -> Result<Output>;

    /// Runs a command with stdio inherited from the operator's terminal,
    /// blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while spawning the command.
    fn run_streaming(&self, cmd: &str, args: &[&str], cwd: Option<&Utf8Path>)
    -> Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str], cwd: Option<&Utf8Path>) -> Result<Output> {
        let mut command = Command::new(cmd);
        command
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            command.current_dir(dir.as_std_path());
        }
        command.output().map_err(Into::into)
    }

    fn run_streaming(
        &self,
        cmd: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> Result<ExitStatus> {
        let mut command = Command::new(cmd);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir.as_std_path());
        }
        command.status().map_err(Into::into)
    }
}

/// Extracts a trimmed stderr message from captured output, substituting a
/// placeholder when the tool wrote nothing.
#[must_use]
pub fn stderr_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        "unknown error".to_owned()
    } else {
        trimmed.to_owned()
    }
}
