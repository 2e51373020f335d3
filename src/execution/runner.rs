//! Execution configuration builder.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::command::{Command, LocalCommand};
use crate::error::RunnerError;
use crate::Result;

use super::executor;
use super::result::RunResult;

/// Mutable configuration for executing one command.
///
/// Setters chain by consuming and returning the runner. Each
/// [`execute`](Self::execute) call reads the configuration without
/// consuming it, so one runner can drive several sequential executions;
/// every execution gets fresh capture buffers.
#[derive(Debug, Clone)]
pub struct Runner {
    pub(super) command: Option<Arc<dyn Command>>,
    pub(super) working_dir: Option<PathBuf>,
    pub(super) env: HashMap<String, String>,
    pub(super) echo_stdout: bool,
    pub(super) echo_stderr: bool,
    pub(super) non_zero_exit_ok: bool,
    pub(super) log_command: bool,
}

impl Runner {
    /// Create a runner with default flags and no command.
    pub fn new() -> Self {
        Self {
            command: None,
            working_dir: None,
            env: HashMap::new(),
            echo_stdout: true,
            echo_stderr: true,
            non_zero_exit_ok: false,
            log_command: false,
        }
    }

    /// Create a runner from a tokenized local command line.
    pub fn local(line: &str) -> Result<Self> {
        Ok(Self::new().command(LocalCommand::parse(line)?))
    }

    /// Create a runner for the given command.
    pub fn with_command(command: impl Command + 'static) -> Self {
        Self::new().command(command)
    }

    /// Set the command to execute.
    pub fn command(mut self, command: impl Command + 'static) -> Self {
        self.command = Some(Arc::new(command));
        self
    }

    /// Run in the given directory instead of inheriting the caller's.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add one environment variable to the overlay.
    ///
    /// The overlay is merged on top of the inherited environment; overlay
    /// keys win on conflict and nothing inherited is removed.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add multiple environment variables to the overlay.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in vars {
            self.env.insert(key.into(), value.into());
        }
        self
    }

    /// Stop echoing the child's stdout to the console. Capture continues.
    pub fn without_stdout(mut self) -> Self {
        self.echo_stdout = false;
        self
    }

    /// Stop echoing the child's stderr to the console. Capture continues.
    pub fn without_stderr(mut self) -> Self {
        self.echo_stderr = false;
        self
    }

    /// Suppress console echo of both streams.
    pub fn silent(self) -> Self {
        self.without_stdout().without_stderr()
    }

    /// Accept any exit code as success.
    pub fn non_zero_exit_ok(mut self) -> Self {
        self.non_zero_exit_ok = true;
        self
    }

    /// Log the command's rendering (and the overlay) before each spawn.
    pub fn log_command(mut self, value: bool) -> Self {
        self.log_command = value;
        self
    }

    /// Restore the echo, tolerance, and logging flags to their defaults.
    ///
    /// The command, working directory, and environment overlay are kept.
    /// This matches long-standing behavior that callers rely on when
    /// re-arming a runner for the next command; it is a quirk, not an
    /// oversight.
    pub fn reset(mut self) -> Self {
        self.echo_stdout = true;
        self.echo_stderr = true;
        self.non_zero_exit_ok = false;
        self.log_command = false;
        self
    }

    /// Execute the configured command and wait for it to terminate.
    ///
    /// The error return is reserved for pre-spawn validation; everything
    /// that happens after validation, including start failures and
    /// non-zero exits, is recorded inside the returned [`RunResult`] so
    /// result inspection is the single triage path.
    pub fn execute(&self) -> Result<RunResult> {
        let command = self.command.clone().ok_or(RunnerError::MissingCommand)?;
        Ok(executor::spawn_and_capture(self, command))
    }

    /// Fail-fast wrapper around [`execute`](Self::execute).
    ///
    /// # Panics
    ///
    /// Panics on a validation failure or whenever the result carries a
    /// combined error, i.e. on start failures, wait failures, and
    /// non-tolerated non-zero exits.
    pub fn must_execute(&self) -> RunResult {
        match self.execute() {
            Ok(result) => {
                if let Some(err) = result.combined_error() {
                    panic!("{err}");
                }
                result
            }
            Err(err) => panic!("{err}"),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}
