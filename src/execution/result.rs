//! Execution result types.

use std::process::ExitStatus;
use std::sync::Arc;
use std::time::Duration;

use crate::command::Command;
use crate::error::RunnerError;
use crate::Result;

/// Buffers captured by the stream pumps, frozen at process termination.
#[derive(Debug, Default)]
pub(crate) struct Captured {
    pub(crate) stdout: Vec<u8>,
    pub(crate) stderr: Vec<u8>,
    pub(crate) combined: Vec<u8>,
}

/// Read-only view of one execution's outcome.
///
/// Owned exclusively by the caller that received it. Captured output,
/// process metadata, and recorded failures are stored; exit code, success,
/// and the combined error are derived on demand.
#[derive(Debug)]
pub struct RunResult {
    command: Arc<dyn Command>,
    non_zero_exit_ok: bool,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    combined: Vec<u8>,
    pid: Option<u32>,
    status: Option<ExitStatus>,
    user_time: Option<Duration>,
    start_error: Option<RunnerError>,
    wait_error: Option<RunnerError>,
}

impl RunResult {
    /// The process never started; `error` says why.
    pub(crate) fn start_failure(
        command: Arc<dyn Command>,
        non_zero_exit_ok: bool,
        captured: Captured,
        error: RunnerError,
    ) -> Self {
        Self {
            command,
            non_zero_exit_ok,
            stdout: captured.stdout,
            stderr: captured.stderr,
            combined: captured.combined,
            pid: None,
            status: None,
            user_time: None,
            start_error: Some(error),
            wait_error: None,
        }
    }

    /// The process ran to a terminal wait state.
    pub(crate) fn completed(
        command: Arc<dyn Command>,
        non_zero_exit_ok: bool,
        captured: Captured,
        pid: u32,
        status: ExitStatus,
        user_time: Option<Duration>,
    ) -> Self {
        Self {
            command,
            non_zero_exit_ok,
            stdout: captured.stdout,
            stderr: captured.stderr,
            combined: captured.combined,
            pid: Some(pid),
            status: Some(status),
            user_time,
            start_error: None,
            wait_error: None,
        }
    }

    /// The process started but waiting on it failed.
    pub(crate) fn wait_failure(
        command: Arc<dyn Command>,
        non_zero_exit_ok: bool,
        captured: Captured,
        pid: u32,
        error: RunnerError,
        user_time: Option<Duration>,
    ) -> Self {
        Self {
            command,
            non_zero_exit_ok,
            stdout: captured.stdout,
            stderr: captured.stderr,
            combined: captured.combined,
            pid: Some(pid),
            status: None,
            user_time,
            start_error: None,
            wait_error: Some(error),
        }
    }

    /// The command this result was produced from.
    pub fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }

    /// Captured stdout as text (lossy UTF-8 passthrough).
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Captured stdout with surrounding whitespace removed.
    pub fn stdout_trimmed(&self) -> String {
        self.stdout().trim().to_string()
    }

    /// Captured stdout, line by line.
    pub fn stdout_lines(&self) -> Vec<String> {
        self.stdout().lines().map(str::to_string).collect()
    }

    /// Captured stderr as text (lossy UTF-8 passthrough).
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Captured stderr with surrounding whitespace removed.
    pub fn stderr_trimmed(&self) -> String {
        self.stderr().trim().to_string()
    }

    /// Both streams interleaved in write arrival order.
    ///
    /// The interleaving across streams is best-effort chronological: it is
    /// only as precise as OS pipe buffering and scheduling allow.
    pub fn combined_output(&self) -> String {
        String::from_utf8_lossy(&self.combined).into_owned()
    }

    /// Exact captured stdout bytes.
    pub fn stdout_raw(&self) -> &[u8] {
        &self.stdout
    }

    /// Exact captured stderr bytes.
    pub fn stderr_raw(&self) -> &[u8] {
        &self.stderr
    }

    /// Exact captured combined bytes.
    pub fn combined_raw(&self) -> &[u8] {
        &self.combined
    }

    /// Process ID, if the process started.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Exit status, if a terminal wait state was reached.
    pub fn status(&self) -> Option<ExitStatus> {
        self.status
    }

    /// User CPU time consumed by the child (best-effort, unix only).
    pub fn user_time(&self) -> Option<Duration> {
        self.user_time
    }

    /// The recorded start failure, if the process never started.
    pub fn start_error(&self) -> Option<&RunnerError> {
        self.start_error.as_ref()
    }

    /// The recorded wait failure, if waiting itself failed.
    pub fn wait_error(&self) -> Option<&RunnerError> {
        self.wait_error.as_ref()
    }

    /// Exit code decoded from the termination state.
    ///
    /// Termination without a code (killed by a signal) decodes to `-1`.
    /// Fails with [`RunnerError::NoExitCode`] when the process never
    /// reached a terminal wait state, e.g. after a start failure.
    pub fn exit_code(&self) -> Result<i32> {
        let status = self.status.ok_or(RunnerError::NoExitCode)?;
        Ok(status.code().unwrap_or(-1))
    }

    /// Whether the execution counts as successful.
    ///
    /// True if the tolerance flag was set on the runner, or if the exit
    /// code decodes to exactly 0. An undecodable exit code is never
    /// successful.
    pub fn successful(&self) -> bool {
        if self.non_zero_exit_ok {
            return true;
        }
        matches!(self.exit_code(), Ok(0))
    }

    /// Inverse of [`successful`](Self::successful).
    pub fn failed(&self) -> bool {
        !self.successful()
    }

    /// Best-effort single error for this execution.
    ///
    /// A recorded start or wait failure is returned verbatim. Otherwise,
    /// an unsuccessful result synthesizes an error embedding the command's
    /// rendering and the trimmed stderr. Successful results yield `None`.
    pub fn combined_error(&self) -> Option<RunnerError> {
        if let Some(err) = self.start_error.clone().or_else(|| self.wait_error.clone()) {
            return Some(err);
        }
        if self.successful() {
            return None;
        }
        Some(RunnerError::CommandFailed {
            command: self.command.to_string(),
            stderr: self.stderr_trimmed(),
        })
    }

    /// Human-readable snapshot of the process state, for diagnostics only.
    pub fn state_string(&self) -> String {
        let pid = self
            .pid
            .map(|pid| pid.to_string())
            .unwrap_or_else(|| "?".to_string());
        let exit_code = self
            .exit_code()
            .map(|code| code.to_string())
            .unwrap_or_else(|_| "?".to_string());
        let user_time = self
            .user_time
            .map(|time| format!("{time:?}"))
            .unwrap_or_else(|| "?".to_string());
        format!(
            "PID: {}, Exited: {}, Exit Code: {}, Success: {}, User Time: {}",
            pid,
            self.status.is_some(),
            exit_code,
            self.successful(),
            user_time
        )
    }
}
