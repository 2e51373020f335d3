//! Error types for runtee.

use thiserror::Error;

/// Main error type for runtee operations.
///
/// Errors that are recorded inside a [`crate::RunResult`] carry string
/// payloads so results can hand out owned copies from their queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// No command was configured on the runner.
    #[error("missing command, use command() or local()")]
    MissingCommand,

    /// A command line tokenized to nothing.
    #[error("empty command line")]
    EmptyCommand,

    /// A command line could not be tokenized (unbalanced quoting).
    #[error("unparsable command line: {0}")]
    BadCommandLine(String),

    /// The child process could not be created.
    #[error("failed to start process: {0}")]
    Start(String),

    /// Waiting for the child process failed.
    #[error("failed to wait for process: {0}")]
    Wait(String),

    /// The process never reached a terminal wait state.
    #[error("no exit code available")]
    NoExitCode,

    /// The process ran but did not succeed.
    #[error("execution of command '{command}' failed: {stderr}")]
    CommandFailed {
        /// Rendering of the command that failed.
        command: String,
        /// Trimmed stderr captured from the process.
        stderr: String,
    },
}

/// Convenience Result type for runtee operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command_display() {
        let err = RunnerError::MissingCommand;
        assert!(err.to_string().contains("missing command"));
    }

    #[test]
    fn test_bad_command_line_display() {
        let err = RunnerError::BadCommandLine("echo 'oops".into());
        assert!(err.to_string().contains("unparsable"));
        assert!(err.to_string().contains("echo 'oops"));
    }

    #[test]
    fn test_start_display() {
        let err = RunnerError::Start("No such file or directory".into());
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn test_command_failed_display() {
        let err = RunnerError::CommandFailed {
            command: "ls /nope".into(),
            stderr: "ls: /nope: No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("execution of command 'ls /nope' failed"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_errors_are_cloneable() {
        let err = RunnerError::Wait("interrupted".into());
        assert_eq!(err.clone(), err);
    }
}
