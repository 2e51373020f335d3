//! Remote command invocation over an `ssh` client.

use std::fmt;

use super::{render_tokens, Command};

const SSH_BINARY: &str = "ssh";

/// Runs an inner command on a remote host through the `ssh` binary.
///
/// The inner binary and arguments are appended after a `--` separator as
/// discrete argv entries; no quoting is applied for the remote shell, so
/// arguments containing shell metacharacters are re-interpreted on the
/// remote side. The target may be a plain host, `user@host`, or an alias
/// from the ssh client configuration.
#[derive(Debug)]
pub struct SshCommand {
    target: String,
    inner: Box<dyn Command>,
}

impl SshCommand {
    /// Run `inner` on `target` through the local `ssh` client.
    pub fn new(target: impl Into<String>, inner: impl Command + 'static) -> Self {
        Self {
            target: target.into(),
            inner: Box::new(inner),
        }
    }
}

impl Command for SshCommand {
    fn binary(&self) -> &str {
        SSH_BINARY
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.target.clone(),
            "--".to_string(),
            self.inner.binary().to_string(),
        ];
        args.extend(self.inner.args());
        args
    }
}

impl fmt::Display for SshCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -- {}",
            SSH_BINARY,
            render_tokens([self.target.as_str()]),
            self.inner
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{LocalCommand, ShellCommand};

    #[test]
    fn test_argv_layout() {
        let cmd = SshCommand::new("build-host", LocalCommand::parse("ls -la /tmp").unwrap());
        assert_eq!(cmd.binary(), "ssh");
        assert_eq!(cmd.args(), vec!["build-host", "--", "ls", "-la", "/tmp"]);
    }

    #[test]
    fn test_inner_args_stay_discrete() {
        let inner = LocalCommand::new("grep").arg("a phrase").arg("log.txt");
        let cmd = SshCommand::new("host", inner);
        // No quoting is added for the remote shell.
        assert_eq!(cmd.args(), vec!["host", "--", "grep", "a phrase", "log.txt"]);
    }

    #[test]
    fn test_wrapping_a_shell_command() {
        let shell = ShellCommand::from_line("echo hi | wc -c").unwrap();
        let cmd = SshCommand::new("host", shell);
        assert_eq!(
            cmd.args(),
            vec!["host", "--", "sh", "-c", "echo hi | wc -c"]
        );
    }

    #[test]
    fn test_display() {
        let cmd = SshCommand::new("user@host", LocalCommand::parse("uname -a").unwrap());
        assert_eq!(cmd.to_string(), "ssh user@host -- uname -a");
    }
}
