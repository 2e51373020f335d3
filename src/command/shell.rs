//! Shell-wrapped command invocation.

use std::fmt;

use crate::Result;

use super::{render_tokens, Command, LocalCommand};

/// Wraps an inner command so a shell re-interprets its string form.
///
/// The child process receives exactly three argv entries: the shell path,
/// the "execute the following string" flag, and the inner command's
/// rendering as one literal argument. That single argument is what lets
/// the shell expand pipes, redirection, and variables the inner string
/// may contain.
#[derive(Debug)]
pub struct ShellCommand {
    shell_path: String,
    shell_flag: String,
    inner: Box<dyn Command>,
}

impl ShellCommand {
    /// Wrap a command with the default `sh -c` invocation.
    pub fn wrap(inner: impl Command + 'static) -> Self {
        Self {
            shell_path: "sh".to_string(),
            shell_flag: "-c".to_string(),
            inner: Box::new(inner),
        }
    }

    /// Tokenize a local command line and wrap it in the default shell.
    pub fn from_line(line: &str) -> Result<Self> {
        Ok(Self::wrap(LocalCommand::parse(line)?))
    }

    /// Use a different shell, e.g. `with_shell("bash", "-c")` or
    /// `with_shell("cmd.exe", "/C")`.
    pub fn with_shell(mut self, shell_path: impl Into<String>, shell_flag: impl Into<String>) -> Self {
        self.shell_path = shell_path.into();
        self.shell_flag = shell_flag.into();
        self
    }
}

impl Command for ShellCommand {
    fn binary(&self) -> &str {
        &self.shell_path
    }

    fn args(&self) -> Vec<String> {
        // The inner rendering is passed as one literal argument, never
        // re-split.
        vec![self.shell_flag.clone(), self.inner.to_string()]
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.to_string();
        f.write_str(&render_tokens([
            self.shell_path.as_str(),
            self.shell_flag.as_str(),
            inner.as_str(),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_defaults_to_sh() {
        let cmd = ShellCommand::from_line("echo abc").unwrap();
        assert_eq!(cmd.binary(), "sh");
        assert_eq!(cmd.args(), vec!["-c", "echo abc"]);
    }

    #[test]
    fn test_exactly_three_argv_entries() {
        let cmd = ShellCommand::from_line("echo hi | wc -c").unwrap();
        // binary + two args: the flag and the unsplit inner string
        assert_eq!(cmd.args().len(), 2);
        assert_eq!(cmd.args()[1], "echo hi | wc -c");
    }

    #[test]
    fn test_with_shell_override() {
        let cmd = ShellCommand::from_line("dir").unwrap().with_shell("cmd.exe", "/C");
        assert_eq!(cmd.binary(), "cmd.exe");
        assert_eq!(cmd.args(), vec!["/C", "dir"]);
    }

    #[test]
    fn test_display_quotes_inner_string() {
        let cmd = ShellCommand::from_line("echo hi | wc -c").unwrap();
        assert_eq!(cmd.to_string(), "sh -c 'echo hi | wc -c'");
    }

    #[test]
    fn test_wrap_preserves_inner_quoting() {
        let inner = LocalCommand::new("grep").arg("a phrase");
        let cmd = ShellCommand::wrap(inner);
        assert_eq!(cmd.args()[1], "grep 'a phrase'");
    }
}
