//! Direct local process invocation.

use std::fmt;

use crate::error::RunnerError;
use crate::Result;

use super::{render_tokens, Command};

/// A binary plus its argument list, run without any shell in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCommand {
    binary: String,
    args: Vec<String>,
}

impl LocalCommand {
    /// Create a command for the given binary with no arguments.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
        }
    }

    /// Tokenize a full command line into binary and arguments.
    ///
    /// Splits on whitespace while treating single- and double-quoted
    /// substrings as atomic tokens. This is conventional word-splitting,
    /// not a shell grammar: no variable expansion, no pipes. Wrap the
    /// command in a [`super::ShellCommand`] to get those.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = shlex::split(line)
            .ok_or_else(|| RunnerError::BadCommandLine(line.to_string()))?
            .into_iter();

        let binary = tokens.next().ok_or(RunnerError::EmptyCommand)?;
        Ok(Self {
            binary,
            args: tokens.collect(),
        })
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Command for LocalCommand {
    fn binary(&self) -> &str {
        &self.binary
    }

    fn args(&self) -> Vec<String> {
        self.args.clone()
    }
}

impl fmt::Display for LocalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens = std::iter::once(self.binary.as_str()).chain(self.args.iter().map(String::as_str));
        f.write_str(&render_tokens(tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let cmd = LocalCommand::parse("echo abc").unwrap();
        assert_eq!(cmd.binary(), "echo");
        assert_eq!(Command::args(&cmd), vec!["abc"]);
    }

    #[test]
    fn test_parse_quoted_tokens_stay_atomic() {
        let cmd = LocalCommand::parse(r#"grep "a phrase" 'another one' file.txt"#).unwrap();
        assert_eq!(cmd.binary(), "grep");
        assert_eq!(Command::args(&cmd), vec!["a phrase", "another one", "file.txt"]);
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(LocalCommand::parse("").unwrap_err(), RunnerError::EmptyCommand);
        assert_eq!(
            LocalCommand::parse("   ").unwrap_err(),
            RunnerError::EmptyCommand
        );
    }

    #[test]
    fn test_parse_unbalanced_quote() {
        let err = LocalCommand::parse("echo 'oops").unwrap_err();
        assert!(matches!(err, RunnerError::BadCommandLine(_)));
    }

    #[test]
    fn test_builder_args() {
        let cmd = LocalCommand::new("tar").arg("-czf").args(["out.tgz", "src"]);
        assert_eq!(cmd.binary(), "tar");
        assert_eq!(Command::args(&cmd), vec!["-czf", "out.tgz", "src"]);
    }

    #[test]
    fn test_display_round_trips_quoting() {
        let cmd = LocalCommand::new("grep").arg("a phrase").arg("file.txt");
        assert_eq!(cmd.to_string(), "grep 'a phrase' file.txt");

        let reparsed = LocalCommand::parse(&cmd.to_string()).unwrap();
        assert_eq!(reparsed, cmd);
    }
}
