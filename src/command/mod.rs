//! Command variants.
//!
//! A [`Command`] describes how to invoke a process without executing
//! anything. Variants compose by wrapping:
//! - [`LocalCommand`] runs a binary directly
//! - [`ShellCommand`] hands an inner command's string form to a shell
//! - [`SshCommand`] hands an inner command's argv to an `ssh` client
//!
//! # Example
//!
//! ```
//! use runtee::command::{Command, LocalCommand, ShellCommand, SshCommand};
//!
//! let local = LocalCommand::parse("echo hello world").unwrap();
//! assert_eq!(local.binary(), "echo");
//!
//! // The shell re-interprets pipes contained in the inner string.
//! let shell = ShellCommand::wrap(LocalCommand::parse("echo hi | wc -c").unwrap());
//! assert_eq!(shell.args().len(), 2);
//!
//! let remote = SshCommand::new("build-host", LocalCommand::parse("uname -a").unwrap());
//! assert_eq!(remote.binary(), "ssh");
//! ```

mod local;
mod shell;
mod ssh;

pub use local::LocalCommand;
pub use shell::ShellCommand;
pub use ssh::SshCommand;

use std::borrow::Cow;
use std::fmt;

/// A description of a process invocation.
///
/// `binary()` and `args()` must be directly executable as
/// `exec(binary, args...)` with no further shell interpretation by the
/// caller; shell interpretation, when wanted, is itself a command variant.
/// The `Display` rendering is a shell-typeable form for logging only and
/// is never used for execution.
pub trait Command: fmt::Debug + fmt::Display + Send + Sync {
    /// Program to execute.
    fn binary(&self) -> &str;

    /// Argument vector passed to the program.
    fn args(&self) -> Vec<String>;
}

/// Render tokens as one shell-typeable line.
///
/// Only tokens containing whitespace or quote characters get quoted, so
/// operators like `|` and `>` survive verbatim and stay re-interpretable
/// when the line is handed back to a shell.
pub(crate) fn render_tokens<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .map(quote_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_token(token: &str) -> Cow<'_, str> {
    if token.is_empty() {
        return Cow::Borrowed("''");
    }
    let needs_quoting = token
        .chars()
        .any(|c| c.is_whitespace() || c == '\'' || c == '"');
    if !needs_quoting {
        return Cow::Borrowed(token);
    }
    if !token.contains('\'') {
        return Cow::Owned(format!("'{token}'"));
    }
    Cow::Owned(format!(
        "\"{}\"",
        token.replace('\\', "\\\\").replace('"', "\\\"")
    ))
}
