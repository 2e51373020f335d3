//! # runtee
//!
//! Lightweight command runner with tee'd stream capture.
//!
//! This crate models a runnable command — a direct local process, a
//! shell-wrapped process, or a remote process behind an `ssh` client —
//! and executes it while teeing stdout and stderr to the console and to
//! in-memory buffers, including a combined buffer that merges both
//! streams in arrival order. The outcome of every execution, from
//! "binary not found" to "exited non-zero" to success, is inspected
//! through one uniform result type.
//!
//! ## Features
//!
//! - **Command variants**: local, shell-wrapped, and ssh-wrapped commands
//!   behind one `Command` trait, composed by wrapping
//! - **Fan-out capture**: each stream is echoed and captured at the same
//!   time, never one or the other
//! - **Uniform results**: start failures, wait failures, and exit codes
//!   all land in the `RunResult`, not in scattered error paths
//!
//! ## Quick Start
//!
//! ```no_run
//! use runtee::{Runner, ShellCommand};
//!
//! fn main() -> runtee::Result<()> {
//!     // Initialize logging
//!     runtee::logging::try_init().ok();
//!
//!     // Run a local command; output is echoed and captured.
//!     let result = Runner::local("echo hello")?.execute()?;
//!     println!("captured: {}", result.stdout_trimmed());
//!
//!     // Let a shell interpret a pipe, without echoing to the console.
//!     let counted = Runner::new()
//!         .command(ShellCommand::from_line("echo hello | wc -c")?)
//!         .silent()
//!         .execute()?;
//!     assert!(counted.successful());
//!
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod execution;
pub mod logging;
pub mod output;

// Re-export commonly used types
pub use command::{Command, LocalCommand, ShellCommand, SshCommand};
pub use error::{Result, RunnerError};
pub use execution::{RunResult, Runner};
pub use output::{SharedBuffer, TeeWriter};
