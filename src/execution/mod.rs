//! Command execution engine.
//!
//! This module provides the execution side of the crate:
//! - [`Runner`], the chainable execution configuration
//! - The spawn/tee/wait engine behind [`Runner::execute`]
//! - [`RunResult`], the read-only view of one execution's outcome
//!
//! Execution is synchronous: one `execute` call blocks its caller for the
//! child's full lifetime, with the two stream pumps as the only internal
//! concurrency. Callers wanting parallel executions run `execute` on
//! threads or tasks of their own; each execution owns its buffers and
//! process handle, so runners never share state.
//!
//! # Example
//!
//! ```no_run
//! use runtee::execution::Runner;
//!
//! let result = Runner::local("echo hello")
//!     .unwrap()
//!     .silent()
//!     .execute()
//!     .unwrap();
//!
//! assert!(result.successful());
//! println!("captured: {}", result.stdout_trimmed());
//! ```

mod executor;
mod result;
mod runner;

pub use result::RunResult;
pub use runner::Runner;
