//! Output capture primitives.
//!
//! This module provides the building blocks the execution engine uses to
//! tee child-process output:
//! - A cloneable, lock-protected byte buffer shared between stream pumps
//! - A fan-out writer that forwards every write to all registered sinks
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use runtee::output::{SharedBuffer, TeeWriter};
//!
//! let buffer = SharedBuffer::new();
//! let mut tee = TeeWriter::new().attach(Box::new(buffer.clone()));
//! tee.write_all(b"captured").unwrap();
//! assert_eq!(buffer.contents(), b"captured");
//! ```

mod tee;

pub use tee::{SharedBuffer, TeeWriter};
