//! Shared capture buffers and the fan-out writer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A growable byte buffer behind a lock, cloneable into multiple writers.
///
/// Both stream pumps hold a clone of the combined buffer, so every write
/// takes the lock and appends atomically. Interleaving across streams
/// follows write arrival order, which makes the combined capture a
/// best-effort chronological log rather than a total order.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with a starting capacity.
    ///
    /// The capacity is a hint, not a bound; the buffer grows as needed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::with_capacity(capacity))),
        }
    }

    /// Snapshot the captured bytes.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Number of bytes captured so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been captured yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        // A pump thread that panicked mid-append leaves the buffer intact,
        // so the poisoned value is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer that forwards each write to every registered sink in order.
///
/// The first sink error aborts the write and is returned to the caller;
/// sinks registered earlier will already have received the data.
pub struct TeeWriter {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl TeeWriter {
    /// Create a tee with no sinks. Writes succeed and go nowhere.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Register another sink. Sinks receive writes in registration order.
    pub fn attach(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for TeeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TeeWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeeWriter")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
