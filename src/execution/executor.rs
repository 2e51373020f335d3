//! Process spawning, stream fan-out, and blocking wait.

use std::io::{self, Read, Write};
use std::process::Stdio;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::command::Command;
use crate::error::RunnerError;
use crate::output::{SharedBuffer, TeeWriter};

use super::result::{Captured, RunResult};
use super::runner::Runner;

/// Starting capacity for each capture buffer. A hint, not a bound.
const INITIAL_BUFFER_CAPACITY: usize = 128;

/// Chunk size used by the stream pumps.
const READ_BUFFER_SIZE: usize = 4096;

/// Spawn the runner's command, tee its output, and wait for termination.
///
/// Validation has already happened; everything that can fail from here on
/// is recorded inside the returned result rather than propagated.
pub(super) fn spawn_and_capture(runner: &Runner, command: Arc<dyn Command>) -> RunResult {
    let stdout_buffer = SharedBuffer::with_capacity(INITIAL_BUFFER_CAPACITY);
    let stderr_buffer = SharedBuffer::with_capacity(INITIAL_BUFFER_CAPACITY);
    let combined_buffer = SharedBuffer::with_capacity(INITIAL_BUFFER_CAPACITY);

    let mut child_command = std::process::Command::new(command.binary());
    child_command
        .args(command.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = &runner.working_dir {
        child_command.current_dir(dir);
    }
    // Overlaid on top of the inherited environment; overlay keys win,
    // inherited keys stay.
    child_command.envs(&runner.env);

    if runner.log_command {
        if runner.env.is_empty() {
            info!(command = %command, "executing");
        } else {
            info!(command = %command, env = ?runner.env, "executing");
        }
    }

    let mut child = match child_command.spawn() {
        Ok(child) => child,
        Err(err) => {
            return RunResult::start_failure(
                command,
                runner.non_zero_exit_ok,
                collect(&stdout_buffer, &stderr_buffer, &combined_buffer),
                RunnerError::Start(err.to_string()),
            );
        }
    };

    let pid = child.id();
    let usage_before = children_user_time();

    let stdout_pump = child.stdout.take().map(|pipe| {
        let tee = stream_tee(
            runner
                .echo_stdout
                .then(|| Box::new(io::stdout()) as Box<dyn Write + Send>),
            &stdout_buffer,
            &combined_buffer,
        );
        thread::spawn(move || pump(pipe, tee))
    });
    let stderr_pump = child.stderr.take().map(|pipe| {
        let tee = stream_tee(
            runner
                .echo_stderr
                .then(|| Box::new(io::stderr()) as Box<dyn Write + Send>),
            &stderr_buffer,
            &combined_buffer,
        );
        thread::spawn(move || pump(pipe, tee))
    });

    // The pumps drain the pipes while we block, so a chatty child cannot
    // deadlock against a full pipe.
    let wait = child.wait();

    join_pump(stdout_pump, "stdout");
    join_pump(stderr_pump, "stderr");

    let user_time = user_time_delta(usage_before, children_user_time());
    let captured = collect(&stdout_buffer, &stderr_buffer, &combined_buffer);

    match wait {
        Ok(status) => RunResult::completed(
            command,
            runner.non_zero_exit_ok,
            captured,
            pid,
            status,
            user_time,
        ),
        Err(err) => RunResult::wait_failure(
            command,
            runner.non_zero_exit_ok,
            captured,
            pid,
            RunnerError::Wait(err.to_string()),
            user_time,
        ),
    }
}

/// Assemble the fan-out for one stream: optional console sink first, then
/// the stream's own buffer, then the shared combined buffer.
fn stream_tee(
    console: Option<Box<dyn Write + Send>>,
    stream: &SharedBuffer,
    combined: &SharedBuffer,
) -> TeeWriter {
    let mut tee = TeeWriter::new();
    if let Some(console) = console {
        tee = tee.attach(console);
    }
    tee.attach(Box::new(stream.clone()))
        .attach(Box::new(combined.clone()))
}

/// Copy a pipe into a tee until EOF.
fn pump<R: Read>(mut source: R, mut tee: TeeWriter) -> io::Result<()> {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    loop {
        match source.read(&mut buf) {
            Ok(0) => return tee.flush(),
            Ok(n) => tee.write_all(&buf[..n])?,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

fn join_pump(handle: Option<thread::JoinHandle<io::Result<()>>>, stream: &str) {
    let Some(handle) = handle else {
        return;
    };
    match handle.join() {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(stream, error = %err, "output capture ended early"),
        Err(_) => warn!(stream, "output pump panicked"),
    }
}

fn collect(stdout: &SharedBuffer, stderr: &SharedBuffer, combined: &SharedBuffer) -> Captured {
    Captured {
        stdout: stdout.contents(),
        stderr: stderr.contents(),
        combined: combined.contents(),
    }
}

/// Cumulative user CPU time of reaped children, from getrusage.
///
/// The per-execution time is the delta across one wait, which is only
/// approximate when executions overlap on separate threads.
#[cfg(unix)]
fn children_user_time() -> Option<Duration> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::uninit();
    let rc = unsafe { libc::getrusage(libc::RUSAGE_CHILDREN, usage.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }
    let usage = unsafe { usage.assume_init() };
    let secs = usage.ru_utime.tv_sec.max(0) as u64;
    let micros = usage.ru_utime.tv_usec.max(0) as u32;
    Some(Duration::new(secs, micros * 1000))
}

#[cfg(not(unix))]
fn children_user_time() -> Option<Duration> {
    None
}

fn user_time_delta(before: Option<Duration>, after: Option<Duration>) -> Option<Duration> {
    match (before, after) {
        (Some(before), Some(after)) => Some(after.saturating_sub(before)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pump_copies_until_eof() {
        let buffer = SharedBuffer::new();
        let tee = TeeWriter::new().attach(Box::new(buffer.clone()));

        pump(&b"pumped bytes"[..], tee).unwrap();

        assert_eq!(buffer.contents(), b"pumped bytes");
    }

    #[test]
    fn test_stream_tee_suppressed_has_two_sinks() {
        let stream = SharedBuffer::new();
        let combined = SharedBuffer::new();
        let tee = stream_tee(None, &stream, &combined);
        assert_eq!(tee.sink_count(), 2);
    }

    #[test]
    fn test_stream_tee_echoed_has_three_sinks() {
        let stream = SharedBuffer::new();
        let combined = SharedBuffer::new();
        let tee = stream_tee(Some(Box::new(io::sink())), &stream, &combined);
        assert_eq!(tee.sink_count(), 3);
    }

    #[test]
    fn test_stream_tee_writes_both_buffers() {
        let stream = SharedBuffer::new();
        let combined = SharedBuffer::new();
        let mut tee = stream_tee(None, &stream, &combined);

        tee.write_all(b"data").unwrap();

        assert_eq!(stream.contents(), b"data");
        assert_eq!(combined.contents(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn test_children_user_time_is_readable() {
        assert!(children_user_time().is_some());
    }

    #[test]
    fn test_user_time_delta() {
        let before = Some(Duration::from_millis(10));
        let after = Some(Duration::from_millis(25));
        assert_eq!(user_time_delta(before, after), Some(Duration::from_millis(15)));
        assert_eq!(user_time_delta(None, after), None);
        // A racing sibling execution can make the delta run backwards.
        assert_eq!(user_time_delta(after, before), Some(Duration::ZERO));
    }
}
