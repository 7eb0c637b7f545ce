//! Capturing third-party output into the tree.
//!
//! A [`CaptureScope`] marks the current thread as capturing and hands out
//! in-memory [`CaptureWriter`]s for standard output and standard error.
//! Third-party code is pointed at those writers by the host environment;
//! anything printed through the tree itself while the scope is active is
//! emitted raw (the thread's captured flag suppresses formatting). When the
//! scope closes, the buffered content is flushed through the print
//! primitive with every captured line as its own branch.
//!
//! Opening sections inside an active capture is unsupported; the scope only
//! isolates the thread that opened it, so sibling threads keep formatting
//! normally.

use std::io;
use std::sync::{Arc, Mutex};

use crate::print::PrintOptions;
use crate::sink::Sink;
use crate::state::{self, TreeState, global};
use crate::sync::lock_recover;

/// An active capture region. Flushes on drop.
#[derive(Debug)]
pub struct CaptureScope<'a> {
    state: &'a TreeState,
    stdout: Arc<Mutex<Vec<u8>>>,
    stderr: Arc<Mutex<Vec<u8>>>,
    stdout_sink: Sink,
    stderr_sink: Sink,
}

/// An `io::Write` handle into a capture buffer.
#[derive(Debug, Clone)]
pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock_recover(&self.0).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TreeState {
    /// Begin capturing on the current thread, flushing to the standard
    /// streams when the scope closes.
    pub fn begin_capture(&self) -> CaptureScope<'_> {
        self.begin_capture_to(Sink::Stdout, Sink::Stderr)
    }

    /// Begin capturing with explicit flush destinations.
    pub fn begin_capture_to(&self, stdout_sink: Sink, stderr_sink: Sink) -> CaptureScope<'_> {
        state::set_captured(true);
        CaptureScope {
            state: self,
            stdout: Arc::new(Mutex::new(Vec::new())),
            stderr: Arc::new(Mutex::new(Vec::new())),
            stdout_sink,
            stderr_sink,
        }
    }
}

impl CaptureScope<'_> {
    /// Writer to hand to third-party code in place of standard output.
    #[must_use]
    pub fn stdout_writer(&self) -> CaptureWriter {
        CaptureWriter(Arc::clone(&self.stdout))
    }

    /// Writer to hand to third-party code in place of standard error.
    #[must_use]
    pub fn stderr_writer(&self) -> CaptureWriter {
        CaptureWriter(Arc::clone(&self.stderr))
    }
}

impl Drop for CaptureScope<'_> {
    fn drop(&mut self) {
        // Clear the flag before flushing so the buffered content goes
        // through normal tree formatting, not the raw capture path.
        state::set_captured(false);

        let stdout_bytes = std::mem::take(&mut *lock_recover(&self.stdout));
        let stderr_bytes = std::mem::take(&mut *lock_recover(&self.stderr));

        let options = PrintOptions::new()
            .with_sink(self.stdout_sink.clone())
            .separate_lines(true);
        self.state
            .print_with(&String::from_utf8_lossy(&stdout_bytes), &options);

        let options = PrintOptions::new()
            .with_sink(self.stderr_sink.clone())
            .separate_lines(true);
        self.state
            .print_with(&String::from_utf8_lossy(&stderr_bytes), &options);
    }
}

/// Run `body` inside a capture region of the process-wide tree.
///
/// The body receives the scope so it can wire the writers into whatever it
/// is about to run.
pub fn acapture<T>(body: impl FnOnce(&CaptureScope<'_>) -> T) -> T {
    let scope = global().begin_capture();
    body(&scope)
}
