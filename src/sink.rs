//! Output destinations.
//!
//! Every print and section operation takes a [`Sink`]; the default is the
//! process's standard output. The in-memory buffer variant backs tests and
//! capture flushing.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::sync::lock_recover;

/// Where rendered lines go.
#[derive(Debug, Clone, Default)]
pub enum Sink {
    /// The process's standard output.
    #[default]
    Stdout,
    /// The process's standard error.
    Stderr,
    /// An in-memory byte buffer.
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl Sink {
    /// Create a buffer sink together with a handle to read it back.
    #[must_use]
    pub fn buffer() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self::Buffer(Arc::clone(&buf)), buf)
    }

    /// Write `text` followed by a newline.
    ///
    /// # Panics
    ///
    /// Panics if the underlying stream write fails; a console formatter has
    /// no way to report the failure anywhere else.
    pub(crate) fn write_line(&self, text: &str) {
        self.write_raw(text);
        self.write_raw("\n");
    }

    /// Write `text` exactly as given, no newline appended.
    pub(crate) fn write_raw(&self, text: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes())
                    .and_then(|()| out.flush())
                    .expect("failed to write to stdout");
            }
            Self::Stderr => {
                let mut err = std::io::stderr().lock();
                err.write_all(text.as_bytes())
                    .and_then(|()| err.flush())
                    .expect("failed to write to stderr");
            }
            Self::Buffer(buf) => {
                lock_recover(buf).extend_from_slice(text.as_bytes());
            }
        }
    }
}
