//! Scoped sections: the nodes of the tree.
//!
//! A [`Section`] brackets a unit of work. Opening one prints the header (or
//! the truncation marker at the visibility boundary) and bumps the shared
//! depth; closing it restores the depth and prints the elapsed-time footer
//! and the closing glyph. Exit bookkeeping runs exactly once and runs even
//! when the body fails: an `Err` propagates only after the footer has been
//! rendered, and a panic triggers the same bookkeeping from `Drop` while
//! unwinding. The tree therefore stays well-formed up through the point of
//! failure.

use std::time::Instant;

use crate::duration::format_elapsed;
use crate::render;
use crate::sink::Sink;
use crate::state::{TreeState, global};

/// An open section. Closing (explicitly or by drop) restores the depth and
/// renders the footer. Sections nest strictly: a guard's lifetime must stay
/// within its parent's, which the borrow on [`TreeState`] cannot enforce
/// across call boundaries but every structured use (closures, stack
/// variables) gets for free.
#[derive(Debug)]
pub struct Section<'a> {
    state: &'a TreeState,
    sink: Sink,
    start: Instant,
    closed: bool,
}

impl TreeState {
    /// Open a section printing to standard output.
    pub fn open_section(&self, header: &str) -> Section<'_> {
        self.open_section_to(header, Sink::Stdout)
    }

    /// Open a section printing to an explicit sink.
    pub fn open_section_to(&self, header: &str, sink: Sink) -> Section<'_> {
        let depth = self.depth();
        let max_depth = self.max_depth_raw();
        if depth < max_depth {
            let line = render::render_section_header(self, header, depth);
            self.emit(&sink, &line);
        } else if depth == max_depth {
            // Exactly the first excluded level: one marker, once.
            let line = render::render_truncation(self, header, depth);
            self.emit(&sink, &line);
        }
        // Strictly deeper levels render nothing at entry.

        self.increment_depth();
        Section {
            state: self,
            sink,
            start: Instant::now(),
            closed: false,
        }
    }

    /// Run `body` inside a section, returning its result.
    ///
    /// The footer is rendered before the result (including an `Err`) is
    /// handed back, and the depth is restored even if `body` panics.
    pub fn section<T>(&self, header: &str, body: impl FnOnce() -> T) -> T {
        self.section_to(header, Sink::Stdout, body)
    }

    /// [`TreeState::section`] with an explicit sink.
    pub fn section_to<T>(&self, header: &str, sink: Sink, body: impl FnOnce() -> T) -> T {
        let guard = self.open_section_to(header, sink);
        let result = body();
        guard.close();
        result
    }
}

impl Section<'_> {
    /// Close the section now instead of at end of scope.
    pub fn close(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let depth = self.state.decrement_depth();
        // Sections whose own level is within the bound get a footer; this
        // includes the truncation-boundary level itself.
        if depth <= self.state.max_depth_raw() {
            if self.state.elapsed_time() {
                let elapsed = self.start.elapsed().as_secs_f64();
                let line = render::render_elapsed(self.state, &format_elapsed(elapsed), depth);
                self.state.emit(&self.sink, &line);
            }
            let line = render::render_closing(self.state, depth);
            self.state.emit(&self.sink, &line);
        }
    }
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Run `body` inside a section of the process-wide tree.
pub fn asection<T>(header: &str, body: impl FnOnce() -> T) -> T {
    global().section(header, body)
}

/// [`asection`] with an explicit sink.
pub fn asection_to<T>(header: &str, sink: Sink, body: impl FnOnce() -> T) -> T {
    global().section_to(header, sink, body)
}

/// Wrap a function so that every call runs inside its own section.
///
/// The functional equivalent of the original decorator: the wrapper forwards
/// the argument and return value unchanged. Multi-argument functions can be
/// wrapped through a tuple.
pub fn sectioned<A, R, F>(header: impl Into<String>, mut body: F) -> impl FnMut(A) -> R
where
    F: FnMut(A) -> R,
{
    let header = header.into();
    move |arg| global().section(&header, || body(arg))
}

/// Deprecated alias for [`asection`], kept for legacy callers.
#[deprecated(note = "use `asection` instead")]
pub fn lsection<T>(header: &str, body: impl FnOnce() -> T) -> T {
    asection(header, body)
}
