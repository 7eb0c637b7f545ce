//! The print primitive (`aprint`).
//!
//! Text printed through here lands in the tree at the current depth, with
//! the glyph prefix rendered by [`crate::render`]. Passthrough mode and
//! active capture scopes bypass formatting and emit raw text instead; lines
//! inside a truncated subtree emit nothing.

use crate::render;
use crate::sink::Sink;
use crate::state::{self, TreeState, global};

/// Options controlling one print call.
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Separator joining multiple values in [`TreeState::print_parts`].
    pub sep: String,
    /// String appended after the text.
    pub end: String,
    /// Destination stream.
    pub sink: Sink,
    /// Render every physical line as its own branch rather than as a
    /// continuation of the first.
    pub separate_lines: bool,
}

impl PrintOptions {
    /// Defaults: space separator, newline terminator, standard output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sep: String::from(" "),
            end: String::from("\n"),
            sink: Sink::Stdout,
            separate_lines: false,
        }
    }

    /// Set the separator.
    #[must_use]
    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    /// Set the terminator.
    #[must_use]
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    /// Set the destination.
    #[must_use]
    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }

    /// Render every physical line as its own branch.
    #[must_use]
    pub fn separate_lines(mut self, separate: bool) -> Self {
        self.separate_lines = separate;
        self
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeState {
    /// Print one line of text into the tree at the current depth.
    pub fn print(&self, text: &str) {
        self.print_with(text, &PrintOptions::new());
    }

    /// Print with explicit options.
    pub fn print_with(&self, text: &str, options: &PrintOptions) {
        if self.passthrough() || state::is_captured() {
            let mut raw = String::with_capacity(text.len() + options.end.len());
            raw.push_str(text);
            raw.push_str(&options.end);
            self.emit_raw(&options.sink, &raw);
            return;
        }

        let depth = self.depth();
        let max_depth = self.max_depth_raw();
        if depth > max_depth {
            // Inside a truncated subtree.
            return;
        }

        let level = depth.min(max_depth);
        let mut joined = String::with_capacity(text.len() + options.end.len());
        joined.push_str(text);
        joined.push_str(&options.end);
        for line in render::render_lines(self, &joined, level, options.separate_lines) {
            self.emit(&options.sink, &line);
        }
    }

    /// Join multiple values with `options.sep`, then print the result.
    ///
    /// Zero values join to an empty string, which renders nothing at all.
    pub fn print_parts<I, S>(&self, parts: I, options: &PrintOptions)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|part| part.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&options.sep);
        self.print_with(&joined, options);
    }
}

/// Print into the process-wide tree. The arbol version of `print`.
pub fn aprint(text: impl AsRef<str>) {
    global().print(text.as_ref());
}

/// [`aprint`] with explicit options.
pub fn aprint_with(text: impl AsRef<str>, options: &PrintOptions) {
    global().print_with(text.as_ref(), options);
}

/// Join values with the options' separator, then print into the tree.
pub fn aprint_parts<I, S>(parts: I, options: &PrintOptions)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    global().print_parts(parts, options);
}

/// Deprecated alias for [`aprint`], kept for legacy callers.
#[deprecated(note = "use `aprint` instead")]
pub fn lprint(text: impl AsRef<str>) {
    aprint(text);
}

/// Format-and-print into the process-wide tree.
///
/// `aprint!()` with no arguments prints nothing at all (blank input is
/// suppressed, not rendered as a bare prefix).
#[macro_export]
macro_rules! aprint {
    () => {
        $crate::aprint("")
    };
    ($($arg:tt)*) => {
        $crate::aprint(::std::format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn ascii_state() -> TreeState {
        let state = TreeState::new();
        state.set_ascii_glyphs(true);
        state
    }

    fn contents(buf: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buf.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_print_at_depth_zero() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.print_with("hello", &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "|-> hello\n");
    }

    #[test]
    fn test_print_follows_current_depth() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.increment_depth();
        state.increment_depth();
        state.print_with("deep", &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "|||-> deep\n");
    }

    #[test]
    fn test_blank_input_renders_nothing() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        let options = PrintOptions::new().with_sink(sink);
        state.print_with("", &options);
        state.print_parts(Vec::<&str>::new(), &options);
        assert_eq!(contents(&buf), "");
    }

    #[test]
    fn test_passthrough_emits_exactly_text_plus_end() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.set_passthrough(true);
        state.print_with("x", &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "x\n");
    }

    #[test]
    fn test_passthrough_respects_custom_end() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.set_passthrough(true);
        state.print_with("x", &PrintOptions::new().with_sink(sink).with_end("!"));
        assert_eq!(contents(&buf), "x!");
    }

    #[test]
    fn test_truncated_subtree_prints_nothing() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.set_max_depth(1);
        state.increment_depth();
        state.print_with("hidden", &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "");
    }

    #[test]
    fn test_level_is_clamped_to_max_depth() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        // Bound 0-indexed at 1; printing at depth 1 renders at level 1.
        state.set_max_depth(2);
        state.increment_depth();
        state.print_with("edge", &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "||-> edge\n");
    }

    #[test]
    fn test_kill_switch_silences_print() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.set_output_enabled(false);
        state.print_with("quiet", &PrintOptions::new().with_sink(sink.clone()));
        state.set_passthrough(true);
        state.print_with("still quiet", &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "");
    }

    #[test]
    fn test_print_parts_joins_with_separator() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.print_parts(["a", "b", "c"], &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "|-> a b c\n");
    }

    #[test]
    fn test_print_parts_custom_separator() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.print_parts(
            ["a", "b"],
            &PrintOptions::new().with_sink(sink).with_sep(", "),
        );
        assert_eq!(contents(&buf), "|-> a, b\n");
    }

    #[test]
    fn test_multiline_text_renders_continuations() {
        let state = ascii_state();
        let (sink, buf) = Sink::buffer();
        state.print_with("one\ntwo", &PrintOptions::new().with_sink(sink));
        assert_eq!(contents(&buf), "|-> one\n| two\n");
    }
}
