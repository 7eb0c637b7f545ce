//! The shared tree state.
//!
//! A [`TreeState`] holds the nesting depth and all rendering configuration.
//! The crate keeps one process-wide instance behind [`global()`] so that
//! independent call sites compose visually into one tree, exactly like the
//! facade functions use it; everything is also available as inherent methods
//! on an explicit `TreeState` so tests (and concurrent callers who want
//! isolation) can thread their own instance.
//!
//! Depth and the boolean switches are plain atomics with relaxed ordering:
//! cross-thread composition is explicitly unsynchronized, and callers who
//! interleave sections from parallel threads get an interleaved tree.

use std::cell::Cell;
use std::io::IsTerminal;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use once_cell::sync::Lazy;

use crate::glyphs::GlyphSet;
use crate::sink::Sink;
use crate::sync::{read_recover, write_recover};
use crate::theme::{ColorToken, Theme, paint};

/// Internal sentinel for "no depth bound".
pub(crate) const UNBOUNDED: usize = usize::MAX;

static GLOBAL: Lazy<TreeState> = Lazy::new(TreeState::detect);

thread_local! {
    /// True while a capture scope is active on this thread.
    static CAPTURED: Cell<bool> = const { Cell::new(false) };
}

/// The process-wide tree state used by the facade functions.
pub fn global() -> &'static TreeState {
    &GLOBAL
}

pub(crate) fn is_captured() -> bool {
    CAPTURED.with(Cell::get)
}

pub(crate) fn set_captured(active: bool) {
    CAPTURED.with(|flag| flag.set(active));
}

/// Nesting depth plus rendering configuration, shared by `&` reference.
#[derive(Debug)]
pub struct TreeState {
    depth: AtomicUsize,
    max_depth: AtomicUsize,
    elapsed_time: AtomicBool,
    passthrough: AtomicBool,
    output_enabled: AtomicBool,
    colorful: AtomicBool,
    glyphs: RwLock<GlyphSet>,
    theme: RwLock<Theme>,
}

impl TreeState {
    /// A state with neutral defaults: unbounded depth, elapsed time on,
    /// coloring off, Unicode glyphs. Intended for isolated/testing use;
    /// the process-wide instance comes from [`TreeState::detect`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            depth: AtomicUsize::new(0),
            max_depth: AtomicUsize::new(UNBOUNDED),
            elapsed_time: AtomicBool::new(true),
            passthrough: AtomicBool::new(false),
            output_enabled: AtomicBool::new(true),
            colorful: AtomicBool::new(false),
            glyphs: RwLock::new(GlyphSet::UNICODE),
            theme: RwLock::new(Theme::default()),
        }
    }

    /// A state configured from the ambient environment: glyphs from the
    /// locale probe, coloring on when stdout is a color-capable terminal.
    #[must_use]
    pub fn detect() -> Self {
        let state = Self::new();
        state.set_glyphs(GlyphSet::detect());
        state.set_colorful(stdout_wants_color());
        state
    }

    // --- depth -----------------------------------------------------------

    /// Current nesting depth (number of open sections on this call path).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    pub(crate) fn increment_depth(&self) {
        self.depth.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrement depth, saturating at zero, and return the new value.
    pub(crate) fn decrement_depth(&self) -> usize {
        let prior = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| {
                Some(d.saturating_sub(1))
            })
            .unwrap_or(0);
        prior.saturating_sub(1)
    }

    // --- configuration ---------------------------------------------------

    /// The maximum visible depth, or `None` when unbounded.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        match self.max_depth.load(Ordering::Relaxed) {
            UNBOUNDED => None,
            bound => Some(bound),
        }
    }

    pub(crate) fn max_depth_raw(&self) -> usize {
        self.max_depth.load(Ordering::Relaxed)
    }

    /// Limit the tree to `visible_levels` levels of sections.
    ///
    /// The argument is 1-indexed ("show this many levels"); internally the
    /// bound is stored 0-indexed, so `0` and `1` both show a single level.
    pub fn set_max_depth(&self, visible_levels: usize) {
        self.max_depth
            .store(visible_levels.saturating_sub(1), Ordering::Relaxed);
    }

    /// Remove the depth bound (the default).
    pub fn set_max_depth_unbounded(&self) {
        self.max_depth.store(UNBOUNDED, Ordering::Relaxed);
    }

    /// Whether sections print elapsed-time footers.
    #[must_use]
    pub fn elapsed_time(&self) -> bool {
        self.elapsed_time.load(Ordering::Relaxed)
    }

    pub fn set_elapsed_time(&self, enabled: bool) {
        self.elapsed_time.store(enabled, Ordering::Relaxed);
    }

    /// When true, all tree formatting is bypassed and printing is raw.
    #[must_use]
    pub fn passthrough(&self) -> bool {
        self.passthrough.load(Ordering::Relaxed)
    }

    pub fn set_passthrough(&self, enabled: bool) {
        self.passthrough.store(enabled, Ordering::Relaxed);
    }

    /// Global kill switch; when false no bytes are written anywhere.
    #[must_use]
    pub fn output_enabled(&self) -> bool {
        self.output_enabled.load(Ordering::Relaxed)
    }

    pub fn set_output_enabled(&self, enabled: bool) {
        self.output_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether output is colorized.
    #[must_use]
    pub fn colorful(&self) -> bool {
        self.colorful.load(Ordering::Relaxed)
    }

    pub fn set_colorful(&self, enabled: bool) {
        self.colorful.store(enabled, Ordering::Relaxed);
    }

    /// The glyph set in use.
    #[must_use]
    pub fn glyphs(&self) -> GlyphSet {
        *read_recover(&self.glyphs)
    }

    pub fn set_glyphs(&self, glyphs: GlyphSet) {
        *write_recover(&self.glyphs) = glyphs;
    }

    /// Force the ASCII (or Unicode) glyph set, overriding detection.
    pub fn set_ascii_glyphs(&self, ascii: bool) {
        self.set_glyphs(if ascii {
            GlyphSet::ASCII
        } else {
            GlyphSet::UNICODE
        });
    }

    /// Snapshot of the active color theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        *read_recover(&self.theme)
    }

    pub fn set_theme(&self, theme: Theme) {
        *write_recover(&self.theme) = theme;
    }

    /// Recolor a single token, from a `#RRGGBB` string.
    ///
    /// Invalid hex leaves the theme unchanged and returns `false`.
    pub fn set_token_hex(&self, token: ColorToken, hex: &str) -> bool {
        write_recover(&self.theme).set_hex(token, hex)
    }

    /// Restore all defaults and zero the depth counter.
    ///
    /// Mainly useful between tests that share the process-wide state.
    pub fn reset(&self) {
        self.depth.store(0, Ordering::Relaxed);
        self.max_depth.store(UNBOUNDED, Ordering::Relaxed);
        self.elapsed_time.store(true, Ordering::Relaxed);
        self.passthrough.store(false, Ordering::Relaxed);
        self.output_enabled.store(true, Ordering::Relaxed);
        self.colorful.store(false, Ordering::Relaxed);
        self.set_glyphs(GlyphSet::UNICODE);
        self.set_theme(Theme::default());
    }

    // --- emission --------------------------------------------------------

    /// Apply the token's color when coloring is on, else pass through.
    #[must_use]
    pub(crate) fn colorize(&self, text: &str, token: ColorToken) -> String {
        if self.colorful() {
            paint(text, self.theme().color(token))
        } else {
            text.to_string()
        }
    }

    /// Write one finished line. The output kill switch lives here, so every
    /// render path is silenced by it.
    pub(crate) fn emit(&self, sink: &Sink, line: &str) {
        if self.output_enabled() {
            sink.write_line(line);
        }
    }

    /// Write raw text with no newline handling (passthrough/capture path).
    pub(crate) fn emit_raw(&self, sink: &Sink, text: &str) {
        if self.output_enabled() {
            sink.write_raw(text);
        }
    }
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new()
    }
}

fn stdout_wants_color() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|value| !value.is_empty()) {
        return false;
    }
    if std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let state = TreeState::new();
        assert_eq!(state.depth(), 0);
        assert_eq!(state.max_depth(), None);
        assert!(state.elapsed_time());
        assert!(!state.passthrough());
        assert!(state.output_enabled());
        assert!(!state.colorful());
    }

    #[test]
    fn test_max_depth_setter_is_one_indexed() {
        let state = TreeState::new();
        state.set_max_depth(4);
        assert_eq!(state.max_depth(), Some(3));
    }

    #[test]
    fn test_max_depth_clamps_at_zero() {
        let state = TreeState::new();
        state.set_max_depth(0);
        assert_eq!(state.max_depth(), Some(0));
        state.set_max_depth(1);
        assert_eq!(state.max_depth(), Some(0));
    }

    #[test]
    fn test_max_depth_unbounded_roundtrip() {
        let state = TreeState::new();
        state.set_max_depth(2);
        state.set_max_depth_unbounded();
        assert_eq!(state.max_depth(), None);
        assert_eq!(state.max_depth_raw(), UNBOUNDED);
    }

    #[test]
    fn test_depth_decrement_saturates() {
        let state = TreeState::new();
        assert_eq!(state.decrement_depth(), 0);
        assert_eq!(state.depth(), 0);
        state.increment_depth();
        state.increment_depth();
        assert_eq!(state.decrement_depth(), 1);
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn test_emit_respects_kill_switch() {
        let state = TreeState::new();
        let (sink, buf) = Sink::buffer();
        state.set_output_enabled(false);
        state.emit(&sink, "hidden");
        state.emit_raw(&sink, "also hidden");
        assert!(buf.lock().unwrap().is_empty());
        state.set_output_enabled(true);
        state.emit(&sink, "visible");
        assert_eq!(buf.lock().unwrap().as_slice(), b"visible\n");
    }

    #[test]
    fn test_colorize_is_identity_when_disabled() {
        let state = TreeState::new();
        assert_eq!(state.colorize("plain", ColorToken::Text), "plain");
        state.set_colorful(true);
        assert_ne!(state.colorize("plain", ColorToken::Text), "plain");
    }

    #[test]
    fn test_set_token_hex() {
        let state = TreeState::new();
        assert!(state.set_token_hex(ColorToken::Section, "#123456"));
        assert!(!state.set_token_hex(ColorToken::Section, "bogus"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let state = TreeState::new();
        state.increment_depth();
        state.set_max_depth(2);
        state.set_passthrough(true);
        state.set_output_enabled(false);
        state.set_ascii_glyphs(true);
        state.reset();
        assert_eq!(state.depth(), 0);
        assert_eq!(state.max_depth(), None);
        assert!(!state.passthrough());
        assert!(state.output_enabled());
        assert_eq!(state.glyphs(), GlyphSet::UNICODE);
    }

    #[test]
    fn test_captured_flag_is_per_thread() {
        set_captured(true);
        assert!(is_captured());
        let handle = std::thread::spawn(|| is_captured());
        assert!(!handle.join().unwrap());
        set_captured(false);
        assert!(!is_captured());
    }
}
