//! Turning text into glyph-decorated tree lines.
//!
//! All functions here are pure with respect to output: they build finished
//! strings (colorized when the state says so) and leave writing to the
//! caller. The scaffold prefix and the content are colorized independently.

use smallvec::SmallVec;

use crate::state::TreeState;
use crate::theme::ColorToken;

/// Annotation appended to the one line a truncated section still renders.
pub(crate) const TRUNCATION_NOTE: &str = " (log tree truncated here)";

/// Rendered lines for one printed block. Most blocks are a handful of
/// physical lines, so the batch usually stays on the stack.
pub(crate) type RenderedLines = SmallVec<[String; 4]>;

/// Decorate a (possibly multi-line) block of text at the given level.
///
/// Each non-empty physical line gets `vertical × level`, then the branch
/// glyph for the first line (or for every line when `separate_lines` is
/// set) or the vertical glyph for continuations, then a space, then the
/// content. Empty physical lines are suppressed entirely, so blank input
/// renders nothing rather than a bare prefix.
pub(crate) fn render_lines(
    state: &TreeState,
    text: &str,
    level: usize,
    separate_lines: bool,
) -> RenderedLines {
    let glyphs = state.glyphs();
    let mut out = RenderedLines::new();
    for (index, line) in text.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let marker = if index == 0 || separate_lines {
            glyphs.branch
        } else {
            glyphs.vertical
        };
        let prefix = format!("{}{marker}", glyphs.vertical.repeat(level));
        out.push(format!(
            "{} {}",
            state.colorize(&prefix, ColorToken::Scaffold),
            state.colorize(line, ColorToken::Text)
        ));
    }
    out
}

/// The header line opening a section at `depth`.
pub(crate) fn render_section_header(state: &TreeState, header: &str, depth: usize) -> String {
    let glyphs = state.glyphs();
    let scaffold = format!("{}{}", glyphs.vertical.repeat(depth), glyphs.branch_down);
    format!(
        "{} {}",
        state.colorize(&scaffold, ColorToken::Scaffold),
        state.colorize(header, ColorToken::Section)
    )
}

/// The single marker line for a section crossing the truncation boundary.
pub(crate) fn render_truncation(state: &TreeState, header: &str, depth: usize) -> String {
    let glyphs = state.glyphs();
    let scaffold = format!("{}{}=", glyphs.vertical.repeat(depth), glyphs.branch);
    format!(
        "{}{}{}",
        state.colorize(&scaffold, ColorToken::Scaffold),
        state.colorize(&format!(" {header}"), ColorToken::Section),
        state.colorize(TRUNCATION_NOTE, ColorToken::Truncation)
    )
}

/// The elapsed-time footer for a section that sat at `depth`.
pub(crate) fn render_elapsed(state: &TreeState, formatted: &str, depth: usize) -> String {
    let glyphs = state.glyphs();
    let scaffold = format!(
        "{}{}{}",
        glyphs.vertical.repeat(depth + 1),
        glyphs.terminator,
        glyphs.left_arrow
    );
    format!(
        "{} {}",
        state.colorize(&scaffold, ColorToken::Scaffold),
        state.colorize(formatted, ColorToken::Timing)
    )
}

/// The bare line visually closing the branch of a section at `depth`.
pub(crate) fn render_closing(state: &TreeState, depth: usize) -> String {
    let glyphs = state.glyphs();
    state.colorize(&glyphs.vertical.repeat(depth + 1), ColorToken::Scaffold)
}
