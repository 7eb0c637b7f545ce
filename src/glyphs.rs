//! Tree-drawing glyphs.
//!
//! The tree scaffolding is drawn from a fixed set of five glyphs. Terminals
//! with a UTF-8 locale get Unicode box-drawing characters; everything else
//! falls back to an ASCII approximation. The set is resolved once when a
//! [`crate::state::TreeState`] is constructed and is immutable thereafter.

/// The characters used to draw tree branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    /// Vertical continuation line, repeated once per nesting level.
    pub vertical: &'static str,
    /// Branch marker for the first physical line of a printed block.
    pub branch: &'static str,
    /// Marker opening a new section one level down.
    pub branch_down: &'static str,
    /// Branch terminator, prefixes the elapsed-time footer.
    pub terminator: &'static str,
    /// Arrow pointing back at the terminated branch.
    pub left_arrow: &'static str,
}

impl GlyphSet {
    /// Unicode box-drawing variant.
    pub const UNICODE: Self = Self {
        vertical: "\u{2502}",     // │
        branch: "\u{251c}",       // ├
        branch_down: "\u{251c}\u{2557}", // ├╗
        terminator: "\u{2534}",   // ┴
        left_arrow: "\u{ab}",     // «
    };

    /// ASCII fallback for terminals that cannot render box drawing.
    pub const ASCII: Self = Self {
        vertical: "|",
        branch: "|->",
        branch_down: "|\\",
        terminator: "-",
        left_arrow: "<<",
    };

    /// Pick a glyph set from the ambient locale/encoding capability.
    ///
    /// UTF-8 locales get [`GlyphSet::UNICODE`]; anything else (including an
    /// unset locale and the legacy Windows console) gets [`GlyphSet::ASCII`].
    #[must_use]
    pub fn detect() -> Self {
        detect_with(&read_locale_settings())
    }
}

struct LocaleSettings {
    lc_all: Option<String>,
    lc_ctype: Option<String>,
    lang: Option<String>,
    #[cfg(windows)]
    wt_session: Option<String>,
}

fn read_locale_settings() -> LocaleSettings {
    LocaleSettings {
        lc_all: std::env::var("LC_ALL").ok(),
        lc_ctype: std::env::var("LC_CTYPE").ok(),
        lang: std::env::var("LANG").ok(),
        #[cfg(windows)]
        wt_session: std::env::var("WT_SESSION").ok(),
    }
}

fn detect_with(locale: &LocaleSettings) -> GlyphSet {
    #[cfg(windows)]
    {
        // Windows Terminal renders box drawing fine; the legacy console does not.
        return if locale.wt_session.is_some() {
            GlyphSet::UNICODE
        } else {
            GlyphSet::ASCII
        };
    }

    #[cfg(not(windows))]
    {
        // POSIX precedence: LC_ALL overrides LC_CTYPE overrides LANG.
        let encoding = locale
            .lc_all
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| locale.lc_ctype.as_deref().filter(|value| !value.is_empty()))
            .or_else(|| locale.lang.as_deref().filter(|value| !value.is_empty()))
            .unwrap_or("");

        let encoding = encoding.to_lowercase();
        if encoding.contains("utf-8") || encoding.contains("utf8") {
            GlyphSet::UNICODE
        } else {
            GlyphSet::ASCII
        }
    }
}
