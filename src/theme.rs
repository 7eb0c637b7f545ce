//! Color tokens for the tree renderer.
//!
//! Every piece of rendered output is tagged with one of five [`ColorToken`]s;
//! the active [`Theme`] maps tokens to `crossterm` colors. Coloring is a
//! pass-through concern: when a state's `colorful` flag is off, token lookup
//! is skipped entirely and text goes out undecorated.

use crossterm::style::{Color, Stylize};

/// The role a piece of output plays in the rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    /// Printed body text.
    Text,
    /// Tree scaffolding (vertical lines, branch markers).
    Scaffold,
    /// Elapsed-time footers.
    Timing,
    /// Section headers.
    Section,
    /// The truncation annotation.
    Truncation,
}

/// Mapping from [`ColorToken`] to a concrete terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    text: Color,
    scaffold: Color,
    timing: Color,
    section: Color,
    truncation: Color,
}

impl Theme {
    /// Look up the color for a token.
    #[must_use]
    pub const fn color(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Text => self.text,
            ColorToken::Scaffold => self.scaffold,
            ColorToken::Timing => self.timing,
            ColorToken::Section => self.section,
            ColorToken::Truncation => self.truncation,
        }
    }

    /// Replace the color for a token.
    pub fn set_color(&mut self, token: ColorToken, color: Color) {
        match token {
            ColorToken::Text => self.text = color,
            ColorToken::Scaffold => self.scaffold = color,
            ColorToken::Timing => self.timing = color,
            ColorToken::Section => self.section = color,
            ColorToken::Truncation => self.truncation = color,
        }
    }

    /// Replace the color for a token from a `#RRGGBB` string.
    ///
    /// Invalid input leaves the token unchanged and returns `false`.
    pub fn set_hex(&mut self, token: ColorToken, hex: &str) -> bool {
        match parse_hex(hex) {
            Some(color) => {
                self.set_color(token, color);
                true
            }
            None => false,
        }
    }
}

impl Default for Theme {
    /// The original arbol palette.
    fn default() -> Self {
        Self {
            text: Color::Rgb {
                r: 0x2a,
                g: 0x9d,
                b: 0x8f,
            },
            scaffold: Color::Rgb {
                r: 0xe9,
                g: 0xc4,
                b: 0x6a,
            },
            timing: Color::Rgb {
                r: 0x2a,
                g: 0x9d,
                b: 0xaf,
            },
            section: Color::Rgb {
                r: 0xf4,
                g: 0xa2,
                b: 0x61,
            },
            truncation: Color::Rgb {
                r: 0xe7,
                g: 0x6f,
                b: 0x51,
            },
        }
    }
}

/// Wrap `text` in the ANSI escape sequence for `color`.
#[must_use]
pub(crate) fn paint(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string into a color.
#[must_use]
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb { r, g, b })
}
