//! # arbol_rust
//!
//! A Rust port of Python's arbol library for arborescent (hierarchical)
//! console output.
//!
//! Program output is organised into nested, named *sections*; each section
//! renders as one tree node with a header, its nested content, and an
//! elapsed-time footer, so a linear stream of lines visually follows the
//! structure of the code that produced it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use arbol_rust::{aprint, asection};
//!
//! asection("loading", || {
//!     aprint!("reading {} records", 42);
//!     asection("parsing", || {
//!         aprint("done");
//!     });
//! });
//! ```
//!
//! ## Core Concepts
//!
//! - **`TreeState`**: nesting depth plus rendering configuration; a
//!   process-wide instance backs the facade functions, and explicit
//!   instances give tests and concurrent callers isolation
//! - **Section**: a scoped unit of work rendered as one tree node; exit
//!   bookkeeping (depth, footer) runs even when the body fails
//! - **`aprint`**: the tree-aware print primitive
//! - **Capture**: temporarily folds third-party stdout/stderr into the tree

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub mod duration;
pub mod glyphs;
pub mod logging;
pub mod print;
pub mod render;
pub mod section;
pub mod sink;
pub mod state;
pub mod sync;
pub mod theme;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::capture::{CaptureScope, CaptureWriter, acapture};
    pub use crate::duration::format_elapsed;
    pub use crate::glyphs::GlyphSet;
    pub use crate::logging::TreeLogger;
    pub use crate::print::{PrintOptions, aprint, aprint_parts, aprint_with};
    pub use crate::section::{Section, asection, asection_to, sectioned};
    pub use crate::sink::Sink;
    pub use crate::state::{TreeState, global};
    pub use crate::theme::{ColorToken, Theme};
}

// Re-export the main surface at the crate root
pub use capture::{CaptureScope, CaptureWriter, acapture};
pub use glyphs::GlyphSet;
pub use print::{PrintOptions, aprint, aprint_parts, aprint_with};
pub use section::{Section, asection, asection_to, sectioned};
pub use sink::Sink;
pub use state::{TreeState, global};
pub use theme::{ColorToken, Theme};

#[allow(deprecated)]
pub use print::lprint;
#[allow(deprecated)]
pub use section::lsection;
