//! `log`-crate bridge.
//!
//! [`TreeLogger`] routes `log` records through the print primitive, so
//! records from libraries using the `log` facade land in the tree at the
//! current section depth instead of tearing through it. This is a rendering
//! bridge only; filtering is whatever `log::LevelFilter` the caller sets.

use crossterm::style::Color;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::OffsetDateTime;
use time::format_description::OwnedFormatItem;

use crate::print::PrintOptions;
use crate::state::{TreeState, global};
use crate::theme::paint;

/// A `log::Log` implementation that prints into the tree.
pub struct TreeLogger {
    level: LevelFilter,
    show_time: bool,
    time_format: OwnedFormatItem,
}

impl TreeLogger {
    /// Create a logger with `Info` filtering and no timestamps.
    #[must_use]
    pub fn new() -> Self {
        let time_format = time::format_description::parse_owned::<2>(
            "[hour]:[minute]:[second]",
        )
        .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            level: LevelFilter::Info,
            show_time: false,
            time_format,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Prefix records with a wall-clock timestamp.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Override the timestamp format (a `time` format description).
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format).unwrap_or_else(|_| now.to_string())
    }

    const fn level_color(level: Level) -> Color {
        match level {
            Level::Trace => Color::DarkGrey,
            Level::Debug => Color::Blue,
            Level::Info => Color::Green,
            Level::Warn => Color::Yellow,
            Level::Error => Color::Red,
        }
    }

    fn format_record(&self, state: &TreeState, record: &Record<'_>) -> String {
        let mut line = String::new();
        if self.show_time {
            line.push_str(&self.format_time());
            line.push(' ');
        }

        let level_name = format!("[{:<5}]", record.level());
        if state.colorful() {
            line.push_str(&paint(&level_name, Self::level_color(record.level())));
        } else {
            line.push_str(&level_name);
        }
        line.push(' ');
        line.push_str(&record.args().to_string());
        line
    }

    fn emit_record(&self, state: &TreeState, record: &Record<'_>, options: &PrintOptions) {
        let line = self.format_record(state, record);
        state.print_with(&line, options);
    }
}

impl Default for TreeLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for TreeLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.emit_record(global(), record, &PrintOptions::new());
    }

    fn flush(&self) {}
}
