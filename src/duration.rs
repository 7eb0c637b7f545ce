//! Human-readable elapsed-time formatting.

/// Format an elapsed duration in seconds at a magnitude-appropriate unit.
///
/// Buckets, first match wins: microseconds below 1 ms, milliseconds below
/// 1 s, then seconds, minutes, hours, days. Always two decimal places.
///
/// The function is total: negative input simply formats as a negative
/// value. Callers feed it differences of monotonic timestamps, so that
/// case does not arise in practice.
#[must_use]
pub fn format_elapsed(seconds: f64) -> String {
    if seconds < 0.001 {
        format!("{:.2} microseconds", seconds * 1_000_000.0)
    } else if seconds < 1.0 {
        format!("{:.2} milliseconds", seconds * 1_000.0)
    } else if seconds < 60.0 {
        format!("{seconds:.2} seconds")
    } else if seconds < 3_600.0 {
        format!("{:.2} minutes", seconds / 60.0)
    } else if seconds < 86_400.0 {
        format!("{:.2} hours", seconds / 3_600.0)
    } else {
        format!("{:.2} days", seconds / 86_400.0)
    }
}
