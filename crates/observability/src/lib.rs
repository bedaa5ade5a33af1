//! Tracing and logging (shared setup).

pub use self::tracing::{LOG_FORMAT_ENV, LogFormat, UnknownLogFormat};

/// Initialize process-wide observability with the given output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, output format).
pub mod tracing;
