//! Shared logging setup for binaries and integration tests.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide logging with JSON output.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init();
}
