//! Tracing/logging setup shared by every binary and test harness.

/// Log output configuration.
pub mod tracing;

pub use tracing::{LogFormat, LogSettings};

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&LogSettings::from_env());
}
