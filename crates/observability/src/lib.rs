//! Process-wide tracing/logging setup.

/// Tracing subscriber configuration (filter + output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize logging from the environment (`RUST_LOG`, `LOG_FORMAT`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(LogFormat::from_env());
}
