//! Logging setup shared by binaries and tests embedding the sales rules.

/// Initialize process-wide logging from the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let format = tracing::LogFormat::from_env().unwrap_or_default();
    tracing::init(format);
}

/// Subscriber configuration (filter, output format).
pub mod tracing;
