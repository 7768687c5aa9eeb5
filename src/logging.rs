//! Diagnostic logging setup for the binaries.
//!
//! Logs go to stderr so they never mix with protocol replies on stdout. The
//! `RUST_LOG` environment variable overrides the default level.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global fmt subscriber writing to stderr.
pub fn init_logging(default_level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
