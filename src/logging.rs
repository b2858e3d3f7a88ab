// 📝 Logging - tracing subscriber shared by both binaries
//
// Diagnostics go to stderr so stdout carries only the console protocol.
// Filter comes from RUST_LOG, defaulting to "warn".

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init: a second call (e.g. from tests) is a no-op, not a panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
