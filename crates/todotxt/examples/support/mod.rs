//! Shared setup for the demo programs.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Send codec logs to stderr so the todo.txt output on stdout stays clean.
///
/// `RUST_LOG` wins over `default_level`, e.g. `RUST_LOG=todotxt=trace` to see
/// each parsed line.
pub fn init_logging(default_level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
