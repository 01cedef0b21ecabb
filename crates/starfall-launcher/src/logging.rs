//! Logging setup using `tracing` and `tracing-subscriber`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter: our crates at info, external crates at warn.
const DEFAULT_FILTER: &str = "warn,starfall_launcher=info,starfall_updater=info";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Logs go to stderr so they never
/// interleave with the status lines and the progress bar on stdout.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
