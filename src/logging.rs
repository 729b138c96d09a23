use std::env;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and the
/// default is `info`. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = env::var("RUST_LOG")
        .map_or_else(|_| EnvFilter::new(level), EnvFilter::new);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
