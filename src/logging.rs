//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_level` when set. A second call leaves the
/// first subscriber in place and prints a warning.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        eprintln!("deskchat: warning: logging already initialized: {e}");
    }
}
