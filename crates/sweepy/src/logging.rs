use std::io::{self, IsTerminal};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr.
///
/// The log level can be controlled via the `level` parameter or the `RUST_LOG`
/// environment variable. Colour is only used when stderr is a terminal.
pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("sweepy={level},sweepy_core={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal())
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init()?;

    tracing::debug!("sweepy logging initialized (level={level})");
    Ok(())
}
