use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Compact human-readable logs on stderr, so stdout stays parseable.
pub fn init(verbose: bool) {
    let default = if verbose {
        "weather_core=debug,weather_cli=debug,info"
    } else {
        "weather_core=info,weather_cli=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
