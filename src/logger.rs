use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "COUNTRIES_PROBE_LOG";

/// Installs the global tracing subscriber.
///
/// An explicit filter from the environment always wins. Otherwise `verbose`
/// selects `debug`, a disabled `logging.enabled` setting selects `warn`, and
/// the default is `info`.
pub fn init_logging(verbose: bool, enabled: bool) {
    let filter = std::env::var(LOG_ENV_VAR)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_directive(verbose, enabled)),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

const fn default_directive(verbose: bool, enabled: bool) -> &'static str {
    if verbose {
        "debug"
    } else if enabled {
        "info"
    } else {
        "warn"
    }
}
