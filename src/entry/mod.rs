mod commands;

use clap::Parser;
use tracing::{debug, warn};

use crate::args::{Command, ProbeArgs};
use crate::config::Settings;
use crate::error::AppResult;
use crate::http::ApiClient;

/// Parses the CLI, resolves settings, installs logging and dispatches.
///
/// # Errors
///
/// Returns an error when a command fails or any selected check fails.
pub fn run() -> AppResult<()> {
    let args = ProbeArgs::parse();
    let settings = Settings::load(args.config.as_deref());

    crate::logger::init_logging(args.verbose, settings.logging_enabled());
    for problem in settings.diagnostics() {
        warn!("{}; using defaults", problem);
    }
    debug!(
        source = %settings.source(),
        environment = settings.environment(),
        "Resolved configuration"
    );

    match &args.command {
        Command::Config(config) => commands::print_config(&settings, config),
        Command::Get(get) => commands::get(&build_client(&settings, &args)?, get),
        Command::Request(request) => commands::request(&build_client(&settings, &args)?, request),
        Command::Check(check) => commands::check(&build_client(&settings, &args)?, check),
    }
}

fn build_client(settings: &Settings, args: &ProbeArgs) -> AppResult<ApiClient> {
    match args.base_url.as_deref() {
        Some(base_url) => ApiClient::with_base_url(settings, base_url),
        None => ApiClient::new(settings),
    }
}
