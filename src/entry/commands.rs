use std::time::Duration;

use crate::args::{CheckArgs, ConfigArgs, GetArgs, RequestArgs};
use crate::checks::{self, CATALOGUE, CheckContext, CheckSummary};
use crate::config::{Settings, keys};
use crate::error::{AppError, AppResult};
use crate::http::{ApiClient, ApiResponse, QueryParams, RequestSpec};
use crate::shutdown::CancelToken;
use crate::shutdown_handlers::setup_signal_cancel_handler;

pub(super) fn get(client: &ApiClient, args: &GetArgs) -> AppResult<()> {
    let query: QueryParams = args.query.iter().cloned().collect();
    let response = client.get_with_query(&args.path, &query)?;
    print_response(&response, args.body_only);
    Ok(())
}

pub(super) fn request(client: &ApiClient, args: &RequestArgs) -> AppResult<()> {
    let query: QueryParams = args.query.iter().cloned().collect();
    let spec = RequestSpec::new(args.method, &args.path).with_query(&query);
    let spec = match args.data.as_ref() {
        Some(body) => spec.with_body(body),
        None => spec,
    };
    let response = client.execute(&spec)?;
    print_response(&response, args.body_only);
    Ok(())
}

pub(super) fn check(client: &ApiClient, args: &CheckArgs) -> AppResult<()> {
    if args.list {
        for check in CATALOGUE {
            println!("{:<24} {}", check.name, check.description);
        }
        return Ok(());
    }

    let selected = checks::select(&args.only)?;
    let token = CancelToken::new();
    setup_signal_cancel_handler(&token);
    let ctx = CheckContext {
        client,
        token: &token,
        sequence_delay: Duration::from_millis(args.delay_ms),
    };

    let outcomes = checks::run_checks(&selected, &ctx);
    for outcome in &outcomes {
        println!(
            "{:<9} {:<24} {:>6} ms  {}",
            outcome.status.label(),
            outcome.name,
            outcome.elapsed.as_millis(),
            outcome.message
        );
    }

    let summary = CheckSummary::from_outcomes(&outcomes, selected.len());
    println!();
    println!(
        "{} passed, {} failed, {} cancelled, {} not run",
        summary.passed, summary.failed, summary.cancelled, summary.not_run
    );
    if token.is_cancelled() {
        println!(
            "Cancelled after {}/{} checks.",
            summary.ran(),
            selected.len()
        );
    }

    if summary.failed > 0 {
        return Err(AppError::ChecksFailed {
            failed: summary.failed,
            total: summary.ran(),
        });
    }
    Ok(())
}

pub(super) fn print_config(settings: &Settings, args: &ConfigArgs) -> AppResult<()> {
    if args.strict {
        settings.validate()?;
    }

    println!("source: {}", settings.source());
    println!("{} = {}", keys::BASE_URL, settings.base_url());
    println!("{} = {}", keys::ENVIRONMENT, settings.environment());
    println!(
        "{} = {}",
        keys::REQUEST_TIMEOUT_MS,
        settings.request_timeout_ms()
    );
    println!("{} = {}", keys::MAX_RETRIES, settings.max_retries());
    println!("{} = {}", keys::LOGGING_ENABLED, settings.logging_enabled());

    let known = [
        keys::BASE_URL,
        keys::ENVIRONMENT,
        keys::REQUEST_TIMEOUT_MS,
        keys::MAX_RETRIES,
        keys::LOGGING_ENABLED,
    ];
    for (key, value) in settings.iter().filter(|(key, _)| !known.contains(key)) {
        println!("{} = {}", key, value);
    }
    Ok(())
}

fn print_response(response: &ApiResponse, body_only: bool) {
    if !body_only {
        println!("{} {}", response.status(), response.url());
        for (name, value) in response.headers() {
            println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }
        println!();
    }
    println!("{}", response.text());
}
