use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::checks::DEFAULT_SEQUENCE_DELAY;
use crate::http::HttpMethod;

use super::parsers::{parse_json_body, parse_path, parse_query_param};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "countries-probe",
    version,
    about = "Test client for the REST Countries API: raw requests, smoke checks, and config inspection."
)]
pub struct ProbeArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Properties file (defaults to $COUNTRIES_PROBE_CONFIG, then ./config.properties)
    #[arg(long = "config", short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Base URL overriding api.base.url
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Send a GET request and print the response
    Get(GetArgs),
    /// Send a request with any supported method
    Request(RequestArgs),
    /// Run smoke checks against the API
    Check(CheckArgs),
    /// Print the resolved configuration
    Config(ConfigArgs),
}

#[derive(Debug, Args, Clone)]
pub struct GetArgs {
    /// Path appended to the base URL (e.g. /alpha/us)
    #[arg(value_parser = parse_path)]
    pub path: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_query_param)]
    pub query: Vec<(String, String)>,

    /// Print only the response body
    #[arg(long = "body-only")]
    pub body_only: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    /// HTTP method
    #[arg(value_enum)]
    pub method: HttpMethod,

    /// Path appended to the base URL
    #[arg(value_parser = parse_path)]
    pub path: String,

    /// JSON request body
    #[arg(long = "data", short = 'd', value_parser = parse_json_body)]
    pub data: Option<serde_json::Value>,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_query_param)]
    pub query: Vec<(String, String)>,

    /// Print only the response body
    #[arg(long = "body-only")]
    pub body_only: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Run only the named check (repeatable)
    #[arg(long = "only")]
    pub only: Vec<String>,

    /// List available checks and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Delay between paced sequential requests, in milliseconds
    #[arg(long = "delay-ms", default_value_t = default_delay_ms())]
    pub delay_ms: u64,
}

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    /// Fail when a typed key holds a malformed value
    #[arg(long = "strict")]
    pub strict: bool,
}

fn default_delay_ms() -> u64 {
    u64::try_from(DEFAULT_SEQUENCE_DELAY.as_millis()).unwrap_or(500)
}
