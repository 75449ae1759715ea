//! Named smoke checks against the live country-data API.
mod assert;
mod catalogue;


use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::CheckError;
use crate::http::ApiClient;
use crate::shutdown::CancelToken;

pub use catalogue::CATALOGUE;

/// Delay between the requests of pacing-sensitive checks.
pub const DEFAULT_SEQUENCE_DELAY: Duration = Duration::from_millis(500);

/// Everything a check needs to run.
pub struct CheckContext<'ctx> {
    pub client: &'ctx ApiClient,
    pub token: &'ctx CancelToken,
    pub sequence_delay: Duration,
}

type CheckFn = fn(&CheckContext<'_>) -> Result<String, CheckError>;

/// A named assertion over one or more API calls.
pub struct Check {
    pub name: &'static str,
    pub description: &'static str,
    run: CheckFn,
}

impl Check {
    pub(crate) const fn new(name: &'static str, description: &'static str, run: CheckFn) -> Self {
        Self {
            name,
            description,
            run,
        }
    }

    /// Runs the check, turning its result into an outcome. Never fails.
    ///
    /// An interrupted check is reported as cancelled, not failed.
    #[must_use]
    pub fn run(&self, ctx: &CheckContext<'_>) -> CheckOutcome {
        let started = Instant::now();
        let result = (self.run)(ctx);
        let elapsed = started.elapsed();
        let (status, message) = match result {
            Ok(message) => {
                info!(check = self.name, "passed: {}", message);
                (CheckStatus::Passed, message)
            }
            Err(err @ CheckError::Cancelled { .. }) => {
                info!(check = self.name, "{}", err);
                (CheckStatus::Cancelled, err.to_string())
            }
            Err(err) => {
                warn!(check = self.name, "failed: {}", err);
                (CheckStatus::Failed, err.to_string())
            }
        };
        CheckOutcome {
            name: self.name,
            status,
            message,
            elapsed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    Cancelled,
}

impl CheckStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CheckStatus::Passed => "PASS",
            CheckStatus::Failed => "FAIL",
            CheckStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
    pub elapsed: Duration,
}

impl CheckOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}

/// Tally of a run. Checks that never started count as not run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub passed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub not_run: usize,
}

impl CheckSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[CheckOutcome], selected: usize) -> Self {
        let mut summary = Self {
            not_run: selected.saturating_sub(outcomes.len()),
            ..Self::default()
        };
        for outcome in outcomes {
            let counter = match outcome.status {
                CheckStatus::Passed => &mut summary.passed,
                CheckStatus::Failed => &mut summary.failed,
                CheckStatus::Cancelled => &mut summary.cancelled,
            };
            *counter = counter.saturating_add(1);
        }
        summary
    }

    #[must_use]
    pub const fn ran(&self) -> usize {
        self.passed
            .saturating_add(self.failed)
            .saturating_add(self.cancelled)
    }
}

#[must_use]
pub fn find(name: &str) -> Option<&'static Check> {
    CATALOGUE.iter().find(|check| check.name == name)
}

/// Resolves check names; an empty selection means the whole catalogue.
///
/// # Errors
///
/// Returns an error naming the first unknown check.
pub fn select<S>(names: &[S]) -> Result<Vec<&'static Check>, CheckError>
where
    S: AsRef<str>,
{
    if names.is_empty() {
        return Ok(CATALOGUE.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            find(name.as_ref()).ok_or_else(|| CheckError::UnknownCheck {
                name: name.as_ref().to_owned(),
            })
        })
        .collect()
}

/// Runs `checks` in order, stopping early once `ctx.token` is cancelled.
#[must_use]
pub fn run_checks(checks: &[&Check], ctx: &CheckContext<'_>) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::with_capacity(checks.len());
    for check in checks {
        if ctx.token.is_cancelled() {
            info!(
                "Checks cancelled after {}/{}",
                outcomes.len(),
                checks.len()
            );
            break;
        }
        outcomes.push(check.run(ctx));
    }
    outcomes
}
