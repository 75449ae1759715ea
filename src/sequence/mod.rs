//! Paced sequential requests with cooperative cancellation.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::http::ApiClient;
use crate::shutdown::CancelToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Response { status: u16, body_len: usize },
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct SequenceStep {
    pub path: String,
    pub outcome: StepOutcome,
    pub elapsed: Duration,
}

impl SequenceStep {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self.outcome {
            StepOutcome::Response { status, .. } => Some(status),
            StepOutcome::Failed { .. } => None,
        }
    }
}

/// Result of [`run_sequence`]. A cancelled run keeps the steps that finished.
#[derive(Debug, Clone, Default)]
pub struct SequenceReport {
    pub total: usize,
    pub steps: Vec<SequenceStep>,
    pub cancelled: bool,
}

impl SequenceReport {
    #[must_use]
    pub fn completed(&self) -> usize {
        self.steps.len()
    }

    /// True when every planned step ran and answered with a 2xx status.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        !self.cancelled
            && self.steps.len() == self.total
            && self
                .steps
                .iter()
                .all(|step| step.status().is_some_and(|status| (200..300).contains(&status)))
    }
}

/// GETs each path in order, waiting `delay` between consecutive requests.
///
/// The wait observes `token`: cancellation stops the run before the next
/// request and the report is marked cancelled. Transport failures are
/// recorded on the step and do not stop the run.
pub fn run_sequence<P>(
    client: &ApiClient,
    paths: &[P],
    delay: Duration,
    token: &CancelToken,
) -> SequenceReport
where
    P: AsRef<str>,
{
    let mut report = SequenceReport {
        total: paths.len(),
        steps: Vec::with_capacity(paths.len()),
        cancelled: false,
    };

    for (index, path) in paths.iter().enumerate() {
        let cancelled = if index == 0 {
            token.is_cancelled()
        } else {
            token.wait_timeout(delay)
        };
        if cancelled {
            report.cancelled = true;
            info!(
                "Sequence cancelled after {}/{} requests",
                report.completed(),
                report.total
            );
            break;
        }

        let path = path.as_ref();
        let started = Instant::now();
        let outcome = match client.get(path) {
            Ok(response) => StepOutcome::Response {
                status: response.status_code(),
                body_len: response.body().len(),
            },
            Err(err) => {
                warn!("Sequence request to {} failed: {}", path, err);
                StepOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };
        report.steps.push(SequenceStep {
            path: path.to_owned(),
            outcome,
            elapsed: started.elapsed(),
        });
    }

    report
}
