//! Sequential check runner for humansa-probe.
//!
//! - [`Runner`] — Executes checks one at a time with a fault boundary and pacing
//! - [`Reporter`] — Observer notified as the run progresses
//! - [`ConsoleReporter`] — Colored terminal output over any [`std::io::Write`]
//!
//! # Example
//!
//! ```rust,ignore
//! use humansa_core::ProbeConfig;
//! use humansa_runner::{ConsoleReporter, Runner};
//!
//! let runner = Runner::with_default_checks(ProbeConfig::default())?;
//! let mut reporter = ConsoleReporter::stdout();
//! let summary = runner.run(&mut reporter).await;
//! std::process::exit(summary.exit_code());
//! ```

mod report;

pub use report::{ConsoleReporter, Reporter, RULE_WIDTH};

use std::any::Any;
use std::io;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Local;
use futures::FutureExt;
use humansa_checks::{default_checks, Check, CheckContext};
use humansa_core::{ProbeConfig, ProbeError, RunSummary, TestResult};
use tracing::{info, warn};

/// Runs an ordered list of checks against one target.
pub struct Runner {
    ctx: CheckContext,
    checks: Vec<Arc<dyn Check>>,
}

impl Runner {
    pub fn new(ctx: CheckContext, checks: Vec<Arc<dyn Check>>) -> Self {
        Self { ctx, checks }
    }

    /// Creates a runner with the nine built-in endpoint checks.
    pub fn with_default_checks(config: ProbeConfig) -> Result<Self, ProbeError> {
        let checks = default_checks(&config);
        Ok(Self::new(CheckContext::new(config)?, checks))
    }

    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    /// Runs every check in order and returns the summary.
    ///
    /// A check that returns `Err` or panics is recorded as failed; the run
    /// always continues to the end of the list.
    pub async fn run(&self, reporter: &mut dyn Reporter) -> RunSummary {
        let pacing = self.ctx.config.pacing;
        emit(reporter.run_started(&self.ctx.config, Local::now()));

        let mut results = Vec::with_capacity(self.checks.len());
        for (index, check) in self.checks.iter().enumerate() {
            if index > 0 && !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }

            emit(reporter.check_started(check.title()));
            let passed = self.run_one(check.as_ref(), reporter).await;
            info!("{}: {}", check.name(), if passed { "passed" } else { "failed" });
            results.push(TestResult::new(check.name(), passed));
        }

        let summary = RunSummary::new(results);
        emit(reporter.run_finished(&summary, Local::now()));
        summary
    }

    async fn run_one(&self, check: &dyn Check, reporter: &mut dyn Reporter) -> bool {
        let attempt = AssertUnwindSafe(check.run(&self.ctx)).catch_unwind().await;

        let error = match attempt {
            Ok(Ok(outcome)) => {
                emit(reporter.check_finished(&outcome));
                return outcome.passed;
            }
            Ok(Err(e)) => e.to_string(),
            Err(panic) => ProbeError::Aborted(panic_message(panic.as_ref())).to_string(),
        };

        warn!("{} raised an unexpected error: {}", check.name(), error);
        emit(reporter.check_faulted(check.name(), &error));
        false
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "panic with non-string payload".to_string()
}

/// Output failures never stop a run.
fn emit(result: io::Result<()>) {
    if let Err(e) = result {
        warn!("Failed to write report output: {}", e);
    }
}
