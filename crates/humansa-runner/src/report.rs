//! Run progress reporting and the colored console adapter.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use colored::Colorize;
use humansa_core::{CheckOutcome, ProbeConfig, RunSummary};

/// Width of the `=` rules around banners.
pub const RULE_WIDTH: usize = 60;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Observer for run progress.
///
/// The runner calls these in order: `run_started`, then `check_started`
/// followed by `check_finished` or `check_faulted` for each check, then
/// `run_finished`.
pub trait Reporter {
    fn run_started(&mut self, config: &ProbeConfig, at: DateTime<Local>) -> io::Result<()>;

    fn check_started(&mut self, title: &str) -> io::Result<()>;

    fn check_finished(&mut self, outcome: &CheckOutcome) -> io::Result<()>;

    /// A check returned an error or panicked instead of producing an outcome.
    fn check_faulted(&mut self, name: &str, error: &str) -> io::Result<()>;

    fn run_finished(&mut self, summary: &RunSummary, at: DateTime<Local>) -> io::Result<()>;
}

/// Writes the human-readable, colored report to any writer.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn banner(&mut self, lines: &[String]) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out)?;
        writeln!(self.out, "{}", rule.bright_blue())?;
        for line in lines {
            writeln!(self.out, "{}", line.bright_blue())?;
        }
        writeln!(self.out, "{}", rule.bright_blue())
    }

    fn result_line(&mut self, passed: bool, message: &str, detail: Option<&str>) -> io::Result<()> {
        if passed {
            writeln!(self.out, "{}", format!("✓ {}", message).bright_green())?;
        } else {
            writeln!(self.out, "{}", format!("✗ {}", message).bright_red())?;
        }
        if let Some(detail) = detail.filter(|d| !d.is_empty()) {
            writeln!(self.out, "  {}", format!("Details: {}", detail).bright_yellow())?;
        }
        Ok(())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self, config: &ProbeConfig, at: DateTime<Local>) -> io::Result<()> {
        self.banner(&[
            "Humansa ML Server Endpoint Testing".to_string(),
            format!("Target: {}", config.base_url),
            format!("Started: {}", at.format(TIMESTAMP_FORMAT)),
        ])?;
        self.out.flush()
    }

    fn check_started(&mut self, title: &str) -> io::Result<()> {
        self.banner(&[format!("Testing: {}", title)])?;
        self.out.flush()
    }

    fn check_finished(&mut self, outcome: &CheckOutcome) -> io::Result<()> {
        for milestone in &outcome.milestones {
            self.result_line(true, &milestone.message, milestone.detail.as_deref())?;
        }
        self.result_line(outcome.passed, &outcome.message, outcome.detail.as_deref())?;
        self.out.flush()
    }

    fn check_faulted(&mut self, name: &str, error: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format!("Unexpected error in {}: {}", name, error).bright_red())?;
        self.out.flush()
    }

    fn run_finished(&mut self, summary: &RunSummary, at: DateTime<Local>) -> io::Result<()> {
        self.banner(&["Test Summary".to_string()])?;

        for result in summary.results() {
            let status = if result.passed {
                "PASSED".bright_green()
            } else {
                "FAILED".bright_red()
            };
            writeln!(self.out, "  {}: {}", result.name, status)?;
        }

        writeln!(self.out)?;
        writeln!(
            self.out,
            "{}{}, {}",
            "Results: ".bright_blue(),
            format!("{} passed", summary.passed()).bright_green(),
            format!("{} failed", summary.failed()).bright_red()
        )?;
        writeln!(
            self.out,
            "{}",
            format!("Completed: {}", at.format(TIMESTAMP_FORMAT)).bright_blue()
        )?;
        self.out.flush()
    }
}
