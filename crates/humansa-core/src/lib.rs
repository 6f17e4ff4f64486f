//! Core domain types and error definitions for humansa-probe.
//!
//! This crate provides the types shared by the check and runner crates:
//!
//! - [`ProbeConfig`] — Target host, synthetic identifiers and pacing
//! - [`CheckOutcome`] and [`Milestone`] — What a single check observed
//! - [`TestResult`] and [`RunSummary`] — Per-run bookkeeping
//! - [`ProbeError`] and [`ConfigError`] — Error types
//!
//! # Example
//!
//! ```rust
//! use humansa_core::{RunSummary, TestResult};
//!
//! let summary = RunSummary::new(vec![
//!     TestResult::new("Health Check", true),
//!     TestResult::new("Ping", false),
//! ]);
//!
//! assert_eq!(summary.passed(), 1);
//! assert_eq!(summary.failed(), 1);
//! assert_eq!(summary.exit_code(), 1);
//! ```

mod config;

pub use config::{ProbeConfig, DEFAULT_BASE_URL, DEFAULT_CONVERSATION_ID, DEFAULT_PACING, DEFAULT_USER_ID};

use thiserror::Error;

/// Errors that can occur while probing an endpoint.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),

    /// Response body was not valid JSON.
    #[error("Failed to parse response body: {0}")]
    Parse(String),

    /// Response body parsed but did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// A check aborted outside of its own error handling.
    #[error("Check aborted: {0}")]
    Aborted(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::Parse(err.to_string())
    }
}

/// Errors raised while building a [`ProbeConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Base URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// An environment override could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// An intermediate passing line reported before a check's final outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub message: String,
    pub detail: Option<String>,
}

/// What a single check observed.
///
/// `message` is the headline ("Ping successful"), `detail` the optional
/// supporting text (body excerpt, status code or error text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub passed: bool,
    pub message: String,
    pub detail: Option<String>,
    pub milestones: Vec<Milestone>,
}

impl CheckOutcome {
    /// Creates a passing outcome with a detail line.
    pub fn pass(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            detail: Some(detail.into()),
            milestones: Vec::new(),
        }
    }

    /// Creates a failing outcome with a detail line.
    pub fn fail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            detail: Some(detail.into()),
            milestones: Vec::new(),
        }
    }

    /// Creates a failing outcome without a detail line.
    pub fn fail_bare(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            detail: None,
            milestones: Vec::new(),
        }
    }

    /// Attaches milestones that preceded this outcome.
    pub fn with_milestones(mut self, milestones: Vec<Milestone>) -> Self {
        self.milestones = milestones;
        self
    }
}

/// The recorded result of one check in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
}

impl TestResult {
    pub fn new(name: impl Into<String>, passed: bool) -> Self {
        Self { name: name.into(), passed }
    }
}

/// Aggregate view over the results of a run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    results: Vec<TestResult>,
}

impl RunSummary {
    pub fn new(results: Vec<TestResult>) -> Self {
        Self { results }
    }

    /// Results in the order the checks were defined.
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// Returns `true` if every recorded result passed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit code: 0 when every check passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}
