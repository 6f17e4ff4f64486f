//! HTTP endpoint checks for the Humansa ML server.
//!
//! This crate provides the check abstraction and the built-in checks:
//!
//! - [`Check`] — Trait for anything the runner can execute
//! - [`HttpCheck`] — One request/response check driven by a [`CheckSpec`]
//! - [`ProbeClient`] — Shared HTTP client
//! - [`default_checks`] — The nine built-in endpoint checks, in run order
//!
//! # Running a single check
//!
//! ```rust,ignore
//! use humansa_checks::{find_spec, Check, CheckContext, HttpCheck};
//! use humansa_core::ProbeConfig;
//!
//! let config = ProbeConfig::default();
//! let ctx = CheckContext::new(config.clone())?;
//! let ping = HttpCheck::new(find_spec(&config, "Ping").unwrap());
//! let outcome = ping.run(&ctx).await?;
//! println!("{}: {}", outcome.message, outcome.passed);
//! ```
//!
//! # Implementing a custom check
//!
//! ```rust,ignore
//! use humansa_checks::{Check, CheckContext};
//! use humansa_core::{CheckOutcome, ProbeError};
//! use async_trait::async_trait;
//!
//! struct AlwaysGreen;
//!
//! #[async_trait]
//! impl Check for AlwaysGreen {
//!     fn name(&self) -> &str { "Always Green" }
//!     async fn run(&self, _ctx: &CheckContext) -> Result<CheckOutcome, ProbeError> {
//!         Ok(CheckOutcome::pass("Nothing to do", "trivially true"))
//!     }
//! }
//! ```

mod catalog;
mod client;
mod inspect;
mod payload;
mod spec;
mod stream;

pub use catalog::{default_checks, default_specs, find_spec};
pub use client::ProbeClient;
pub use inspect::{json_type, truncate};
pub use spec::{CheckSpec, Inspection, Labels, Method};
pub use stream::LineSplitter;

use async_trait::async_trait;
use humansa_core::{CheckOutcome, ProbeConfig, ProbeError};
use tracing::warn;

/// What every check receives when it runs.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub client: ProbeClient,
    pub config: ProbeConfig,
}

impl CheckContext {
    /// Creates a context with a fresh HTTP client.
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        Ok(Self {
            client: ProbeClient::new()?,
            config,
        })
    }
}

/// A named unit of work that yields a pass/fail outcome.
///
/// Implementations should convert their own failures into a failing
/// [`CheckOutcome`]; an `Err` is treated by the runner as an unexpected fault.
#[async_trait]
pub trait Check: Send + Sync {
    /// Name used in the run summary.
    fn name(&self) -> &str;

    /// Title printed in the per-check banner.
    fn title(&self) -> &str {
        self.name()
    }

    /// Executes the check.
    async fn run(&self, ctx: &CheckContext) -> Result<CheckOutcome, ProbeError>;
}

/// A check that sends one HTTP request and judges the response.
#[derive(Debug, Clone)]
pub struct HttpCheck {
    spec: CheckSpec,
}

impl HttpCheck {
    pub fn new(spec: CheckSpec) -> Self {
        Self { spec }
    }

    async fn probe(&self, ctx: &CheckContext) -> Result<CheckOutcome, ProbeError> {
        let spec = &self.spec;
        let url = ctx.config.url(spec.path);

        let response = ctx
            .client
            .send(spec.method, &url, spec.body.as_ref(), spec.timeout)
            .await?;

        let status = response.status().as_u16();
        if !spec.accepts(status) {
            return Ok(CheckOutcome::fail(spec.labels.failed, format!("Status: {}", status)));
        }

        match spec.inspection {
            Inspection::StatusOnly => Ok(CheckOutcome::pass(spec.labels.ok, format!("Status: {}", status))),
            Inspection::Stream => stream::consume(response, &spec.labels).await,
            inspection => {
                let body = response.text().await?;
                inspect::evaluate(inspection, &spec.labels, &body)
            }
        }
    }
}

#[async_trait]
impl Check for HttpCheck {
    fn name(&self) -> &str {
        self.spec.name
    }

    fn title(&self) -> &str {
        self.spec.title
    }

    async fn run(&self, ctx: &CheckContext) -> Result<CheckOutcome, ProbeError> {
        let outcome = self.probe(ctx).await.unwrap_or_else(|e| {
            warn!("{} faulted: {}", self.spec.name, e);
            CheckOutcome::fail(self.spec.labels.error, e.to_string())
        });
        Ok(outcome)
    }
}
