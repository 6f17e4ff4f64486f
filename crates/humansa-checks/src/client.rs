//! Thin reqwest wrapper that sends one check request and logs the exchange.

use std::time::{Duration, Instant};

use humansa_core::ProbeError;
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use crate::spec::Method;

const USER_AGENT: &str = concat!("humansa-probe/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by every check in a run.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// Creates a client with connection pooling and the probe user agent.
    pub fn new() -> Result<Self, ProbeError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Sends a request and returns the response without inspecting its status.
    ///
    /// `timeout` bounds the whole exchange, including reading the body.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
        timeout: Duration,
    ) -> Result<Response, ProbeError> {
        let start = Instant::now();
        debug!("{} {} (timeout {}s)", method, url, timeout.as_secs());

        let request = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        let request = match body {
            Some(json) => request.json(json),
            None => request,
        };

        let response = request.timeout(timeout).send().await.map_err(|e| {
            warn!("{} {} failed after {}ms: {}", method, url, start.elapsed().as_millis(), e);
            ProbeError::from(e)
        })?;

        info!(
            "{} {} -> {} in {}ms",
            method,
            url,
            response.status().as_u16(),
            start.elapsed().as_millis()
        );

        Ok(response)
    }
}
