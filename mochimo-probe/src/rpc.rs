use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{builder::ProbeRequest, config::ProbeConfig, error::ProbeError};

/// What came back from one POST
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// Raw body text, not assumed to be JSON
    pub body: String,

    /// Wall-clock time from send to fully read body
    pub elapsed: Duration,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Rosetta API client
///
/// Wraps a single pooled `reqwest::Client`; clones share the pool, so one
/// instance can drive any number of concurrent requests.
#[derive(Clone, Debug)]
pub struct RosettaClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RosettaClient {
    /// Create a client for the API at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme, host and port of the API, without a trailing path
    /// * `timeout` - Upper bound for each request, connect through body read
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Create a client from the shared probe configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded configuration; `api_url` and `timeout_secs` are used
    ///
    /// # Returns
    ///
    /// * `Result<Self, ProbeError>` - New client or a configuration error
    pub fn from_config(config: &ProbeConfig) -> Result<Self, ProbeError> {
        Self::new(&config.api_url, config.timeout())
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and hand back whatever the API answered
    ///
    /// Any status, 200 or not, is returned as an [`ApiResponse`]. Only failures
    /// to talk to the API at all are errors; they are not logged here, the
    /// caller decides how to report them.
    ///
    /// # Arguments
    ///
    /// * `request` - Endpoint and JSON payload to send
    ///
    /// # Returns
    ///
    /// * `Result<ApiResponse, ProbeError>` - Status, raw body and timing, or
    ///   `Transport`/`Timeout` if no response arrived
    #[instrument(skip(self, request), fields(path = request.endpoint.path()))]
    pub async fn post(&self, request: &ProbeRequest) -> Result<ApiResponse, ProbeError> {
        let url = format!("{}{}", self.base_url, request.endpoint.path());
        debug!(url = %url, "Sending request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body())
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, self.timeout.as_secs()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, self.timeout.as_secs()))?;
        let elapsed = start.elapsed();

        debug!(status, elapsed_ms = elapsed.as_millis() as u64, "Response received");

        Ok(ApiResponse {
            status,
            body,
            elapsed,
        })
    }

    /// Send one request and decode a 200 body as JSON
    ///
    /// A non-200 status becomes [`ProbeError::Status`].
    pub async fn post_json(&self, request: &ProbeRequest) -> Result<Value, ProbeError> {
        let response = self.post(request).await?;
        if !response.is_ok() {
            return Err(ProbeError::Status {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| ProbeError::Decode(e.to_string()))
    }
}
