//! Concurrent load generator
//!
//! Fires N requests against one endpoint through a shared client, waits for
//! all of them at a single join point, and reports per-slot results plus the
//! total elapsed time.

use std::future::Future;
use std::time::{Duration, Instant};

use futures::future::join_all;
use serde_json::Value;
use tracing::{info, warn};

use crate::{builder::ProbeRequest, error::ProbeError, rpc::RosettaClient};

/// Outcome of one batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One slot per request, in issue order; `None` where the request failed
    pub results: Vec<Option<Value>>,

    /// Wall-clock time for the whole batch
    pub elapsed: Duration,
}

impl BatchReport {
    /// Number of requests issued
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Slots holding a decoded 200 body
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }

    /// Slots left empty by a non-200 status or transport error
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Body of the first request, if that one succeeded
    pub fn first(&self) -> Option<&Value> {
        self.results.first().and_then(Option::as_ref)
    }

    /// Throughput over the whole batch
    ///
    /// # Returns
    ///
    /// * `f64` - Issued requests divided by elapsed seconds, `0.0` for an
    ///   empty batch
    pub fn requests_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if self.is_empty() || secs == 0.0 {
            return 0.0;
        }
        self.len() as f64 / secs
    }
}

/// Run `count` units of work concurrently and collect them by slot
///
/// Every unit is polled on the current task; none is spawned. A failed unit is
/// logged and leaves `None` in its slot without affecting the others.
pub async fn run_batch<F, Fut>(count: usize, unit: F) -> BatchReport
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<Value, ProbeError>>,
{
    let start = Instant::now();

    let slots = (0..count).map(|slot| {
        let fut = unit(slot);
        async move {
            match fut.await {
                Ok(value) => Some(value),
                Err(ProbeError::Status { status, body }) => {
                    warn!(slot, status, "Request failed: {}", body);
                    None
                }
                Err(e) => {
                    warn!(slot, "Request failed: {}", e);
                    None
                }
            }
        }
    });
    let results = join_all(slots).await;

    let report = BatchReport {
        results,
        elapsed: start.elapsed(),
    };
    info!(
        requests = report.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "Batch complete"
    );
    report
}

/// Fire `count` copies of `request` through one pooled client
pub async fn fire(client: &RosettaClient, request: &ProbeRequest, count: usize) -> BatchReport {
    info!(
        requests = count,
        path = request.endpoint.path(),
        "Starting batch"
    );
    run_batch(count, |_| client.post_json(request)).await
}
