//! Integration tests for the concurrent load generator against a stub API

use std::io::Write;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tempfile::tempdir;
use tracing_subscriber::EnvFilter;

use mochimo_probe::{builder::RequestBuilder, load, rpc::RosettaClient, sink};

#[path = "../probe_tests/helpers.rs"]
mod helpers;
use helpers::{spawn_stub_api, BROKEN_ADDRESS};

static INIT: Once = Once::new();

/// Initializes the global logger (only once).
pub fn init_logger() {
    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive("mochimo_probe=info".parse().unwrap())
            .add_directive("actix_web=error".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Collects formatted log lines for assertions
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn lines_containing(&self, needle: &str) -> usize {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route this thread's crate logs at `level` and above into a buffer
fn capture_logs(level: tracing::Level) -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("mochimo_probe={level}")))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

/// Base URL of a port nothing listens on
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

const ADDRESS: &str = "0x22581339fdaed9c4942edc58a17ef9b6f03f9a13";

fn client(url: &str) -> RosettaClient {
    RosettaClient::new(url, Duration::from_secs(10)).unwrap()
}

#[actix_web::test]
async fn test_batch_all_succeed_and_first_is_saved() {
    init_logger();
    let (url, state, server) = spawn_stub_api();
    let dir = tempdir().unwrap();
    let path = dir.path().join("balance_output.json");

    let request = RequestBuilder::default().account_balance(ADDRESS);
    let report = load::fire(&client(&url), &request, 50).await;

    assert_eq!(report.len(), 50);
    assert_eq!(report.succeeded(), 50);
    assert_eq!(state.balance_calls(), 50);
    assert!(report.elapsed > Duration::ZERO);

    let first = report.first().expect("first slot should succeed");
    sink::persist(&path, first).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["balances"][0]["value"], "1000");

    server.stop(true).await;
}

#[actix_web::test]
async fn test_batch_partial_failures_do_not_abort() {
    init_logger();
    let (url, state, server) = spawn_stub_api();
    state.fail_every.store(5, Ordering::SeqCst);

    let request = RequestBuilder::default().account_balance(ADDRESS);
    let report = load::fire(&client(&url), &request, 20).await;

    assert_eq!(report.len(), 20);
    assert_eq!(report.failed(), 4);
    assert_eq!(report.succeeded(), 16);
    assert_eq!(state.balance_calls(), 20);

    server.stop(true).await;
}

#[actix_web::test]
async fn test_batch_of_api_errors_yields_no_first_result() {
    init_logger();
    let (url, _state, server) = spawn_stub_api();

    let request = RequestBuilder::default().account_balance(BROKEN_ADDRESS);
    let report = load::fire(&client(&url), &request, 5).await;

    assert_eq!(report.len(), 5);
    assert_eq!(report.failed(), 5);
    assert!(report.first().is_none());

    server.stop(true).await;
}

#[actix_web::test]
async fn test_empty_batch_sends_nothing() {
    init_logger();
    let (url, state, server) = spawn_stub_api();

    let request = RequestBuilder::default().account_balance(ADDRESS);
    let report = load::fire(&client(&url), &request, 0).await;

    assert!(report.is_empty());
    assert_eq!(state.balance_calls(), 0);
    assert!(state.received().is_empty());

    server.stop(true).await;
}

#[actix_web::test]
async fn test_timed_out_requests_leave_empty_slots() {
    init_logger();
    let (url, state, server) = spawn_stub_api();
    state.delay_ms.store(3_000, Ordering::SeqCst);

    let client = RosettaClient::new(&url, Duration::from_secs(1)).unwrap();
    let request = RequestBuilder::default().account_balance(ADDRESS);
    let report = load::fire(&client, &request, 3).await;

    assert_eq!(report.len(), 3);
    assert!(report.results.iter().all(Option::is_none));
    assert!(report.first().is_none());
    // Bounded by the client timeout, not the stub delay
    assert!(report.elapsed < Duration::from_secs(3));

    server.stop(false).await;
}

#[actix_web::test]
async fn test_successful_batch_logs_only_the_summary_at_info() {
    let (url, _state, server) = spawn_stub_api();
    let (logs, _guard) = capture_logs(tracing::Level::INFO);

    let request = RequestBuilder::default().account_balance(ADDRESS);
    let report = load::fire(&client(&url), &request, 25).await;
    assert_eq!(report.succeeded(), 25);

    assert_eq!(logs.lines_containing("Response received"), 0);
    assert_eq!(logs.lines_containing("Batch complete"), 1);

    server.stop(true).await;
}

#[actix_web::test]
async fn test_transport_failure_is_logged_once_per_slot() {
    let (logs, _guard) = capture_logs(tracing::Level::TRACE);

    let client = RosettaClient::new(&refused_url(), Duration::from_secs(2)).unwrap();
    let request = RequestBuilder::default().account_balance(ADDRESS);
    let report = load::fire(&client, &request, 3).await;
    assert_eq!(report.failed(), 3);

    assert_eq!(logs.lines_containing("Request failed"), 3);
    assert_eq!(logs.lines_containing(" ERROR "), 0);
}
