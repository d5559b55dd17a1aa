//! Stub Rosetta API used by the integration tests.

// Shared by both test targets; each uses a different subset
#![allow(dead_code)]

use actix_web::{dev::ServerHandle, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use std::sync::{Arc, Mutex};

/// Block index the stub answers with a plain-text 404
pub const MISSING_BLOCK_INDEX: i64 = 404;

/// Address the stub answers with a Rosetta error body
pub const BROKEN_ADDRESS: &str = "0xbad";

/// A request as the stub saw it
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct StubState {
    received: Mutex<Vec<Received>>,
    balance_calls: AtomicUsize,
    /// When non-zero, every n-th balance call is answered with 503
    pub fail_every: AtomicUsize,
    /// When non-zero, every request is held this many milliseconds before answering
    pub delay_ms: AtomicU64,
}

impl StubState {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    pub fn balance_calls(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }
}

async fn handle(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.received.lock().unwrap().push(Received {
        path: req.path().to_string(),
        content_type,
        body: body.clone(),
    });

    let delay_ms = state.delay_ms.load(Ordering::SeqCst);
    if delay_ms != 0 {
        actix_web::rt::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    match req.path() {
        "/block" => {
            if body["block_identifier"]["index"] == json!(MISSING_BLOCK_INDEX) {
                return HttpResponse::NotFound().body("not found");
            }
            HttpResponse::Ok().json(json!({
                "block": {
                    "block_identifier": body["block_identifier"],
                    "transactions": []
                }
            }))
        }
        "/account/balance" => {
            let call = state.balance_calls.fetch_add(1, Ordering::SeqCst) + 1;
            let fail_every = state.fail_every.load(Ordering::SeqCst);
            if fail_every != 0 && call % fail_every == 0 {
                return HttpResponse::ServiceUnavailable().body("busy");
            }
            if body["account_identifier"]["address"] == BROKEN_ADDRESS {
                return HttpResponse::InternalServerError().json(json!({
                    "code": 2,
                    "message": "Internal error",
                    "retriable": true
                }));
            }
            HttpResponse::Ok().json(json!({
                "block_identifier": {"index": 607885, "hash": "0x46b7"},
                "balances": [{
                    "value": "1000",
                    "currency": {"symbol": "MCM", "decimals": 9}
                }]
            }))
        }
        path => HttpResponse::Ok().json(json!({ "path": path, "request": body })),
    }
}

/// Start the stub on a free port and return its base URL
pub fn spawn_stub_api() -> (String, Arc<StubState>, ServerHandle) {
    let state = Arc::new(StubState::default());
    let data = web::Data::from(state.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::route().to(handle))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Could not bind stub API");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    (format!("http://{}", addr), state, handle)
}
