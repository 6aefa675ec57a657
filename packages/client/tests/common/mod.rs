use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use gavel_client::{ClientConfig, JudgeClient, PollOptions};

/// In-process stand-in for the judge backend: every submit endpoint
/// answers with a canned reply, and the check endpoint plays back a
/// scripted sequence of status snapshots (repeating the last one once
/// the script runs out).
pub struct StubJudge {
    submit_reply: Value,
    checks: Mutex<VecDeque<Value>>,
    pub submit_calls: AtomicUsize,
    pub check_calls: AtomicUsize,
}

impl StubJudge {
    pub fn submit_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn check_count(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }
}

async fn submit(State(state): State<Arc<StubJudge>>) -> Json<Value> {
    state.submit_calls.fetch_add(1, Ordering::SeqCst);
    Json(state.submit_reply.clone())
}

async fn check(State(state): State<Arc<StubJudge>>, Path(_id): Path<u64>) -> Json<Value> {
    state.check_calls.fetch_add(1, Ordering::SeqCst);
    let mut checks = state.checks.lock().unwrap();
    let snapshot = if checks.len() > 1 {
        checks.pop_front().unwrap()
    } else {
        checks
            .front()
            .cloned()
            .unwrap_or_else(|| json!({"id": 0, "queue_position": 0}))
    };
    Json(snapshot)
}

/// Spawn the stub on an ephemeral port, returning its state and base URL.
pub async fn spawn_stub(submit_reply: Value, checks: Vec<Value>) -> (Arc<StubJudge>, String) {
    let state = Arc::new(StubJudge {
        submit_reply,
        checks: Mutex::new(checks.into()),
        submit_calls: AtomicUsize::new(0),
        check_calls: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/run/submit", post(submit))
        .route("/run/custom", post(submit))
        .route("/run/generate-tests", post(submit))
        .route("/run/check/{id}", get(check))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server died");
    });

    (state, format!("http://{addr}"))
}

/// Client wired to the stub, with a fast poll interval so tests finish
/// quickly.
pub fn fast_client(base_url: &str, max_attempts: u32) -> JudgeClient {
    let mut config = ClientConfig::default().with_base_url(base_url);
    config.poll = PollOptions {
        interval_ms: 10,
        max_attempts,
        reset_budget_on_progress: false,
    };
    JudgeClient::new(config).expect("Failed to build client")
}
