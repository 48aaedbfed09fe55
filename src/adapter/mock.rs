//! Scripted adapter for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use super::{Adapter, AdapterError, AdapterRequest, AdapterResponse};

/// An adapter that replays queued responses and records every request.
///
/// ```
/// use hue_bridge_rs::{AdapterResponse, MockAdapter};
/// use serde_json::json;
///
/// let adapter = MockAdapter::new();
/// adapter.push_json(200, &json!({"success": "123"}));
/// adapter.push_response(AdapterResponse::new(500, "text/html", "<html></html>"));
/// assert!(adapter.requests().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockAdapter {
    responses: Mutex<VecDeque<Result<AdapterResponse, String>>>,
    requests: Mutex<Vec<AdapterRequest>>,
    full_url: bool,
}

impl MockAdapter {
    /// A mock receiving host-relative URLs (`/api/...`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock receiving full URLs (`http://host/api/...`).
    pub fn with_full_url() -> Self {
        MockAdapter {
            full_url: true,
            ..Self::default()
        }
    }

    pub fn push_response(&self, response: AdapterResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    /// Queue an `application/json` response with the given status and body.
    pub fn push_json(&self, status: u16, body: &Value) {
        self.push_response(AdapterResponse::new(
            status,
            "application/json",
            body.to_string(),
        ));
    }

    /// Queue a failure of the exchange itself.
    pub fn push_error(&self, message: &str) {
        lock(&self.responses).push_back(Err(message.to_string()));
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<AdapterRequest> {
        lock(&self.requests).clone()
    }
}

impl Adapter for MockAdapter {
    fn send(&self, request: AdapterRequest) -> BoxFuture<'_, Result<AdapterResponse, AdapterError>> {
        lock(&self.requests).push(request);
        let next = lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err("no response queued".to_string()));
        async move { next.map_err(AdapterError::from) }.boxed()
    }

    fn requires_full_url(&self) -> bool {
        self.full_url
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// Poisoning is ignored; the queues carry no cross-field invariants.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
