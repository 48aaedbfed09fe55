//! Pluggable HTTP exchange.
//!
//! An [`Adapter`] performs the literal HTTP request against the bridge and hands
//! back the status code, content type and raw body. Everything that interprets
//! the response lives in [`crate::Transport`].
//!
//! Two implementations ship with the crate:
//!
//! - [`ReqwestAdapter`] - the default, backed by `reqwest`
//! - [`MockAdapter`] - a scripted test double that records the requests it sees

use futures::future::BoxFuture;

use crate::method::Method;

mod mock;
mod reqwest_impl;

pub use mock::MockAdapter;
pub use reqwest_impl::ReqwestAdapter;

/// Failure reported by an adapter while performing the exchange.
pub type AdapterError = Box<dyn std::error::Error + Send + Sync>;

/// Trait for the HTTP exchange with a bridge.
///
/// The trait is object safe so that a [`crate::Transport`] can swap adapters at
/// runtime.
pub trait Adapter: Send + Sync {
    /// Perform one request and return the raw response.
    fn send(&self, request: AdapterRequest) -> BoxFuture<'_, Result<AdapterResponse, AdapterError>>;

    /// Whether the URL passed to [`Adapter::send`] must include the scheme and host.
    fn requires_full_url(&self) -> bool {
        true
    }

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// A single request handed to an adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterRequest {
    pub method: Method,
    pub url: String,
    /// JSON encoded body, if any.
    pub body: Option<Vec<u8>>,
}

impl AdapterRequest {
    pub fn new(method: Method, url: &str, body: Option<Vec<u8>>) -> Self {
        AdapterRequest {
            method,
            url: url.to_string(),
            body,
        }
    }
}

/// What came back from the bridge, uninterpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterResponse {
    status: u16,
    content_type: String,
    body: Vec<u8>,
}

impl AdapterResponse {
    pub fn new(status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        AdapterResponse {
            status,
            content_type: content_type.to_string(),
            body: body.into(),
        }
    }

    pub fn http_status_code(&self) -> u16 {
        self.status
    }

    /// The raw `Content-Type` header, empty if the response had none.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
