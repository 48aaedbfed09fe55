//! Request/response cycle against a bridge.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use log::debug;
use serde_json::{Value, json};

use crate::adapter::{Adapter, AdapterRequest, AdapterResponse, ReqwestAdapter};
use crate::config::BridgeConfig;
use crate::errors::{BridgeError, ConnectionError, Error};
use crate::method::Method;

type Result<T> = std::result::Result<T, Error>;

/// Sends requests to a bridge and decodes its JSON envelopes.
///
/// The transport owns an [`Adapter`] that performs the actual HTTP exchange.
/// Unless one is set with [`Transport::set_adapter`], a [`ReqwestAdapter`] is
/// created on first use.
///
/// # Example
///
/// ```
/// use hue_bridge_rs::{BridgeConfig, Transport};
///
/// let transport = Transport::new(&BridgeConfig::new("10.0.0.2").unwrap());
/// assert_eq!(transport.build_request_url("lights", true), "http://10.0.0.2/api/lights");
/// assert_eq!(transport.build_request_url("lights", false), "/api/lights");
/// ```
pub struct Transport {
    host: String,
    timeout: Option<Duration>,
    adapter: OnceLock<Arc<dyn Adapter>>,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("host", &self.host)
            .field("timeout", &self.timeout)
            .field("adapter", &self.adapter.get().map(|a| a.name()))
            .finish()
    }
}

impl Transport {
    const SUCCESS_STATUS: u16 = 200;
    const JSON_CONTENT_TYPE: &'static str = "application/json";

    pub fn new(config: &BridgeConfig) -> Self {
        Transport {
            host: config.host().to_string(),
            timeout: config.timeout(),
            adapter: OnceLock::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the active adapter, creating the default one if none was set.
    pub fn adapter(&self) -> Result<Arc<dyn Adapter>> {
        if let Some(adapter) = self.adapter.get() {
            return Ok(adapter.clone());
        }
        let adapter: Arc<dyn Adapter> = Arc::new(ReqwestAdapter::new(self.timeout)?);
        Ok(self.adapter.get_or_init(|| adapter).clone())
    }

    /// Replaces the active adapter for all subsequent requests.
    pub fn set_adapter(&mut self, adapter: Arc<dyn Adapter>) {
        self.adapter = OnceLock::from(adapter);
    }

    /// Builds `/api/{path}`, or `http://{host}/api/{path}` when `full_url` is set.
    pub fn build_request_url(&self, path: &str, full_url: bool) -> String {
        if full_url {
            format!("http://{}/api/{}", self.host, path)
        } else {
            format!("/api/{}", path)
        }
    }

    /// Returns diagnostics describing host, adapter and timeout.
    pub fn diagnostics(&self) -> Value {
        json!({
            "host": self.host,
            "adapter": self.adapter.get().map(|a| a.name()),
            "timeout_ms": self.timeout.map(|t| t.as_millis() as u64),
        })
    }

    /// Sends one request and returns the decoded payload.
    ///
    /// - a JSON array yields its first element
    /// - `{"success": x}` yields `x`
    /// - `{"error": {"type": n, "description": d}}` fails with [`Error::Bridge`]
    /// - anything else is returned as decoded
    ///
    /// Non-200 statuses and non-JSON content types fail with [`Error::Connection`].
    pub async fn send_request(&self, path: &str, method: Method, body: Option<&Value>) -> Result<Value> {
        let adapter = self.adapter()?;
        let url = self.build_request_url(path, adapter.requires_full_url());
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::JsonDump)?;

        debug!("{} {} via {}", method, url, adapter.name());
        let response = adapter
            .send(AdapterRequest::new(method, &url, body))
            .await
            .map_err(ConnectionError::Adapter)?;

        Self::validate(&response)?;
        let decoded = Self::decode_body(response.body())?;
        Self::extract_payload(decoded)
    }

    fn validate(response: &AdapterResponse) -> Result<()> {
        let status = response.http_status_code();
        if status != Self::SUCCESS_STATUS {
            return Err(ConnectionError::HttpStatus(status).into());
        }

        let content_type = response.content_type();
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        if !media_type.eq_ignore_ascii_case(Self::JSON_CONTENT_TYPE) {
            return Err(ConnectionError::ContentType(content_type.to_string()).into());
        }
        Ok(())
    }

    // An empty body is treated the same as a literal `null`.
    fn decode_body(body: &[u8]) -> Result<Value> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(body).map_err(Error::JsonLoad)
    }

    fn extract_payload(decoded: Value) -> Result<Value> {
        match decoded {
            Value::Array(items) => Ok(items.into_iter().next().unwrap_or(Value::Null)),
            Value::Object(mut map) => {
                if let Some(error) = map.get("error") {
                    return Err(BridgeError::from_envelope(error).into());
                }
                match map.remove("success") {
                    Some(success) => Ok(success),
                    None => Ok(Value::Object(map)),
                }
            }
            other => Ok(other),
        }
    }
}
