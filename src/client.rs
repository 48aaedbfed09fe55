//! Bridge client bound to a configuration.

use log::debug;
use serde_json::{Value, json};

use crate::config::BridgeConfig;
use crate::errors::{BridgeError, BridgeErrorKind, Error};
use crate::method::Method;
use crate::transport::Transport;

type Result<T> = std::result::Result<T, Error>;

/// A client for one Hue bridge.
///
/// Resource paths passed to [`Client::request`] are relative to the
/// authenticated user, e.g. `"lights/1/state"`.
///
/// # Example
///
/// ```
/// use hue_bridge_rs::{BridgeConfig, Client};
///
/// let client = Client::new(BridgeConfig::new("10.0.0.2").unwrap().with_username("abc"));
/// assert_eq!(client.host(), "10.0.0.2");
/// assert_eq!(client.username(), Some("abc"));
/// ```
#[derive(Debug)]
pub struct Client {
    config: BridgeConfig,
    transport: Transport,
}

impl Client {
    pub fn new(config: BridgeConfig) -> Self {
        let transport = Transport::new(&config);
        Client { config, transport }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        self.config.host()
    }

    pub fn username(&self) -> Option<&str> {
        self.config.username()
    }

    pub fn set_username(&mut self, username: Option<&str>) {
        self.config.set_username(username.map(String::from));
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Mutable access, e.g. to install a different adapter.
    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Sends a request for `resource` on behalf of the configured user.
    pub async fn request(&self, resource: &str, method: Method, body: Option<&Value>) -> Result<Value> {
        let path = self.user_path(resource);
        self.transport.send_request(&path, method, body).await
    }

    /// Registers a new user on the bridge and stores it in this client.
    ///
    /// The bridge's link button must have been pressed shortly before, otherwise
    /// this fails with [`BridgeErrorKind::LinkButton`].
    pub async fn create_user(&mut self, device_type: &str) -> Result<String> {
        let body = json!({"devicetype": device_type});
        let result = self
            .transport
            .send_request("", Method::Post, Some(&body))
            .await?;

        if let Some(error) = result.get("error") {
            return Err(BridgeError::from_envelope(error).into());
        }

        let username = result
            .get("success")
            .unwrap_or(&result)
            .get("username")
            .and_then(Value::as_str)
            .ok_or(Error::MissingUsername)?
            .to_string();

        debug!("Registered user {} on bridge {}", username, self.host());
        self.set_username(Some(&username));
        Ok(username)
    }

    /// Checks whether the configured user is accepted by the bridge.
    pub async fn is_authorized(&self) -> Result<bool> {
        if self.username().is_none() {
            return Ok(false);
        }

        match self.request("config", Method::Get, None).await {
            Ok(config) => Ok(config.get("whitelist").is_some()),
            Err(e) if e.bridge_kind() == Some(BridgeErrorKind::Authorization) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn user_path(&self, resource: &str) -> String {
        let resource = resource.trim_start_matches('/');
        match self.username() {
            Some(username) if resource.is_empty() => username.to_string(),
            Some(username) => format!("{}/{}", username, resource),
            None => resource.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapter::MockAdapter;

    fn client_with(adapter: &Arc<MockAdapter>, username: Option<&str>) -> Client {
        let mut config = BridgeConfig::new("127.0.0.1").unwrap();
        if let Some(username) = username {
            config = config.with_username(username);
        }
        let mut client = Client::new(config);
        client.transport_mut().set_adapter(adapter.clone());
        client
    }

    #[tokio::test]
    async fn test_request_prefixes_username() {
        let adapter = Arc::new(MockAdapter::new());
        adapter.push_json(200, &json!({}));
        adapter.push_json(200, &json!({}));
        adapter.push_json(200, &json!({}));
        let mut client = client_with(&adapter, Some("abc"));

        client.request("lights", Method::Get, None).await.unwrap();
        client.request("", Method::Get, None).await.unwrap();
        client.set_username(None);
        client.request("/config", Method::Get, None).await.unwrap();

        let urls: Vec<String> = adapter.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, ["/api/abc/lights", "/api/abc", "/api/config"]);
    }

    #[tokio::test]
    async fn test_create_user() {
        let adapter = Arc::new(MockAdapter::new());
        adapter.push_json(200, &json!([{"success": {"username": "newuser"}}]));
        let mut client = client_with(&adapter, None);

        let username = client.create_user("hue-bridge-rs#test").await.unwrap();
        assert_eq!(username, "newuser");
        assert_eq!(client.username(), Some("newuser"));

        let request = &adapter.requests()[0];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "/api/");
        let body: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({"devicetype": "hue-bridge-rs#test"}));
    }

    #[tokio::test]
    async fn test_create_user_unwrapped_success() {
        let adapter = Arc::new(MockAdapter::new());
        adapter.push_json(200, &json!({"success": {"username": "other"}}));
        let mut client = client_with(&adapter, None);

        assert_eq!(client.create_user("app").await.unwrap(), "other");
    }

    #[tokio::test]
    async fn test_create_user_link_button() {
        let adapter = Arc::new(MockAdapter::new());
        adapter.push_json(
            200,
            &json!([{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]),
        );
        let mut client = client_with(&adapter, None);

        let err = client.create_user("app").await.unwrap_err();
        assert_eq!(err.bridge_kind(), Some(BridgeErrorKind::LinkButton));
        assert_eq!(err.to_string(), "link button not pressed");
        assert!(client.username().is_none());
    }

    #[tokio::test]
    async fn test_create_user_missing_username() {
        let adapter = Arc::new(MockAdapter::new());
        adapter.push_json(200, &json!([{"success": {}}]));
        let mut client = client_with(&adapter, None);

        assert!(matches!(
            client.create_user("app").await,
            Err(Error::MissingUsername)
        ));
    }

    #[tokio::test]
    async fn test_is_authorized() {
        let adapter = Arc::new(MockAdapter::new());
        adapter.push_json(200, &json!({"name": "Bridge", "whitelist": {}}));
        adapter.push_json(200, &json!({"name": "Bridge"}));
        adapter.push_json(
            200,
            &json!({"error": {"type": 1, "description": "unauthorized user"}}),
        );
        adapter.push_json(503, &json!({}));
        let client = client_with(&adapter, Some("abc"));

        assert!(client.is_authorized().await.unwrap());
        assert!(!client.is_authorized().await.unwrap());
        assert!(!client.is_authorized().await.unwrap());
        assert!(client.is_authorized().await.unwrap_err().is_connection());
    }

    #[tokio::test]
    async fn test_is_authorized_without_username() {
        let adapter = Arc::new(MockAdapter::new());
        let client = client_with(&adapter, None);

        assert!(!client.is_authorized().await.unwrap());
        assert!(adapter.requests().is_empty());
    }
}
