//! reqwest-backed adapter.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use log::debug;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use super::{Adapter, AdapterError, AdapterRequest, AdapterResponse};
use crate::errors::Error;
use crate::method::Method;

/// Default adapter performing requests with a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestAdapter {
    client: Client,
}

impl ReqwestAdapter {
    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::ClientBuild)?;
        Ok(ReqwestAdapter { client })
    }

    /// Use an existing client, e.g. one with custom headers or proxy settings.
    pub fn with_client(client: Client) -> Self {
        ReqwestAdapter { client }
    }
}

impl Adapter for ReqwestAdapter {
    fn send(&self, request: AdapterRequest) -> BoxFuture<'_, Result<AdapterResponse, AdapterError>> {
        async move {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            if let Some(body) = request.body {
                builder = builder.header(CONTENT_TYPE, "application/json").body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let body = response.bytes().await?;

            debug!("HTTP {} {} -> {}", request.method, request.url, status);
            Ok(AdapterResponse::new(status, &content_type, body.to_vec()))
        }
        .boxed()
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
