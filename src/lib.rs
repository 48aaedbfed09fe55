//! # hue_bridge_rs
//!
//! An async Rust client for the local REST API of the Philips Hue bridge.
//!
//! The heart of the crate is [`Transport`], which turns a resource path, an HTTP
//! [`Method`] and an optional JSON body into a bridge request, checks the
//! response and unwraps the bridge's JSON envelope. Failures reported by the
//! bridge come back as typed [`BridgeError`]s.
//!
//! ## Quick Start
//!
//! ```ignore
//! use serde_json::json;
//! use hue_bridge_rs::{BridgeConfig, Client, Method};
//!
//! async fn turn_on() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BridgeConfig::new("192.168.1.2")?.with_username("83b7780291a6ceffbe0bd049104df");
//!     let client = Client::new(config);
//!
//!     client
//!         .request("lights/1/state", Method::Put, Some(&json!({"on": true})))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Responses
//!
//! The bridge answers with one of three shapes:
//!
//! - `{"success": ...}` - the value under `success` is returned
//! - `{"error": {"type": n, "description": "..."}}` - mapped to [`Error::Bridge`]
//! - `[...]` - the first element is returned
//!
//! Any non-200 status or non-JSON content type fails with [`Error::Connection`].
//!
//! ## Adapters
//!
//! The HTTP exchange is delegated to an [`Adapter`]. [`ReqwestAdapter`] is used
//! by default; [`MockAdapter`] replays canned responses for tests.

pub mod adapter;
mod client;
mod config;
mod errors;
mod method;
mod transport;

// Re-export public API
pub use adapter::{Adapter, AdapterError, AdapterRequest, AdapterResponse, MockAdapter, ReqwestAdapter};
pub use client::Client;
pub use config::BridgeConfig;
pub use errors::{BridgeError, BridgeErrorKind, ConnectionError, Error};
pub use method::Method;
pub use transport::Transport;
