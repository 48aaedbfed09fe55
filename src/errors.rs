use serde_json::Value;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::adapter::AdapterError;

/// All error types that can occur when talking to a Hue bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP exchange itself failed or returned something that is not a bridge response.
    #[error("connection failure: {0}")]
    Connection(#[from] ConnectionError),

    /// The bridge answered with an error envelope.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Failed to serialize a request body to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize a response body.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// The default HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The configured bridge host is unusable.
    #[error("invalid bridge host {0:?}")]
    InvalidHost(String),

    /// The bridge accepted a user creation request but returned no username.
    #[error("bridge response did not contain a username")]
    MissingUsername,
}

impl Error {
    /// Returns the bridge error kind if this is a bridge protocol error.
    pub fn bridge_kind(&self) -> Option<BridgeErrorKind> {
        match self {
            Error::Bridge(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

/// Transport-level failures. None of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("bridge responded with http status {0}")]
    HttpStatus(u16),

    #[error("bridge responded with content type {0:?}, expected application/json")]
    ContentType(String),

    #[error("adapter error: {0}")]
    Adapter(#[source] AdapterError),
}

/// Error categories defined by the bridge protocol.
///
/// Every code the bridge may report maps to exactly one kind; codes this crate
/// does not know about fall back to [`BridgeErrorKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BridgeErrorKind {
    /// Unauthorized user (1).
    Authorization,
    /// Body contains invalid JSON (2).
    InvalidBody,
    /// Resource not available (3).
    Resource,
    /// Method not available for resource (4).
    Method,
    /// Missing parameters in body (5).
    InvalidParameter,
    /// Parameter not available (6).
    ParameterUnavailable,
    /// Invalid value for parameter (7).
    InvalidValue,
    /// Link button not pressed (101).
    LinkButton,
    /// Group table full (301).
    GroupTableFull,
    /// Bridge internal error, usually too many requests (901).
    Throttle,
    /// Any code not listed above.
    Generic,
}

impl BridgeErrorKind {
    /// The bridge error code for this kind, `None` for the fallback.
    pub fn code(self) -> Option<i64> {
        match self {
            BridgeErrorKind::Authorization => Some(1),
            BridgeErrorKind::InvalidBody => Some(2),
            BridgeErrorKind::Resource => Some(3),
            BridgeErrorKind::Method => Some(4),
            BridgeErrorKind::InvalidParameter => Some(5),
            BridgeErrorKind::ParameterUnavailable => Some(6),
            BridgeErrorKind::InvalidValue => Some(7),
            BridgeErrorKind::LinkButton => Some(101),
            BridgeErrorKind::GroupTableFull => Some(301),
            BridgeErrorKind::Throttle => Some(901),
            BridgeErrorKind::Generic => None,
        }
    }

    /// Map a bridge error code to its kind. Never fails.
    ///
    /// ```
    /// use hue_bridge_rs::BridgeErrorKind;
    ///
    /// assert_eq!(BridgeErrorKind::from_type(101), BridgeErrorKind::LinkButton);
    /// assert_eq!(BridgeErrorKind::from_type(999), BridgeErrorKind::Generic);
    /// ```
    pub fn from_type(code: i64) -> Self {
        BridgeErrorKind::iter()
            .find(|kind| kind.code() == Some(code))
            .unwrap_or(BridgeErrorKind::Generic)
    }
}

/// An error reported by the bridge in an `{"error": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{description}")]
pub struct BridgeError {
    kind: BridgeErrorKind,
    error_type: i64,
    description: String,
}

impl BridgeError {
    /// Build the typed error for a bridge error code, keeping its description as the message.
    pub fn from_type(error_type: i64, description: &str) -> Self {
        BridgeError {
            kind: BridgeErrorKind::from_type(error_type),
            error_type,
            description: description.to_string(),
        }
    }

    /// Build from the object found under an `"error"` key.
    pub(crate) fn from_envelope(error: &Value) -> Self {
        let error_type = error.get("type").and_then(Value::as_i64).unwrap_or(-1);
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Self::from_type(error_type, description)
    }

    pub fn kind(&self) -> BridgeErrorKind {
        self.kind
    }

    /// The raw code reported by the bridge.
    pub fn error_type(&self) -> i64 {
        self.error_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_error_types() {
        let table = [
            (1, BridgeErrorKind::Authorization),
            (2, BridgeErrorKind::InvalidBody),
            (3, BridgeErrorKind::Resource),
            (4, BridgeErrorKind::Method),
            (5, BridgeErrorKind::InvalidParameter),
            (6, BridgeErrorKind::ParameterUnavailable),
            (7, BridgeErrorKind::InvalidValue),
            (101, BridgeErrorKind::LinkButton),
            (301, BridgeErrorKind::GroupTableFull),
            (901, BridgeErrorKind::Throttle),
        ];
        for (code, kind) in table {
            assert_eq!(BridgeErrorKind::from_type(code), kind, "code {code}");
            assert_eq!(BridgeError::from_type(code, "").kind(), kind);
        }
    }

    #[test]
    fn test_unknown_error_types_fall_back() {
        for code in [-1, 0, 8, 100, 201, 999] {
            let err = BridgeError::from_type(code, "something new");
            assert_eq!(err.kind(), BridgeErrorKind::Generic);
            assert_eq!(err.error_type(), code);
        }
    }

    #[test]
    fn test_description_is_message() {
        let err = Error::from(BridgeError::from_type(1, "unauthorized user"));
        assert_eq!(err.to_string(), "unauthorized user");
        assert_eq!(err.bridge_kind(), Some(BridgeErrorKind::Authorization));
    }

    #[test]
    fn test_from_envelope_missing_fields() {
        let err = BridgeError::from_envelope(&json!({}));
        assert_eq!(err.kind(), BridgeErrorKind::Generic);
        assert_eq!(err.error_type(), -1);
        assert_eq!(err.description(), "");

        let err = BridgeError::from_envelope(&json!({"type": 7, "description": "bad value"}));
        assert_eq!(err.kind(), BridgeErrorKind::InvalidValue);
        assert_eq!(err.description(), "bad value");
    }

    #[test]
    fn test_connection_error_display() {
        let err = Error::from(ConnectionError::HttpStatus(500));
        assert!(err.is_connection());
        assert_eq!(
            err.to_string(),
            "connection failure: bridge responded with http status 500"
        );
    }
}
