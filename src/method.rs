//! HTTP methods understood by the bridge.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// HTTP verb for a bridge request.
///
/// ```
/// use std::str::FromStr;
/// use hue_bridge_rs::Method;
///
/// assert_eq!(Method::Put.to_string(), "PUT");
/// assert_eq!(Method::from_str("delete").unwrap(), Method::Delete);
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_parse() {
        for method in Method::iter() {
            assert_eq!(Method::from_str(method.as_ref()).unwrap(), method);
        }
        assert!(Method::from_str("PATCH").is_err());
    }
}
