//! Helpers for PATCH payloads that must tell "absent" from "null"

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (even `null`) as `Some(..)`.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>`: absent is `None`, `null` is `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_some")]
        status: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.status, None);

        let null: Probe = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert_eq!(null.status, Some(None));

        let value: Probe = serde_json::from_str(r#"{"status": "active"}"#).unwrap();
        assert_eq!(value.status, Some(Some("active".to_string())));
    }
}
