//! Common types shared across the ticket API models.
//!
//! This module defines the SOAP envelope wrapper and the id/name pair that
//! the service uses for clients, contacts, locations and devices.

use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

/// Namespace of the SOAP 1.1 envelope.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Namespace of the ticket service operations (`ser:` prefix).
pub const SERVICE_NS: &str = "http://service.ticket.api.mod.secureworks.com/";

/// A decoded SOAP envelope.
///
/// Only the `Body` is kept; `Header` and namespace declarations are ignored.
/// Element names are matched on their local name, so `soap:Body`,
/// `S:Body` and `Body` are equivalent.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<B> {
    /// Contents of the `Body` element.
    #[serde(rename = "Body")]
    pub body: B,
}

/// A reference to another entity by numeric id and display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdName {
    /// Numeric identifier.
    #[serde(default, deserialize_with = "empty_as_default")]
    pub id: i64,

    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Reads a scalar from element text, treating empty or whitespace-only text
/// (`<dateClosed/>`, `<dateClosed xsi:nil="true"/>`) as the type's default.
pub(crate) fn empty_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(T::default());
    }
    text.parse().map_err(de::Error::custom)
}

impl IdName {
    /// Creates a new id/name pair.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns true if neither the id nor the name was populated.
    pub fn is_empty(&self) -> bool {
        self.id == 0 && self.name.is_empty()
    }
}

impl std::fmt::Display for IdName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_name_display() {
        let client = IdName::new(42, "Acme Corp");
        assert_eq!(client.to_string(), "Acme Corp (42)");
    }

    #[test]
    fn test_id_name_default_is_empty() {
        assert!(IdName::default().is_empty());
        assert!(!IdName::new(1, "").is_empty());
    }

    #[test]
    fn test_envelope_matches_prefixed_body() {
        #[derive(Debug, Deserialize)]
        struct Body {
            #[serde(rename = "ping", default)]
            ping: Option<String>,
        }

        let xml = r#"<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
            <S:Header/>
            <S:Body><ping>pong</ping></S:Body>
        </S:Envelope>"#;

        let envelope: Envelope<Body> = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(envelope.body.ping.as_deref(), Some("pong"));
    }

    #[test]
    fn test_empty_id_reads_as_zero() {
        let empty: IdName = quick_xml::de::from_str("<client><id/><name>Acme</name></client>").unwrap();
        assert_eq!(empty, IdName::new(0, "Acme"));

        let nil: IdName = quick_xml::de::from_str(
            r#"<client><id xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:nil="true"/></client>"#,
        )
        .unwrap();
        assert!(nil.is_empty());

        let padded: IdName = quick_xml::de::from_str("<client><id> 42 </id></client>").unwrap();
        assert_eq!(padded.id, 42);
    }

    #[test]
    fn test_non_numeric_id_is_an_error() {
        assert!(quick_xml::de::from_str::<IdName>("<client><id>abc</id></client>").is_err());
    }
}
