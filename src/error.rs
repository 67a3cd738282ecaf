//! Error types for the sworks client.
//!
//! This module defines `SworksError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Error classes
//!
//! - **Transport**: the HTTPS exchange failed. The underlying `reqwest::Error`
//!   is kept as the error source so callers can tell a timeout from a refused
//!   connection or a DNS failure.
//! - **Decode**: the body was not the XML shape we expected.
//! - **Fault**: the service answered with a SOAP `Fault` element.
//!
//! # Security
//!
//! Request envelopes carry the account password in clear text. Use
//! `sanitize_message()` before logging anything derived from a request or
//! response body.

use std::path::PathBuf;
use std::time::Duration;
use quick_xml::escape::escape;
use thiserror::Error;

use crate::models::SoapFault;

/// Unified error type for all sworks operations.
#[derive(Error, Debug)]
pub enum SworksError {
    /// Configuration error - missing or invalid values.
    #[error("configuration error: {0}")]
    Config(String),

    /// The credential file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path of the file we tried to read.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The credential file is not a valid `Config` document.
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[source] quick_xml::DeError),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Request timed out.
    #[error("{operation} timed out after {duration:?}")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// HTTP response returned a non-success status code and no SOAP fault.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, truncated.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        /// The operation whose response failed to decode.
        operation: String,
        /// The underlying XML error.
        #[source]
        source: quick_xml::DeError,
    },

    /// The body carried neither a fault nor the expected response element.
    #[error("{operation} response has no <{element}> element")]
    MissingResponse {
        /// The operation that was invoked.
        operation: String,
        /// The element we looked for inside `Body`.
        element: String,
    },

    /// A request could not be built from the given values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The service reported a SOAP fault.
    #[error("SOAP fault {0}")]
    Fault(SoapFault),

    /// Attachment content is not valid base64.
    #[error("attachment content is not valid base64: {0}")]
    Attachment(#[from] base64::DecodeError),
}

impl SworksError {
    /// Creates a configuration error for a missing value.
    pub fn missing(name: &str) -> Self {
        SworksError::Config(format!("missing required value: {}", name))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SworksError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SworksError::Validation(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        SworksError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a decode error for an operation.
    pub fn decode(operation: impl Into<String>, source: quick_xml::DeError) -> Self {
        SworksError::Decode {
            operation: operation.into(),
            source,
        }
    }

    /// Creates a missing-response error.
    pub fn missing_response(operation: impl Into<String>, element: impl Into<String>) -> Self {
        SworksError::MissingResponse {
            operation: operation.into(),
            element: element.into(),
        }
    }

    /// Returns the SOAP fault if the service reported one.
    #[must_use]
    pub fn fault(&self) -> Option<&SoapFault> {
        match self {
            SworksError::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Returns true if the request never produced a response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, SworksError::Http(_) | SworksError::Timeout { .. })
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    ///
    /// The XML-escaped form of the secret is redacted too, since that is how
    /// it appears inside a request envelope.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message
            .replace(&*escape(secret), "[REDACTED]")
            .replace(secret, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FaultDetail, FaultInfo};

    fn sample_fault() -> SoapFault {
        SoapFault {
            fault_code: "Client".to_string(),
            fault_string: "Invalid ticket".to_string(),
            detail: FaultDetail {
                fault_info: FaultInfo {
                    fault_code: "E001".to_string(),
                    reason: "not found".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_missing_error() {
        let err = SworksError::missing("UserName");
        assert!(err.to_string().contains("UserName"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_timeout_error() {
        let err = SworksError::timeout(Duration::from_secs(300), "getTicketDetail");
        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("300s"));
        assert!(err.is_transport());
    }

    #[test]
    fn test_fault_error_carries_all_fields() {
        let err = SworksError::Fault(sample_fault());
        let msg = err.to_string();
        assert!(msg.contains("Client"));
        assert!(msg.contains("Invalid ticket"));
        assert!(msg.contains("E001"));
        assert!(msg.contains("not found"));
        assert_eq!(err.fault().map(|f| f.fault_code.as_str()), Some("Client"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_missing_response_error() {
        let err = SworksError::missing_response("getQueueCount", "getQueueCountResponse");
        assert_eq!(
            err.to_string(),
            "getQueueCount response has no <getQueueCountResponse> element"
        );
    }

    #[test]
    fn test_sanitize_message_removes_password() {
        let password = "hunter2-secret";
        let message = format!("<password>{}</password>", password);
        let sanitized = SworksError::sanitize_message(&message, password);
        assert!(!sanitized.contains(password));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_removes_escaped_password() {
        let password = "p&ss<1";
        let message = "<password>p&amp;ss&lt;1</password> raw p&ss<1";
        let sanitized = SworksError::sanitize_message(message, password);
        assert_eq!(sanitized, "<password>[REDACTED]</password> raw [REDACTED]");
    }

    #[test]
    fn test_validation_error() {
        let err = SworksError::validation("getAttachment takes 2 parameter(s), got 1");
        assert!(err.to_string().starts_with("validation error:"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_sanitize_message_empty_secret() {
        let message = "Some error message";
        assert_eq!(SworksError::sanitize_message(message, ""), message);
    }
}
