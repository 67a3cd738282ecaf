//! Configuration management for the sworks client.
//!
//! Two things are configured:
//!
//! - [`Config`]: the credential/endpoint model (user name, password, client
//!   id, location id, API URI). It is loaded from an XML file or from
//!   environment variables and is read-only afterwards.
//! - [`TransportOptions`]: how requests are delivered (timeout, certificate
//!   verification, body reconstruction).
//!
//! # Credential file
//!
//! ```xml
//! <Config>
//!   <UserName>api-user</UserName>
//!   <Password>secret</Password>
//!   <ClientId>100</ClientId>
//!   <LocationId>200</LocationId>
//!   <ApiUri>https://api.example.com/ticket/services/TicketService</ApiUri>
//! </Config>
//! ```

use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::decode::BodyMode;
use crate::error::SworksError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Credentials and endpoint for the ticket service.
///
/// The password must never be logged; the `Debug` impl redacts it.
#[derive(Clone, Default, Deserialize)]
pub struct Config {
    /// Account user name (`UserName`).
    #[serde(rename = "UserName", default)]
    pub username: String,

    /// Account password (`Password`), sent in clear text inside the envelope.
    #[serde(rename = "Password", default)]
    pub password: String,

    /// Client identifier (`ClientId`), used by the device and contact lists.
    #[serde(rename = "ClientId", default)]
    pub client_id: String,

    /// Location identifier (`LocationId`), used by the device and contact lists.
    #[serde(rename = "LocationId", default)]
    pub location_id: String,

    /// Service endpoint (`ApiUri`).
    #[serde(rename = "ApiUri", default)]
    pub api_uri: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("location_id", &self.location_id)
            .field("api_uri", &self.api_uri)
            .finish()
    }
}

impl Config {
    /// Loads configuration from an XML credential file.
    ///
    /// # Errors
    ///
    /// - `SworksError::ConfigRead` if the file cannot be read.
    /// - `SworksError::ConfigParse` if it is not a `Config` document.
    /// - `SworksError::Config` if a required value is missing or invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SworksError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| SworksError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loading credential file");
        Self::from_xml(&xml)
    }

    /// Parses configuration from the text of a credential file.
    pub fn from_xml(xml: &str) -> Result<Self, SworksError> {
        let config: Config = quick_xml::de::from_str(xml).map_err(SworksError::ConfigParse)?;
        config.validated()
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `SWORKS_USERNAME`
    /// - `SWORKS_PASSWORD`
    /// - `SWORKS_API_URI`
    ///
    /// `SWORKS_CLIENT_ID` and `SWORKS_LOCATION_ID` are optional.
    pub fn from_env() -> Result<Self, SworksError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from a variable lookup function.
    fn from_lookup<F>(lookup: F) -> Result<Self, SworksError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).unwrap_or_default();

        let config = Config {
            username: optional("SWORKS_USERNAME"),
            password: optional("SWORKS_PASSWORD"),
            client_id: optional("SWORKS_CLIENT_ID"),
            location_id: optional("SWORKS_LOCATION_ID"),
            api_uri: optional("SWORKS_API_URI"),
        };
        config.validated()
    }

    /// Trims every value and checks the required ones.
    fn validated(self) -> Result<Self, SworksError> {
        let config = Config {
            username: self.username.trim().to_string(),
            password: self.password,
            client_id: self.client_id.trim().to_string(),
            location_id: self.location_id.trim().to_string(),
            api_uri: self.api_uri.trim().to_string(),
        };

        if config.username.is_empty() {
            return Err(SworksError::missing("UserName"));
        }
        if config.password.is_empty() {
            return Err(SworksError::missing("Password"));
        }
        if config.api_uri.is_empty() {
            return Err(SworksError::missing("ApiUri"));
        }

        Self::validate_api_uri(&config.api_uri)?;
        Self::validate_password(&config.password)?;

        Ok(config)
    }

    /// Validates the endpoint is an absolute http(s) URL.
    fn validate_api_uri(uri: &str) -> Result<(), SworksError> {
        let parsed = url::Url::parse(uri)
            .map_err(|e| SworksError::invalid_config(format!("ApiUri is not a valid URL: {}", e)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SworksError::invalid_config(format!(
                "ApiUri must use http:// or https://, got {}://",
                other
            ))),
        }
    }

    /// Validates the password is not a placeholder value.
    fn validate_password(password: &str) -> Result<(), SworksError> {
        let lower = password.to_lowercase();
        let placeholder_patterns = ["your_password", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if lower.contains(pattern) {
                return Err(SworksError::invalid_config(
                    "Password appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}

/// Delivery settings for SOAP requests.
///
/// The service presents a certificate that does not validate, so
/// certificate verification is off unless a caller turns it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    /// Per-request timeout.
    pub timeout: Duration,

    /// Accept any server certificate.
    pub accept_invalid_certs: bool,

    /// How the response body is handed to the decoder.
    pub body_mode: BodyMode,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: true,
            body_mode: BodyMode::Exact,
        }
    }
}

impl TransportOptions {
    /// Creates options with the defaults (300 s, no certificate check, exact body).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Turns certificate verification on or off.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.accept_invalid_certs = !verify;
        self
    }

    /// Sets the body reconstruction mode.
    pub fn with_body_mode(mut self, body_mode: BodyMode) -> Self {
        self.body_mode = body_mode;
        self
    }

    /// Applies overrides from environment variables.
    ///
    /// # Optional Environment Variables
    ///
    /// - `SWORKS_TIMEOUT_SECS`: timeout in seconds
    /// - `SWORKS_VERIFY_TLS`: `true` to verify the server certificate
    /// - `SWORKS_COLLAPSE_WHITESPACE`: `true` to collapse body whitespace
    pub fn from_env() -> Result<Self, SworksError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, SworksError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(secs) = lookup("SWORKS_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                SworksError::invalid_config("SWORKS_TIMEOUT_SECS must be a whole number of seconds")
            })?;
            options = options.with_timeout(Duration::from_secs(secs));
        }

        if let Some(verify) = lookup("SWORKS_VERIFY_TLS") {
            options = options.with_verify_tls(parse_flag("SWORKS_VERIFY_TLS", &verify)?);
        }

        if let Some(collapse) = lookup("SWORKS_COLLAPSE_WHITESPACE") {
            if parse_flag("SWORKS_COLLAPSE_WHITESPACE", &collapse)? {
                options = options.with_body_mode(BodyMode::CollapseWhitespace);
            }
        }

        Ok(options)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool, SworksError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(SworksError::invalid_config(format!(
            "{} must be true or false",
            name
        ))),
    }
}
