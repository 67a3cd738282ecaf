//! HTTPS client for the ticket SOAP API.
//!
//! This module provides the `SworksClient` struct, which builds a request
//! envelope for each operation, POSTs it to the configured endpoint and
//! decodes the response into the operation's typed result.
//!
//! # Transport
//!
//! - One POST per call, no retries.
//! - `Content-Type: text/xml;charset=UTF-8`.
//! - Timeout and certificate verification come from [`TransportOptions`]
//!   (300 s and disabled by default).
//!
//! # Faults
//!
//! The service reports business errors as a SOAP `Fault`, usually with HTTP
//! 200 and sometimes with HTTP 500. Both are decoded and surfaced as
//! `SworksError::Fault` by the named operations, or as `Decoded::Fault` by
//! [`SworksClient::call`].
//!
//! # Security
//!
//! The password travels inside the envelope. Envelopes are only logged at
//! trace level and with the password redacted.

use reqwest::{header, Client, StatusCode};

use crate::config::{Config, TransportOptions};
use crate::decode::{self, Decoded, SoapResponse};
use crate::envelope::{self, Operation};
use crate::error::SworksError;
use crate::models::{
    AttachmentResponse, ContactListResponse, CustomerListResponse, DeviceListResponse,
    QueueCountResponse, QueueTicketIdsResponse, TicketDetailResponse, UpdatesResponse,
};

/// Content type of every request.
const SOAP_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

/// Ticket type used when the caller does not pick one.
pub const DEFAULT_TICKET_TYPE: &str = "INCIDENT";

/// Work-log filter used when the caller does not pick one.
pub const DEFAULT_WORKLOGS: &str = "ALL";

/// Result count used when the caller does not pick one.
pub const DEFAULT_LIMIT: u32 = 25;

/// Largest result count the service documents. Larger values are sent
/// unchanged.
pub const MAX_LIMIT: u32 = 500;

/// Maximum length for HTTP error response bodies kept in errors.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Client for the ticket SOAP API.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_file("sworks.xml")?;
/// let client = SworksClient::new(&config)?;
///
/// let detail = client.get_ticket_detail("INC-12345").await?;
/// println!("{}", detail.ticket.status);
/// ```
#[derive(Clone)]
pub struct SworksClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Credentials and endpoint.
    /// SECURITY: Never log the password!
    config: Config,

    /// Delivery settings.
    options: TransportOptions,
}

impl SworksClient {
    /// Creates a client with the default transport options.
    ///
    /// # Errors
    ///
    /// Returns `SworksError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, SworksError> {
        Self::with_options(config, TransportOptions::default())
    }

    /// Creates a client with explicit transport options.
    pub fn with_options(config: &Config, options: TransportOptions) -> Result<Self, SworksError> {
        if options.accept_invalid_certs {
            tracing::debug!("Server certificate verification is disabled");
        }

        let http = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .map_err(SworksError::HttpClient)?;

        Ok(Self {
            http,
            config: config.clone(),
            options,
        })
    }

    /// Returns the credentials and endpoint this client uses.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the transport options this client uses.
    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// Invokes `operation` and decodes the response into `T` or a fault.
    ///
    /// `values` are the operation's parameters in descriptor order.
    ///
    /// # Errors
    ///
    /// Validation (wrong number of values), transport, HTTP status and
    /// decode failures. A SOAP fault is not an error here; it is returned as
    /// `Decoded::Fault`.
    pub async fn call<T: SoapResponse>(
        &self,
        operation: &Operation,
        values: &[&str],
    ) -> Result<Decoded<T>, SworksError> {
        let request = operation.envelope(&self.config, values)?;
        let (status, body) = self.post(operation, request).await?;

        if !status.is_success() {
            if let Ok(Some(fault)) = decode::decode_fault(operation.name, &body) {
                return Ok(Decoded::Fault(fault));
            }
            return Err(self.status_error(status, body));
        }

        decode::decode::<T>(operation.name, &body)
    }

    /// Invokes `operation`, turning a SOAP fault into `SworksError::Fault`.
    async fn invoke<T: SoapResponse>(
        &self,
        operation: &Operation,
        values: &[&str],
    ) -> Result<T, SworksError> {
        self.call::<T>(operation, values).await?.into_result()
    }

    /// POSTs an envelope and returns the status and reconstructed body.
    async fn post(
        &self,
        operation: &Operation,
        request: String,
    ) -> Result<(StatusCode, String), SworksError> {
        tracing::debug!(
            operation = operation.name,
            endpoint = %self.config.api_uri,
            "Sending SOAP request"
        );
        tracing::trace!(
            envelope = %SworksError::sanitize_message(&request, &self.config.password),
            "SOAP request envelope"
        );

        let response = self
            .http
            .post(&self.config.api_uri)
            .header(header::CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .body(request)
            .send()
            .await
            .map_err(|e| self.transport_error(operation, e))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| self.transport_error(operation, e))?;
        let body = self.options.body_mode.reconstruct(&raw);

        tracing::debug!(
            operation = operation.name,
            status = %status,
            bytes = body.len(),
            "Received SOAP response"
        );
        tracing::trace!(body = %body, "SOAP response body");

        Ok((status, body))
    }

    /// Classifies a reqwest failure, keeping the underlying cause.
    fn transport_error(&self, operation: &Operation, e: reqwest::Error) -> SworksError {
        tracing::debug!(
            operation = operation.name,
            error = %SworksError::sanitize_message(&e.to_string(), &self.config.password),
            "SOAP transport failure"
        );

        if e.is_timeout() {
            return SworksError::timeout(self.options.timeout, operation.name);
        }
        SworksError::Http(e)
    }

    /// Builds the error for a non-2xx response that carried no fault.
    fn status_error(&self, status: StatusCode, body: String) -> SworksError {
        let body = SworksError::sanitize_message(&body, &self.config.password);
        let body = if body.len() > MAX_ERROR_BODY_LEN {
            let mut end = MAX_ERROR_BODY_LEN;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...[truncated]", &body[..end])
        } else {
            body
        };

        tracing::warn!(status = %status, "Ticket service returned an HTTP error");
        SworksError::HttpStatus { status, body }
    }

    /// Lists the customers visible to the account.
    pub async fn list_customers(&self) -> Result<CustomerListResponse, SworksError> {
        self.invoke(&envelope::GET_CUSTOMER_LIST, &[]).await
    }

    /// Lists devices at the configured client and location.
    pub async fn list_devices(&self) -> Result<DeviceListResponse, SworksError> {
        let values = [self.config.client_id.as_str(), self.config.location_id.as_str()];
        self.invoke(&envelope::GET_DEVICE_LIST, &values).await
    }

    /// Lists contacts at the configured client and location.
    pub async fn list_contacts(&self) -> Result<ContactListResponse, SworksError> {
        let values = [self.config.client_id.as_str(), self.config.location_id.as_str()];
        self.invoke(&envelope::GET_CONTACTS, &values).await
    }

    /// Fetches one attachment of a ticket.
    ///
    /// The content is base64; see [`crate::models::Attachment::decode_content`].
    pub async fn get_attachment(
        &self,
        ticket_id: &str,
        attachment_id: &str,
    ) -> Result<AttachmentResponse, SworksError> {
        self.invoke(&envelope::GET_ATTACHMENT, &[ticket_id, attachment_id])
            .await
    }

    /// Gets full details of a single ticket, including its work logs.
    ///
    /// # Errors
    ///
    /// Returns `SworksError::Fault` if the service does not know the ticket.
    pub async fn get_ticket_detail(
        &self,
        ticket_id: &str,
    ) -> Result<TicketDetailResponse, SworksError> {
        self.invoke(&envelope::GET_TICKET_DETAIL, &[ticket_id]).await
    }

    /// Gets recently updated tickets.
    pub async fn get_updates(&self, params: &UpdatesParams) -> Result<UpdatesResponse, SworksError> {
        let limit = checked_limit(params.limit);
        let assigned = params.assigned_to_customer.to_string();
        let values = [
            params.ticket_type.as_str(),
            limit.as_str(),
            params.worklogs.as_str(),
            assigned.as_str(),
        ];
        self.invoke(&envelope::GET_UPDATES, &values).await
    }

    /// Counts the tickets of a type in the queue.
    pub async fn get_queue_count(&self, ticket_type: &str) -> Result<QueueCountResponse, SworksError> {
        self.invoke(&envelope::GET_QUEUE_COUNT, &[ticket_type]).await
    }

    /// Lists up to `limit` ticket ids of a type in the queue.
    pub async fn get_queue_ticket_ids(
        &self,
        ticket_type: &str,
        limit: u32,
    ) -> Result<QueueTicketIdsResponse, SworksError> {
        let limit = checked_limit(limit);
        self.invoke(&envelope::GET_QUEUE_TICKET_IDS, &[ticket_type, limit.as_str()])
            .await
    }
}

/// Renders a result-count limit, warning when it exceeds [`MAX_LIMIT`].
fn checked_limit(limit: u32) -> String {
    if limit > MAX_LIMIT {
        tracing::warn!(
            limit = limit,
            max = MAX_LIMIT,
            "Limit exceeds the documented maximum; sending it unchanged"
        );
    }
    limit.to_string()
}

/// Parameters for [`SworksClient::get_updates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatesParams {
    /// Ticket type (e.g. `INCIDENT`).
    pub ticket_type: String,

    /// Maximum number of tickets to return.
    pub limit: u32,

    /// Work-log filter (e.g. `ALL`).
    pub worklogs: String,

    /// Only tickets assigned to the customer.
    pub assigned_to_customer: bool,
}

impl Default for UpdatesParams {
    fn default() -> Self {
        Self {
            ticket_type: DEFAULT_TICKET_TYPE.to_string(),
            limit: DEFAULT_LIMIT,
            worklogs: DEFAULT_WORKLOGS.to_string(),
            assigned_to_customer: false,
        }
    }
}

impl UpdatesParams {
    /// Creates parameters with the defaults (`INCIDENT`, 25, `ALL`, not assigned).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ticket type.
    pub fn with_ticket_type(mut self, ticket_type: impl Into<String>) -> Self {
        self.ticket_type = ticket_type.into();
        self
    }

    /// Sets the maximum number of tickets to return.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the work-log filter.
    pub fn with_worklogs(mut self, worklogs: impl Into<String>) -> Self {
        self.worklogs = worklogs.into();
        self
    }

    /// Restricts the result to tickets assigned to the customer.
    pub fn with_assigned_to_customer(mut self, assigned: bool) -> Self {
        self.assigned_to_customer = assigned;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            username: "api-user".to_string(),
            password: "s3cret".to_string(),
            client_id: "100".to_string(),
            location_id: "200".to_string(),
            api_uri: "https://api.example.com/ticket".to_string(),
        }
    }

    #[test]
    fn test_updates_params_defaults() {
        let params = UpdatesParams::new();
        assert_eq!(params.ticket_type, "INCIDENT");
        assert_eq!(params.limit, 25);
        assert_eq!(params.worklogs, "ALL");
        assert!(!params.assigned_to_customer);
    }

    #[test]
    fn test_updates_params_builder() {
        let params = UpdatesParams::new()
            .with_ticket_type("CHANGE")
            .with_limit(100)
            .with_worklogs("NONE")
            .with_assigned_to_customer(true);
        assert_eq!(params.ticket_type, "CHANGE");
        assert_eq!(params.limit, 100);
        assert_eq!(params.worklogs, "NONE");
        assert!(params.assigned_to_customer);
    }

    #[test]
    fn test_checked_limit_passes_large_values_through() {
        assert_eq!(checked_limit(25), "25");
        assert_eq!(checked_limit(750), "750");
    }

    #[test]
    fn test_status_error_truncates_and_redacts() {
        let client = SworksClient::new(&test_config()).unwrap();
        let body = format!("<password>s3cret</password>{}", "x".repeat(2000));
        let err = client.status_error(StatusCode::BAD_GATEWAY, body);
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("[truncated]"));
        assert!(!msg.contains("s3cret"));
    }

    #[test]
    fn test_refused_connection_is_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = Config {
            api_uri: format!("http://127.0.0.1:{}/ticket", port),
            ..test_config()
        };
        let client = SworksClient::new(&config).unwrap();

        let err = tokio_test::block_on(client.get_ticket_detail("INC-1")).unwrap_err();
        assert!(matches!(err, SworksError::Http(_)));
        assert!(err.is_transport());

        tokio_test::block_on(async {
            let errors = [
                client.list_customers().await.unwrap_err(),
                client.list_devices().await.unwrap_err(),
                client.list_contacts().await.unwrap_err(),
                client.get_attachment("INC-1", "7").await.unwrap_err(),
                client.get_ticket_detail("INC-1").await.unwrap_err(),
                client.get_updates(&UpdatesParams::new()).await.unwrap_err(),
                client.get_queue_count("INCIDENT").await.unwrap_err(),
                client.get_queue_ticket_ids("INCIDENT", 25).await.unwrap_err(),
            ];
            for err in errors {
                assert!(err.is_transport(), "expected a transport error, got {err:?}");
            }
        });
    }

    #[test]
    fn test_traced_envelope_hides_escaped_password() {
        let config = Config {
            password: "p&ss<1".to_string(),
            ..test_config()
        };
        let request = envelope::GET_CUSTOMER_LIST.envelope(&config, &[]).unwrap();
        assert!(request.contains("p&amp;ss&lt;1"));

        let traced = SworksError::sanitize_message(&request, &config.password);
        assert!(traced.contains("<password>[REDACTED]</password>"));
        assert!(!traced.contains("p&amp;ss"));
    }

    #[test]
    fn test_call_rejects_wrong_parameter_count() {
        let client = SworksClient::new(&test_config()).unwrap();
        let err = tokio_test::block_on(
            client.call::<AttachmentResponse>(&envelope::GET_ATTACHMENT, &["INC-1"]),
        )
        .unwrap_err();
        assert!(matches!(err, SworksError::Validation(_)));
    }

    #[test]
    fn test_client_keeps_options() {
        let options = TransportOptions::new().with_verify_tls(true);
        let client = SworksClient::with_options(&test_config(), options).unwrap();
        assert!(!client.options().accept_invalid_certs);
        assert_eq!(client.config().username, "api-user");
    }
}
