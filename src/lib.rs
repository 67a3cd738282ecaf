//! # sworks
//!
//! sworks is a command-line client for the SecureWorks ticket SOAP API.
//!
//! It lists customers, devices and contacts, fetches ticket details, recent
//! updates and attachments, and reports queue sizes. Each operation builds a
//! SOAP 1.1 envelope, POSTs it over HTTPS, and decodes the XML response into
//! a typed result.
//!
//! ## Architecture
//!
//! - [`config`] - Credential/endpoint model and transport options
//! - [`error`] - Error types with password redaction
//! - [`envelope`] - Operation descriptors and the request envelope builder
//! - [`decode`] - Body reconstruction and fault-first response decoding
//! - [`models`] - Response envelopes, tickets, work logs, devices, faults
//! - [`sworks_client`] - HTTPS transport and one method per operation
//! - [`output`] - Long/short/CSV/JSON rendering for the CLI
//!
//! ## Faults
//!
//! The service signals errors with a SOAP `Fault` body rather than an HTTP
//! status. Every response is checked for a fault before it is decoded as a
//! success, and a fault is returned as
//! [`SworksError::Fault`](error::SworksError::Fault) carrying the fault
//! code, fault string, detail code and detail reason.
//!
//! ## Security Considerations
//!
//! - The password is sent in clear text inside the envelope, as the service
//!   requires. It is never logged and is redacted from error messages.
//! - Server certificate verification is disabled by default because the
//!   service's certificate does not validate. Turn it on with
//!   [`TransportOptions::with_verify_tls`](config::TransportOptions::with_verify_tls)
//!   or `--verify-tls`.
//! - Every value placed in an envelope is XML-escaped.
//!
//! ## Example
//!
//! ```ignore
//! use sworks::config::Config;
//! use sworks::sworks_client::SworksClient;
//!
//! async fn example() -> Result<(), sworks::error::SworksError> {
//!     let config = Config::from_file("sworks.xml")?;
//!     let client = SworksClient::new(&config)?;
//!
//!     let queue = client.get_queue_ticket_ids("INCIDENT", 25).await?;
//!     for id in &queue.ticket_ids {
//!         let detail = client.get_ticket_detail(id).await?;
//!         println!("{}: {}", id, detail.ticket.status);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod models;
pub mod output;
pub mod sworks_client;
