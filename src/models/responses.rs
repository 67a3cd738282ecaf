//! Typed response envelopes, one per remote operation.
//!
//! Each type mirrors the element the service places inside `soap:Body`
//! (e.g. `getTicketDetailResponse`) and keeps the body text it was decoded
//! from in `raw_xml` for diagnostics.

use serde::{Deserialize, Serialize};

use super::common::empty_as_default;
use super::{Attachment, Device, Envelope, IdName, Ticket};
use crate::decode::SoapResponse;

/// Implements [`SoapResponse`] for a payload type found at
/// `Body > $element` in the response.
macro_rules! soap_response {
    ($ty:ty, $element:literal) => {
        impl SoapResponse for $ty {
            const ELEMENT: &'static str = $element;

            fn from_body(xml: &str) -> Result<Option<Self>, quick_xml::DeError> {
                #[derive(Deserialize)]
                struct Body {
                    #[serde(rename = $element, default)]
                    payload: Option<$ty>,
                }

                let envelope: Envelope<Body> = quick_xml::de::from_str(xml)?;
                Ok(envelope.body.payload)
            }

            fn set_raw_xml(&mut self, raw_xml: String) {
                self.raw_xml = raw_xml;
            }
        }
    };
}

/// Response of `getCustomerList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerListResponse {
    /// Customers visible to the account.
    #[serde(rename = "clientInfo", default)]
    pub customers: Vec<IdName>,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

/// Response of `getDeviceList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceListResponse {
    /// Devices at the configured client/location.
    #[serde(rename = "device", default)]
    pub devices: Vec<Device>,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

/// Response of `getContacts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactListResponse {
    /// Contacts at the configured client/location.
    #[serde(rename = "getContactList", default)]
    pub contacts: Vec<IdName>,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

/// Response of `getAttachment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentResponse {
    /// The attachment.
    #[serde(default)]
    pub attachment: Attachment,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

/// Response of `getTicketDetail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDetailResponse {
    /// The requested ticket.
    #[serde(rename = "ticketDetail", default)]
    pub ticket: Ticket,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

/// Response of `getUpdates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatesResponse {
    /// Updated tickets, in service order.
    #[serde(rename = "ticket", default)]
    pub tickets: Vec<Ticket>,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

/// Response of `getQueueCount`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueCountResponse {
    /// Number of tickets in the queue.
    #[serde(default, deserialize_with = "empty_as_default")]
    pub count: u64,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

/// Response of `getQueueTicketIds`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTicketIdsResponse {
    /// Ticket ids in the queue.
    #[serde(rename = "ticketId", default)]
    pub ticket_ids: Vec<String>,

    /// The body text this response was decoded from.
    #[serde(skip)]
    pub raw_xml: String,
}

soap_response!(CustomerListResponse, "getCustomerListResponse");
soap_response!(DeviceListResponse, "getDeviceListResponse");
soap_response!(ContactListResponse, "getContactsResponse");
soap_response!(AttachmentResponse, "getAttachmentResponse");
soap_response!(TicketDetailResponse, "getTicketDetailResponse");
soap_response!(UpdatesResponse, "getUpdatesResponse");
soap_response!(QueueCountResponse, "getQueueCountResponse");
soap_response!(QueueTicketIdsResponse, "getQueueTicketIdsResponse");
