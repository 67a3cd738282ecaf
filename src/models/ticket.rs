//! Ticket models for the ticket API.
//!
//! A ticket is returned by `getTicketDetail` (one) and `getUpdates` (many).
//! Timestamps are epoch integers exactly as the service sends them.

use serde::{Deserialize, Serialize};

use super::common::empty_as_default;
use super::IdName;

/// A service ticket (incident, service request, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    /// Attachment reference (`attachmentInfo`).
    pub attachment_info: IdName,

    /// Client the ticket belongs to.
    pub client: IdName,

    /// Contact that raised the ticket.
    pub contact: IdName,

    /// Closure time (epoch), 0 while open.
    #[serde(deserialize_with = "empty_as_default")]
    pub date_closed: i64,

    /// Creation time (epoch).
    #[serde(deserialize_with = "empty_as_default")]
    pub date_created: i64,

    /// Last modification time (epoch).
    #[serde(deserialize_with = "empty_as_default")]
    pub date_modified: i64,

    /// Long description.
    pub detailed_description: String,

    /// Device the ticket is about.
    pub devices: IdName,

    /// Origin of the event that raised the ticket.
    pub event_source: String,

    /// Whether the ticket is a child of a global ticket.
    #[serde(deserialize_with = "empty_as_default")]
    pub is_global_child: bool,

    /// Whether the ticket is a global parent.
    #[serde(deserialize_with = "empty_as_default")]
    pub is_global_parent: bool,

    /// Location of the client site.
    pub location: IdName,

    /// Reason text.
    pub reason: String,

    /// Party currently responsible for the ticket.
    pub responsible_party: String,

    /// Service name.
    pub service: String,

    /// Severity label.
    pub severity: String,

    /// Status label.
    pub status: String,

    /// Symptom description.
    pub symptom_description: String,

    /// Ticket identifier (e.g. `INC-12345`).
    pub ticket_id: String,

    /// Ticket type (e.g. `INCIDENT`).
    pub ticket_type: String,

    /// Ticket version.
    pub ticket_version: String,

    /// Work log entries in the order the service returned them.
    #[serde(rename = "worklogs")]
    pub work_logs: Vec<WorkLog>,
}

/// A timestamped note attached to a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkLog {
    /// Creation time (epoch).
    #[serde(deserialize_with = "empty_as_default")]
    pub date_created: i64,

    /// Note text.
    pub description: String,

    /// Work log type.
    #[serde(rename = "type")]
    pub log_type: String,
}

impl Ticket {
    /// Returns true if the ticket references an attachment.
    pub fn has_attachment(&self) -> bool {
        !self.attachment_info.is_empty()
    }

    /// Returns true if the ticket has been closed.
    pub fn is_closed(&self) -> bool {
        self.date_closed != 0
    }
}
