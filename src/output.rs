//! Text rendering of operation results for the command line.
//!
//! Tickets can be shown in long form (details and work logs), short form
//! (details only), as CSV, or as work logs only. Lists are rendered as CSV
//! with a header line.

use serde::Serialize;

use crate::models::{Attachment, Device, IdName, Ticket};

/// How tickets are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketView {
    /// All fields followed by the work logs.
    Long,
    /// All fields, no work logs.
    Short,
    /// CSV header and one row.
    Csv,
    /// Work logs only.
    WorkLogs,
}

/// Quotes a CSV field if it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the ticket fields, one `Name: value` line each.
pub fn format_ticket_details(ticket: &Ticket) -> String {
    let mut output = String::new();
    output.push_str(&format!("Attachment: {}\n", ticket.attachment_info));
    output.push_str(&format!("Client: {}\n", ticket.client));
    output.push_str(&format!("Contact: {}\n", ticket.contact));
    output.push_str(&format!("DateClosed: {}\n", ticket.date_closed));
    output.push_str(&format!("DateCreated: {}\n", ticket.date_created));
    output.push_str(&format!("DateModified: {}\n", ticket.date_modified));
    output.push_str(&format!(
        "DetailedDescription: {}\n",
        ticket.detailed_description
    ));
    output.push_str(&format!("Devices: {}\n", ticket.devices));
    output.push_str(&format!("EventSource: {}\n", ticket.event_source));
    output.push_str(&format!("IsGlobalChild: {}\n", ticket.is_global_child));
    output.push_str(&format!("IsGlobalParent: {}\n", ticket.is_global_parent));
    output.push_str(&format!("Location: {}\n", ticket.location));
    output.push_str(&format!("Reason: {}\n", ticket.reason));
    output.push_str(&format!("ResponsibleParty: {}\n", ticket.responsible_party));
    output.push_str(&format!("Service: {}\n", ticket.service));
    output.push_str(&format!("Severity: {}\n", ticket.severity));
    output.push_str(&format!("Status: {}\n", ticket.status));
    output.push_str(&format!(
        "SymptomDescription: {}\n",
        ticket.symptom_description
    ));
    output.push_str(&format!("TicketId: {}\n", ticket.ticket_id));
    output.push_str(&format!("TicketType: {}\n", ticket.ticket_type));
    output.push_str(&format!("TicketVersion: {}\n", ticket.ticket_version));
    output
}

/// Renders the work logs as `DateCreated,Description` CSV.
pub fn format_work_logs(ticket: &Ticket) -> String {
    let mut output = String::from("DateCreated,Description\n");
    for log in &ticket.work_logs {
        output.push_str(&format!(
            "{},{}\n",
            log.date_created,
            csv_field(&log.description)
        ));
    }
    output
}

/// Renders a ticket as a CSV header and one row.
pub fn format_ticket_csv(ticket: &Ticket) -> String {
    const HEADER: &str = "AttachmentName,AttachmentId,ClientName,ClientId,ContactName,ContactId,\
DateClosed,DateCreated,DateModified,DetailedDescription,DeviceName,DeviceId,EventSource,\
IsGlobalChild,IsGlobalParent,LocationName,LocationId,Reason,ResponsibleParty,Service,Severity,\
Status,SymptomDescription,TicketId,TicketType,TicketVersion,WorkLogs";

    let row = [
        csv_field(&ticket.attachment_info.name),
        ticket.attachment_info.id.to_string(),
        csv_field(&ticket.client.name),
        ticket.client.id.to_string(),
        csv_field(&ticket.contact.name),
        ticket.contact.id.to_string(),
        ticket.date_closed.to_string(),
        ticket.date_created.to_string(),
        ticket.date_modified.to_string(),
        csv_field(&ticket.detailed_description),
        csv_field(&ticket.devices.name),
        ticket.devices.id.to_string(),
        csv_field(&ticket.event_source),
        ticket.is_global_child.to_string(),
        ticket.is_global_parent.to_string(),
        csv_field(&ticket.location.name),
        ticket.location.id.to_string(),
        csv_field(&ticket.reason),
        csv_field(&ticket.responsible_party),
        csv_field(&ticket.service),
        csv_field(&ticket.severity),
        csv_field(&ticket.status),
        csv_field(&ticket.symptom_description),
        csv_field(&ticket.ticket_id),
        csv_field(&ticket.ticket_type),
        csv_field(&ticket.ticket_version),
        ticket.work_logs.len().to_string(),
    ];

    format!("{}\n{}\n", HEADER, row.join(","))
}

/// Renders a ticket in the requested view.
pub fn format_ticket(ticket: &Ticket, view: TicketView) -> String {
    match view {
        TicketView::Long => format!(
            "{}WorkLogs:\n{}",
            format_ticket_details(ticket),
            format_work_logs(ticket)
        ),
        TicketView::Short => format_ticket_details(ticket),
        TicketView::Csv => format_ticket_csv(ticket),
        TicketView::WorkLogs => format_work_logs(ticket),
    }
}

/// Renders id/name pairs (customers, contacts) as `Id,Name` CSV.
pub fn format_id_names(entries: &[IdName]) -> String {
    let mut output = String::from("Id,Name\n");
    for entry in entries {
        output.push_str(&format!("{},{}\n", entry.id, csv_field(&entry.name)));
    }
    output
}

/// Renders devices as `Id,Device` CSV using the device alias.
pub fn format_devices(devices: &[Device]) -> String {
    let mut output = String::from("Id,Device\n");
    for device in devices {
        output.push_str(&format!(
            "{},{}\n",
            device.device_id,
            csv_field(&device.device_alias)
        ));
    }
    output
}

/// Renders an attachment's fields without decoding the content.
pub fn format_attachment(attachment: &Attachment) -> String {
    format!(
        "Content: {}\nFilename: {}\nmd5Sum: {}\n",
        attachment.content, attachment.filename, attachment.md5_sum
    )
}

/// Renders any serializable result as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
