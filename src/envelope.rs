//! SOAP request envelope construction.
//!
//! Every remote operation is described by an [`Operation`]: its element
//! name in the `ser:` namespace and the ordered names of the parameters that
//! follow `userName` and `password`. A single builder renders any operation,
//! escaping every interpolated value.

use quick_xml::escape::escape;

use crate::config::Config;
use crate::error::SworksError;
use crate::models::{SERVICE_NS, SOAP_ENV_NS};

/// Descriptor of a remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Element name inside `soapenv:Body` (e.g. `getTicketDetail`).
    pub name: &'static str,

    /// Parameter element names, in schema order, after the credentials.
    pub params: &'static [&'static str],
}

/// `getCustomerList`: no parameters.
pub const GET_CUSTOMER_LIST: Operation = Operation {
    name: "getCustomerList",
    params: &[],
};

/// `getDeviceList`: client and location from the configuration.
pub const GET_DEVICE_LIST: Operation = Operation {
    name: "getDeviceList",
    params: &["clientId", "locationId"],
};

/// `getContacts`: client and location from the configuration.
pub const GET_CONTACTS: Operation = Operation {
    name: "getContacts",
    params: &["clientId", "locationId"],
};

/// `getAttachment`: ticket id, then attachment id.
pub const GET_ATTACHMENT: Operation = Operation {
    name: "getAttachment",
    params: &["ticketId", "attachmentId"],
};

/// `getTicketDetail`: ticket id.
pub const GET_TICKET_DETAIL: Operation = Operation {
    name: "getTicketDetail",
    params: &["ticketId"],
};

/// `getUpdates`: ticket type, limit, work-log filter, customer assignment.
pub const GET_UPDATES: Operation = Operation {
    name: "getUpdates",
    params: &["ticketType", "limit", "worklogs", "assignedToCustomer"],
};

/// `getQueueCount`: ticket type.
pub const GET_QUEUE_COUNT: Operation = Operation {
    name: "getQueueCount",
    params: &["ticketType"],
};

/// `getQueueTicketIds`: ticket type, then limit.
pub const GET_QUEUE_TICKET_IDS: Operation = Operation {
    name: "getQueueTicketIds",
    params: &["ticketType", "limit"],
};

/// All operations the client knows about.
pub const OPERATIONS: [Operation; 8] = [
    GET_CUSTOMER_LIST,
    GET_DEVICE_LIST,
    GET_CONTACTS,
    GET_ATTACHMENT,
    GET_TICKET_DETAIL,
    GET_UPDATES,
    GET_QUEUE_COUNT,
    GET_QUEUE_TICKET_IDS,
];

impl Operation {
    /// Renders the request envelope for this operation.
    ///
    /// `values` pairs up with [`Operation::params`] by position.
    ///
    /// # Errors
    ///
    /// Returns `SworksError::Validation` if the number of values does not
    /// match the number of parameters.
    pub fn envelope(&self, config: &Config, values: &[&str]) -> Result<String, SworksError> {
        if values.len() != self.params.len() {
            return Err(SworksError::validation(format!(
                "{} takes {} parameter(s), got {}",
                self.name,
                self.params.len(),
                values.len()
            )));
        }

        let mut xml = format!(
            "<soapenv:Envelope xmlns:soapenv=\"{}\" xmlns:ser=\"{}\">\n   <soapenv:Header/>\n   <soapenv:Body>\n      <ser:{}>\n",
            SOAP_ENV_NS, SERVICE_NS, self.name
        );

        push_param(&mut xml, "userName", &config.username);
        push_param(&mut xml, "password", &config.password);
        for (name, value) in self.params.iter().zip(values) {
            push_param(&mut xml, name, value);
        }

        xml.push_str(&format!(
            "      </ser:{}>\n   </soapenv:Body>\n</soapenv:Envelope>\n",
            self.name
        ));
        Ok(xml)
    }
}

fn push_param(xml: &mut String, name: &str, value: &str) {
    xml.push_str(&format!("         <{name}>{}</{name}>\n", escape(value)));
}
