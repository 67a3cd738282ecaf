//! Response decoding.
//!
//! Every response body goes through two passes:
//!
//! 1. a fault pass, decoding `Body > Fault` into [`SoapFault`];
//! 2. if no fault is present, a success pass, decoding
//!    `Body > <operation>Response` into the operation's response type.
//!
//! The result is a [`Decoded`] value that is exactly one of success or fault.
//! A body that carries neither is a [`SworksError::MissingResponse`], never
//! a silently empty success.

use serde::{Deserialize, Serialize};

use crate::error::SworksError;
use crate::models::{Envelope, FaultBody, SoapFault};

/// A response type decoded from a SOAP body.
pub trait SoapResponse: Sized {
    /// Local name of the response element inside `Body`.
    const ELEMENT: &'static str;

    /// Decodes `Body > ELEMENT` from a full envelope.
    ///
    /// Returns `Ok(None)` if the element is absent.
    fn from_body(xml: &str) -> Result<Option<Self>, quick_xml::DeError>;

    /// Stores the body text the value was decoded from.
    fn set_raw_xml(&mut self, raw_xml: String);
}

/// How the response body is turned into the text handed to the decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyMode {
    /// Use the body exactly as received.
    #[default]
    Exact,

    /// Split the body on whitespace and rejoin the tokens with single
    /// spaces. Newlines and indentation inside text content collapse to one
    /// space, and leading/trailing whitespace is dropped.
    CollapseWhitespace,
}

impl BodyMode {
    /// Applies this mode to a raw response body.
    pub fn reconstruct(self, raw: &str) -> String {
        match self {
            BodyMode::Exact => raw.to_string(),
            BodyMode::CollapseWhitespace => raw.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

/// Outcome of decoding one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The operation's response element.
    Success(T),

    /// A SOAP fault reported by the service.
    Fault(SoapFault),
}

impl<T> Decoded<T> {
    /// Returns true if the body was a fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, Decoded::Fault(_))
    }

    /// Converts the outcome into a Result, mapping a fault to
    /// `SworksError::Fault`.
    pub fn into_result(self) -> Result<T, SworksError> {
        match self {
            Decoded::Success(value) => Ok(value),
            Decoded::Fault(fault) => Err(SworksError::Fault(fault)),
        }
    }
}

/// Decodes only the fault pass of a body.
///
/// # Errors
///
/// Returns `SworksError::Decode` if the body is not a SOAP envelope.
pub fn decode_fault(operation: &str, body: &str) -> Result<Option<SoapFault>, SworksError> {
    let envelope: Envelope<FaultBody> =
        quick_xml::de::from_str(body).map_err(|e| SworksError::decode(operation, e))?;
    Ok(envelope.body.fault)
}

/// Decodes a response body for `operation` into `T` or a fault.
///
/// # Errors
///
/// - `SworksError::Decode` if the body is not well-formed or a field has the
///   wrong type.
/// - `SworksError::MissingResponse` if the body has neither a fault nor
///   `T::ELEMENT`.
pub fn decode<T: SoapResponse>(operation: &str, body: &str) -> Result<Decoded<T>, SworksError> {
    if let Some(fault) = decode_fault(operation, body)? {
        tracing::debug!(
            operation = operation,
            fault_code = %fault.fault_code,
            "Service returned a SOAP fault"
        );
        return Ok(Decoded::Fault(fault));
    }

    let payload = T::from_body(body).map_err(|e| SworksError::decode(operation, e))?;

    match payload {
        Some(mut value) => {
            value.set_raw_xml(body.to_string());
            Ok(Decoded::Success(value))
        }
        None => Err(SworksError::missing_response(operation, T::ELEMENT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QueueCountResponse, TicketDetailResponse};

    const FAULT_BODY: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
<soap:Body>
<soap:Fault>
<faultcode>Client</faultcode>
<faultstring>Invalid ticket</faultstring>
<detail><ns2:faultInfo xmlns:ns2="http://service.ticket.api.mod.secureworks.com/"><faultCode>E001</faultCode><reason>not found</reason></ns2:faultInfo></detail>
</soap:Fault>
</soap:Body>
</soap:Envelope>"#;

    const COUNT_BODY: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
<soap:Body>
<ns2:getQueueCountResponse xmlns:ns2="http://service.ticket.api.mod.secureworks.com/"><count>17</count></ns2:getQueueCountResponse>
</soap:Body>
</soap:Envelope>"#;

    #[test]
    fn test_collapse_whitespace() {
        let raw = "  <a>\n  line one\n\tline two  </a>\n";
        assert_eq!(
            BodyMode::CollapseWhitespace.reconstruct(raw),
            "<a> line one line two </a>"
        );
    }

    #[test]
    fn test_exact_keeps_body() {
        let raw = "<a>\nline</a>\n";
        assert_eq!(BodyMode::Exact.reconstruct(raw), raw);
    }

    #[test]
    fn test_decode_success() {
        let decoded: Decoded<QueueCountResponse> = decode("getQueueCount", COUNT_BODY).unwrap();
        match decoded {
            Decoded::Success(resp) => {
                assert_eq!(resp.count, 17);
                assert_eq!(resp.raw_xml, COUNT_BODY);
            }
            Decoded::Fault(f) => panic!("unexpected fault: {f}"),
        }
    }

    #[test]
    fn test_decode_ticket_with_empty_close_date() {
        let body = r#"<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/"><S:Body>
<ns2:getTicketDetailResponse xmlns:ns2="http://service.ticket.api.mod.secureworks.com/">
<ticketDetail><dateClosed/><ticketId>INC-1</ticketId></ticketDetail>
</ns2:getTicketDetailResponse>
</S:Body></S:Envelope>"#;

        let resp = decode::<TicketDetailResponse>("getTicketDetail", body)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(resp.ticket.date_closed, 0);
        assert_eq!(resp.ticket.ticket_id, "INC-1");
    }

    #[test]
    fn test_decode_fault_takes_precedence() {
        let decoded: Decoded<TicketDetailResponse> = decode("getTicketDetail", FAULT_BODY).unwrap();
        assert!(decoded.is_fault());

        let err = decoded.into_result().unwrap_err();
        let fault = err.fault().expect("fault error");
        assert_eq!(fault.fault_code, "Client");
        assert_eq!(fault.fault_string, "Invalid ticket");
        assert_eq!(fault.detail.fault_info.fault_code, "E001");
        assert_eq!(fault.detail.fault_info.reason, "not found");
    }

    #[test]
    fn test_decode_success_body_has_no_fault() {
        assert_eq!(decode_fault("getQueueCount", COUNT_BODY).unwrap(), None);
    }

    #[test]
    fn test_decode_wrong_element_is_missing_response() {
        let err = decode::<TicketDetailResponse>("getTicketDetail", COUNT_BODY).unwrap_err();
        assert!(matches!(
            err,
            SworksError::MissingResponse { ref element, .. } if element == "getTicketDetailResponse"
        ));
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode::<QueueCountResponse>("getQueueCount", "<html><body>oops").unwrap_err();
        assert!(matches!(err, SworksError::Decode { .. }));
    }
}
