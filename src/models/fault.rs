//! SOAP fault model.
//!
//! The ticket service reports business errors (unknown ticket, bad
//! credentials, ...) as a SOAP 1.1 `Fault` inside an HTTP 200 response:
//!
//! ```xml
//! <soap:Body>
//!   <soap:Fault>
//!     <faultcode>soap:Client</faultcode>
//!     <faultstring>Invalid ticket</faultstring>
//!     <detail>
//!       <ns2:faultInfo>
//!         <faultCode>E001</faultCode>
//!         <reason>not found</reason>
//!       </ns2:faultInfo>
//!     </detail>
//!   </soap:Fault>
//! </soap:Body>
//! ```

use serde::{Deserialize, Serialize};

/// A SOAP fault reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoapFault {
    /// SOAP fault code (e.g. `soap:Client`).
    #[serde(rename = "faultcode", default)]
    pub fault_code: String,

    /// Human readable fault string.
    #[serde(rename = "faultstring", default)]
    pub fault_string: String,

    /// Service specific detail block.
    #[serde(default)]
    pub detail: FaultDetail,
}

/// The `detail` element of a fault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultDetail {
    /// Service fault information.
    #[serde(rename = "faultInfo", default)]
    pub fault_info: FaultInfo,
}

/// The `faultInfo` element inside a fault's detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultInfo {
    /// Service specific error code.
    #[serde(rename = "faultCode", default)]
    pub fault_code: String,

    /// Reason given by the service.
    #[serde(default)]
    pub reason: String,
}

/// `Body` shape used for the fault decode pass.
///
/// Any other element in the body is ignored, so decoding a success body
/// yields `fault: None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaultBody {
    /// The fault, if the body carries one.
    #[serde(rename = "Fault", default)]
    pub fault: Option<SoapFault>,
}

impl std::fmt::Display for SoapFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} (detail {}: {})",
            self.fault_code,
            self.fault_string,
            self.detail.fault_info.fault_code,
            self.detail.fault_info.reason
        )
    }
}

impl SoapFault {
    /// Renders the fault the way the command-line tools print server errors.
    pub fn report(&self, operation: &str) -> String {
        format!(
            "Server Error ({})\n\tFaultCode: {}\n\tFaultString: {}\n\tFaultInfo\n\t\tFaultCode: {}\n\t\tReason: {}\n",
            operation,
            self.fault_code,
            self.fault_string,
            self.detail.fault_info.fault_code,
            self.detail.fault_info.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault() -> SoapFault {
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
    fn test_display() {
        assert_eq!(
            fault().to_string(),
            "Client: Invalid ticket (detail E001: not found)"
        );
    }

    #[test]
    fn test_report_lists_every_field() {
        let report = fault().report("getTicketDetail");
        assert!(report.starts_with("Server Error (getTicketDetail)"));
        assert!(report.contains("FaultCode: Client"));
        assert!(report.contains("FaultString: Invalid ticket"));
        assert!(report.contains("FaultCode: E001"));
        assert!(report.contains("Reason: not found"));
    }
}
