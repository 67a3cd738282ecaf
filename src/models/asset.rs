//! Device and attachment models.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::common::empty_as_default;
use super::IdName;
use crate::error::SworksError;

/// A managed device, as listed by `getDeviceList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    /// Owning client.
    pub client: IdName,

    /// Alias shown in the portal.
    pub device_alias: String,

    /// Numeric device id.
    #[serde(deserialize_with = "empty_as_default")]
    pub device_id: i64,

    /// Management IP address.
    pub device_ip: String,

    /// Host name.
    pub device_name: String,

    /// Site the device is installed at.
    pub location: IdName,
}

/// A ticket attachment, as returned by `getAttachment`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    /// Base64 encoded file content.
    pub content: String,

    /// Original file name.
    pub filename: String,

    /// MD5 checksum reported by the service.
    pub md5_sum: String,
}

impl Attachment {
    /// Decodes the base64 content into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `SworksError::Attachment` if the content is not valid base64.
    pub fn decode_content(&self) -> Result<Vec<u8>, SworksError> {
        // Long payloads are line-wrapped by the service.
        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        Ok(STANDARD.decode(compact)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_content() {
        let attachment = Attachment {
            content: "aGVsbG8gd29y\nbGQ=".to_string(),
            filename: "hello.txt".to_string(),
            md5_sum: String::new(),
        };
        assert_eq!(attachment.decode_content().unwrap(), b"hello world");
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        let attachment = Attachment {
            content: "not*base64".to_string(),
            ..Default::default()
        };
        let err = attachment.decode_content().unwrap_err();
        assert!(matches!(err, SworksError::Attachment(_)));
    }

    #[test]
    fn test_device_decodes() {
        let xml = r#"<device>
            <client><id>1</id><name>Acme</name></client>
            <deviceAlias>fw-edge</deviceAlias>
            <deviceId>55</deviceId>
            <deviceIp>10.0.0.1</deviceIp>
            <deviceName>fw01</deviceName>
            <location><id>2</id><name>HQ</name></location>
        </device>"#;
        let device: Device = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(device.device_id, 55);
        assert_eq!(device.device_alias, "fw-edge");
        assert_eq!(device.location, IdName::new(2, "HQ"));
    }
}
