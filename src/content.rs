//! Data-URL codec for stored file content.
//!
//! Uploads arrive as `data:<mime>;base64,<payload>` strings and are stored
//! verbatim. The download endpoint turns them back into raw bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ContentError {
    #[error("data URL has no ',' separating header and payload")]
    MissingSeparator,

    #[error("data URL is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Decoded form of a data URL
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    /// Media type from the header, empty when the header omits it
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encode raw bytes as a base64 data URL
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a base64 data URL. A bare base64 string without the `data:` header
/// is accepted too.
pub fn decode_data_url(content: &str) -> Result<DataUrl, ContentError> {
    let (mime, payload) = match content.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest.split_once(',').ok_or(ContentError::MissingSeparator)?;
            let mime = header.strip_suffix(";base64").ok_or(ContentError::NotBase64)?;
            (mime.to_string(), payload)
        }
        None => (String::new(), content),
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ContentError::InvalidBase64(e.to_string()))?;

    Ok(DataUrl { mime, bytes })
}
