//! Compact JWT parsing.
//!
//! Only the structure of the token is checked here. Signature verification is
//! delegated to a [`crate::client::VerifyStatusListTokenSignature`]
//! implementation.
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde_json::{Map, Value};

use crate::StatusError;

/// Base64url engine accepting both padded and unpadded input.
pub const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Compact serialization of a JWT, with each segment decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactJwt {
    /// JOSE header.
    pub header: Map<String, Value>,

    /// Payload bytes.
    pub payload: Vec<u8>,

    /// Signature bytes.
    pub signature: Vec<u8>,
}

impl CompactJwt {
    /// Parses a compact JWT.
    ///
    /// Fails with [`StatusError::InvalidJwt`] if the token does not have
    /// exactly three segments, if any segment is not valid base64url or if the
    /// header is not a JSON object.
    pub fn parse(token: &str) -> Result<Self, StatusError> {
        let mut segments = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(StatusError::InvalidJwt);
        };

        let header = decode_segment(header)?;
        let payload = decode_segment(payload)?;
        let signature = decode_segment(signature)?;

        match serde_json::from_slice(&header) {
            Ok(Value::Object(header)) => Ok(Self {
                header,
                payload,
                signature,
            }),
            _ => Err(StatusError::InvalidJwt),
        }
    }

    /// Returns the `typ` header parameter, if any.
    pub fn type_(&self) -> Option<&str> {
        self.header.get("typ").and_then(Value::as_str)
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, StatusError> {
    BASE64_URL
        .decode(segment)
        .map_err(|_| StatusError::InvalidJwt)
}
