//! Status references found in Referenced Tokens.
use iref::{UriRef, UriRefBuf};
use serde::{Deserialize, Serialize};

use crate::STATUS;

#[derive(Debug, thiserror::Error)]
pub enum InvalidStatusReference {
    #[error("empty status list URI")]
    Empty,

    #[error("invalid status list URI `{0}`")]
    Uri(String),
}

/// Reference to a status in a Status List Token.
///
/// This is the `status_list` member of a Referenced Token's `status` claim.
///
/// See: <https://www.ietf.org/archive/id/draft-ietf-oauth-status-list-10.html#section-6.2>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStatusReference")]
pub struct StatusReference {
    /// Index to check for status information in the Status List for the
    /// current Referenced Token.
    pub idx: usize,

    /// Identifies the Status List Token containing the status information for
    /// the Referenced Token.
    pub uri: UriRefBuf,
}

impl StatusReference {
    pub fn new(idx: usize, uri: UriRefBuf) -> Self {
        Self { idx, uri }
    }

    /// Creates a reference from a raw URI string.
    ///
    /// The string is kept as is. It only needs to be a non-empty URI
    /// reference: whether it can actually be fetched is checked when the
    /// status is retrieved.
    pub fn from_str_uri(idx: usize, uri: &str) -> Result<Self, InvalidStatusReference> {
        if uri.is_empty() {
            return Err(InvalidStatusReference::Empty);
        }

        let uri = UriRefBuf::new(uri.as_bytes().to_vec())
            .map_err(|_| InvalidStatusReference::Uri(uri.to_owned()))?;

        Ok(Self { idx, uri })
    }

    pub fn uri(&self) -> &UriRef {
        &self.uri
    }
}

#[derive(Deserialize)]
struct RawStatusReference {
    idx: usize,
    uri: String,
}

impl TryFrom<RawStatusReference> for StatusReference {
    type Error = InvalidStatusReference;

    fn try_from(value: RawStatusReference) -> Result<Self, Self::Error> {
        Self::from_str_uri(value.idx, &value.uri)
    }
}

/// Status claim value of a Referenced Token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusClaim {
    pub status_list: StatusReference,
}

impl StatusClaim {
    /// Extracts the `status` claim from a Referenced Token's decoded claims.
    ///
    /// Returns `Ok(None)` if the claim is absent.
    pub fn from_claims(claims: &serde_json::Value) -> Result<Option<Self>, serde_json::Error> {
        claims
            .get(STATUS)
            .map(Self::deserialize)
            .transpose()
    }
}
