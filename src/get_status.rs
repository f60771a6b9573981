use iref::UriRef;
use log::debug;

use crate::{
    client::FetchStatusClaims,
    decompress::{Deflate, Inflate},
    CredentialStatus, StatusError, StatusReference, TokenFormat,
};

/// Resolves status references into [`CredentialStatus`] values.
///
/// Claims retrieval is injected at each call through [`FetchStatusClaims`].
/// Every call decodes its own copy of the status list, so a single
/// `GetStatus` can serve concurrent lookups.
#[derive(Debug, Clone)]
pub struct GetStatus<I = Deflate> {
    inflate: I,
    limit: Option<u64>,
}

impl GetStatus {
    pub fn new() -> Self {
        Self {
            inflate: Deflate,
            limit: None,
        }
    }
}

impl Default for GetStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> GetStatus<I> {
    /// Replaces the DEFLATE implementation.
    pub fn with_inflate<J>(self, inflate: J) -> GetStatus<J> {
        GetStatus {
            inflate,
            limit: self.limit,
        }
    }

    /// Sets the maximum size of a decompressed status list, in bytes.
    ///
    /// Larger lists are rejected rather than truncated.
    pub fn with_limit(self, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }
}

impl<I: Inflate> GetStatus<I> {
    /// Returns the status stored at `index` in the status list published at
    /// `uri`.
    pub async fn get_status(
        &self,
        index: usize,
        uri: &UriRef,
        format: TokenFormat,
        fetch_claims: &impl FetchStatusClaims,
        clock_skew: chrono::Duration,
    ) -> Result<CredentialStatus, StatusError> {
        let claims = fetch_claims
            .fetch_status_claims(uri, format, clock_skew)
            .await?;

        let list = claims.status_list.decode(&self.inflate, self.limit)?;
        debug!(
            "status list `{}` holds {} statuses",
            claims.subject,
            list.len()
        );

        let value = list.get(index).ok_or_else(|| {
            debug!("index {index} out of bounds");
            StatusError::BadBytes
        })?;

        Ok(CredentialStatus::from_byte(value))
    }

    /// Returns the status designated by `reference`.
    pub async fn get_status_of(
        &self,
        reference: &StatusReference,
        format: TokenFormat,
        fetch_claims: &impl FetchStatusClaims,
        clock_skew: chrono::Duration,
    ) -> Result<CredentialStatus, StatusError> {
        self.get_status(
            reference.idx,
            reference.uri(),
            format,
            fetch_claims,
            clock_skew,
        )
        .await
    }
}
