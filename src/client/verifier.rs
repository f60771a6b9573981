use core::fmt;
use std::convert::Infallible;

use chrono::{DateTime, Utc};

use crate::TokenFormat;

/// Status List Token signature verification capability.
///
/// The cryptography (algorithms, key resolution) lives outside of this crate.
pub trait VerifyStatusListTokenSignature {
    type Error: fmt::Display;

    /// Verifies the signature of the raw `token` at the given date.
    #[allow(async_fn_in_trait)]
    async fn verify_status_list_token(
        &self,
        token: &str,
        format: TokenFormat,
        date_time: DateTime<Utc>,
    ) -> Result<(), Self::Error>;
}

impl<T: VerifyStatusListTokenSignature> VerifyStatusListTokenSignature for &T {
    type Error = T::Error;

    async fn verify_status_list_token(
        &self,
        token: &str,
        format: TokenFormat,
        date_time: DateTime<Utc>,
    ) -> Result<(), Self::Error> {
        T::verify_status_list_token(*self, token, format, date_time).await
    }
}

/// Accepts every token without checking its signature.
///
/// Only use this when the status list is trusted by other means.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unverified;

impl VerifyStatusListTokenSignature for Unverified {
    type Error = Infallible;

    async fn verify_status_list_token(
        &self,
        _token: &str,
        format: TokenFormat,
        _date_time: DateTime<Utc>,
    ) -> Result<(), Self::Error> {
        log::warn!("{format} status list token signature not verified");
        Ok(())
    }
}
