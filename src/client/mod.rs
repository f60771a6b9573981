//! Status List Token retrieval.
use iref::UriRef;

use crate::{StatusError, StatusListTokenClaims, TokenFormat};

mod fetcher;
pub use fetcher::{FetchOptions, StatusListTokenFetcher};

mod http;
pub use http::{HttpError, HttpGet, HttpResponse};

mod verifier;
pub use verifier::{Unverified, VerifyStatusListTokenSignature};

/// Status List Token claims provider.
///
/// Implementations return claims that were validated against `uri` and whose
/// token signature was verified. [`StatusListTokenFetcher`] is the network
/// implementation; callers may substitute their own (caching, alternate
/// transports).
pub trait FetchStatusClaims {
    #[allow(async_fn_in_trait)]
    async fn fetch_status_claims(
        &self,
        uri: &UriRef,
        format: TokenFormat,
        clock_skew: chrono::Duration,
    ) -> Result<StatusListTokenClaims, StatusError>;
}

impl<T: FetchStatusClaims> FetchStatusClaims for &T {
    async fn fetch_status_claims(
        &self,
        uri: &UriRef,
        format: TokenFormat,
        clock_skew: chrono::Duration,
    ) -> Result<StatusListTokenClaims, StatusError> {
        T::fetch_status_claims(*self, uri, format, clock_skew).await
    }
}
