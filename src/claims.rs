//! Status List Token claims.
//!
//! See: <https://www.ietf.org/archive/id/draft-ietf-oauth-status-list-10.html#name-status-list-token-in-jwt-fo>
use std::time::Duration;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    decompress::{Decompressible, Inflate},
    jwt::BASE64_URL,
    numeric_date::NumericDate,
    BitsPerStatus, StatusError, StatusList,
};

/// Claims of a Status List Token.
///
/// Claims unrelated to status lists (`iss`, `kid`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusListTokenClaims {
    /// URI of the Status List Token. Must match the URI it was fetched from.
    #[serde(rename = "sub")]
    pub subject: String,

    /// Time at which the Status List Token was issued.
    #[serde(rename = "iat")]
    pub issued_at: NumericDate,

    /// Time at which the Status List Token is considered expired by its
    /// issuer.
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<NumericDate>,

    /// Status list.
    pub status_list: StatusListClaim,

    /// Maximum amount of time the token may be cached by a consumer before a
    /// fresh copy should be retrieved.
    #[serde(rename = "ttl", default, skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<TimeToLive>,
}

impl StatusListTokenClaims {
    /// Validates the claims against the URI the token was fetched from and the
    /// current date, with a `clock_skew` tolerance.
    ///
    /// The claims are returned unchanged on success.
    pub fn ensure_valid(
        self,
        expected_uri: &str,
        now: DateTime<Utc>,
        clock_skew: chrono::Duration,
    ) -> Result<Self, StatusError> {
        self.ensure_subject(expected_uri)?;
        self.ensure_time_bounds(now, clock_skew)?;
        Ok(self)
    }

    /// Checks that the subject of the token is the URI it was fetched from.
    pub fn ensure_subject(&self, expected_uri: &str) -> Result<(), StatusError> {
        if self.subject == expected_uri {
            Ok(())
        } else {
            Err(StatusError::BadSubject(self.subject.clone()))
        }
    }

    /// Checks that the token is neither expired nor issued in the future.
    ///
    /// The sign of `clock_skew` is ignored: the tolerance always widens the
    /// accepted window.
    pub fn ensure_time_bounds(
        &self,
        now: DateTime<Utc>,
        clock_skew: chrono::Duration,
    ) -> Result<(), StatusError> {
        let clock_skew = clock_skew.abs();

        if let Some(exp) = self.expiration_time {
            let expired_at = exp.to_date_time().map_err(StatusError::decoding)?;
            let earliest = now
                .checked_sub_signed(clock_skew)
                .unwrap_or(DateTime::<Utc>::MIN_UTC);

            if expired_at < earliest {
                return Err(StatusError::ExpiredToken { expired_at, now });
            }
        }

        let issued_at = self.issued_at.to_date_time().map_err(StatusError::decoding)?;
        let latest = now
            .checked_add_signed(clock_skew)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        if issued_at > latest {
            return Err(StatusError::InvalidIssueDate { issued_at, now });
        }

        Ok(())
    }

    pub fn time_to_live(&self) -> Option<Duration> {
        self.time_to_live.map(TimeToLive::into_duration)
    }
}

/// Time to live claim, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeToLive(pub u64);

impl TimeToLive {
    pub fn into_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

/// JSON Status List.
///
/// See: <https://www.ietf.org/archive/id/draft-ietf-oauth-status-list-10.html#name-status-list-in-json-format>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusListClaim {
    /// Number of bits per Referenced Token in `lst`.
    #[serde(rename = "bits")]
    pub bits_per_status: BitsPerStatus,

    /// Base64url encoded, ZLIB compressed status values.
    #[serde(rename = "lst")]
    pub compressed_list: String,

    /// URI to retrieve the Status List Aggregation for this type of
    /// Referenced Token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_uri: Option<String>,
}

impl StatusListClaim {
    /// Decodes and decompresses the list.
    ///
    /// Fails with [`StatusError::BadBytes`] if `lst` is not valid base64url or
    /// cannot be decompressed.
    pub fn decode(&self, inflate: &impl Inflate, limit: Option<u64>) -> Result<StatusList, StatusError> {
        let compressed = BASE64_URL.decode(&self.compressed_list).map_err(|e| {
            log::debug!("invalid base64url status list: {e}");
            StatusError::BadBytes
        })?;

        let bytes = Decompressible::new(compressed)
            .decompress(inflate, limit)
            .map_err(|e| {
                log::debug!("unable to decompress status list: {e}");
                StatusError::BadBytes
            })?;

        Ok(StatusList::from_parts(self.bits_per_status, bytes))
    }
}
