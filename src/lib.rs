//! Client for the IETF Token Status List.
//!
//! A Referenced Token (typically a credential) carries a `status` claim
//! pointing to an entry in a Status List Token published by its issuer. This
//! crate resolves such a reference into a [`CredentialStatus`]:
//!
//! 1. the Status List Token is fetched from its URI
//!    ([`client::StatusListTokenFetcher`]);
//! 2. the compact JWT is parsed ([`jwt::CompactJwt`]), its claims are
//!    validated ([`claims::StatusListTokenClaims::ensure_valid`]) and its
//!    signature is checked by an injected
//!    [`client::VerifyStatusListTokenSignature`] implementation;
//! 3. the compressed status list is decoded and decompressed
//!    ([`decompress::Decompressible`]);
//! 4. the status bits at the requested index are extracted
//!    ([`bit_string::read_status`]) and mapped to a [`CredentialStatus`].
//!
//! [`GetStatus`] drives the whole pipeline.
//!
//! ```no_run
//! use token_status_client::{
//!     client::{StatusListTokenFetcher, Unverified},
//!     GetStatus, StatusReference, TokenFormat,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let reference = StatusReference::from_str_uri(1, "https://example.com/statuslists/1")?;
//! let fetcher = StatusListTokenFetcher::new(Unverified);
//!
//! let status = GetStatus::new()
//!     .get_status_of(&reference, TokenFormat::Jwt, &fetcher, chrono::Duration::minutes(1))
//!     .await?;
//!
//! println!("{status}");
//! # Ok(())
//! # }
//! ```
//!
//! See: <https://www.ietf.org/archive/id/draft-ietf-oauth-status-list-10.html>
pub mod bit_string;
pub mod claims;
pub mod client;
pub mod decompress;
mod error;
pub mod format;
pub mod get_status;
pub mod jwt;
pub mod numeric_date;
pub mod reference;
pub mod status;

pub use bit_string::{read_status, BitsPerStatus, StatusList};
pub use claims::StatusListTokenClaims;
pub use error::StatusError;
pub use format::TokenFormat;
pub use get_status::GetStatus;
pub use reference::{StatusClaim, StatusReference};
pub use status::CredentialStatus;

/// Version of the Token Status List draft implemented by this crate.
pub const SPEC_VERSION: &str = "draft-10";

/// Name of the claim holding a [`StatusClaim`] in a Referenced Token.
pub const STATUS: &str = "status";

/// Name of the status list claim, both in a Referenced Token's `status` claim
/// and in a Status List Token.
pub const STATUS_LIST: &str = "status_list";

/// Name of the index member of a [`StatusReference`].
pub const IDX: &str = "idx";

/// Name of the URI member of a [`StatusReference`].
pub const URI: &str = "uri";

/// Name of the bits-per-status member of a status list.
pub const BITS: &str = "bits";

/// Name of the compressed list member of a status list.
pub const LIST: &str = "lst";

/// Name of the optional aggregation URI member of a status list.
pub const AGGREGATION_URI: &str = "aggregation_uri";

/// Name of the time-to-live claim of a Status List Token.
pub const TIME_TO_LIVE: &str = "ttl";

/// Status value describing a Token that is valid, correct or legal.
///
/// See: <https://www.ietf.org/archive/id/draft-ietf-oauth-status-list-10.html#section-7.1>
pub const VALID: u8 = 0x00;

/// Status value describing a Token that is revoked, annulled, taken back,
/// recalled or cancelled.
///
/// This state is irreversible.
pub const INVALID: u8 = 0x01;

/// Status value describing a Token that is temporarily invalid, hanging,
/// debarred from privilege.
///
/// This state is reversible.
pub const SUSPENDED: u8 = 0x02;

/// Status value reserved for application specific use.
pub const APPLICATION_SPECIFIC: u8 = 0x03;

/// Range of status values reserved for application specific use.
pub const APPLICATION_SPECIFIC_RANGE: std::ops::RangeInclusive<u8> = 0x0b..=0x0f;

/// Type of a JWT representing a status list.
///
/// This is the required value of the JWT Header's `typ` field.
pub const MEDIA_SUBTYPE_STATUS_LIST_JWT: &str = "statuslist+jwt";

/// Media type requested when fetching a JWT Status List Token.
pub const MEDIA_TYPE_STATUS_LIST_JWT: &str = "application/statuslist+jwt";

/// Type of a CWT representing a status list.
pub const MEDIA_SUBTYPE_STATUS_LIST_CWT: &str = "statuslist+cwt";

/// Media type requested when fetching a CWT Status List Token.
pub const MEDIA_TYPE_STATUS_LIST_CWT: &str = "application/statuslist+cwt";

/// `User-Agent` header sent when fetching Status List Tokens.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
