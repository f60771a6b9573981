//! Status values.
//!
//! See: <https://www.ietf.org/archive/id/draft-ietf-oauth-status-list-10.html#section-7.1>
use core::fmt;

use crate::{APPLICATION_SPECIFIC, APPLICATION_SPECIFIC_RANGE, INVALID, SUSPENDED, VALID};

/// Semantic status of a Referenced Token.
///
/// Every byte value maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialStatus {
    /// The token is valid, correct or legal.
    Valid,

    /// The token is revoked. This state is irreversible.
    Invalid,

    /// The token is temporarily invalid. This state is reversible.
    Suspended,

    /// Value reserved for application specific use (`0x03` or
    /// `0x0b`..=`0x0f`).
    ApplicationSpecific(u8),

    /// Value reserved for future use.
    Reserved(u8),
}

impl CredentialStatus {
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Valid => VALID,
            Self::Invalid => INVALID,
            Self::Suspended => SUSPENDED,
            Self::ApplicationSpecific(value) | Self::Reserved(value) => value,
        }
    }

    pub fn from_byte(value: u8) -> Self {
        match value {
            VALID => Self::Valid,
            INVALID => Self::Invalid,
            SUSPENDED => Self::Suspended,
            v if is_application_specific(v) => Self::ApplicationSpecific(v),
            v => Self::Reserved(v),
        }
    }

    /// Checks if the token can be accepted, i.e. its status is
    /// [`Self::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

fn is_application_specific(value: u8) -> bool {
    value == APPLICATION_SPECIFIC || APPLICATION_SPECIFIC_RANGE.contains(&value)
}

impl From<u8> for CredentialStatus {
    fn from(value: u8) -> Self {
        Self::from_byte(value)
    }
}

impl From<CredentialStatus> for u8 {
    fn from(value: CredentialStatus) -> Self {
        value.to_byte()
    }
}

impl fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
            Self::Suspended => write!(f, "suspended"),
            Self::ApplicationSpecific(v) => write!(f, "application-specific({v:#04x})"),
            Self::Reserved(v) => write!(f, "reserved({v:#04x})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CredentialStatus;

    #[test]
    fn to_byte() {
        assert_eq!(CredentialStatus::Valid.to_byte(), 0x00);
        assert_eq!(CredentialStatus::Invalid.to_byte(), 0x01);
        assert_eq!(CredentialStatus::Suspended.to_byte(), 0x02);
        assert_eq!(CredentialStatus::ApplicationSpecific(100).to_byte(), 100);
        assert_eq!(CredentialStatus::Reserved(200).to_byte(), 200);
    }

    #[test]
    fn from_byte() {
        assert_eq!(CredentialStatus::from_byte(0x00), CredentialStatus::Valid);
        assert_eq!(CredentialStatus::from_byte(0x01), CredentialStatus::Invalid);
        assert_eq!(CredentialStatus::from_byte(0x02), CredentialStatus::Suspended);
        assert_eq!(
            CredentialStatus::from_byte(0x03),
            CredentialStatus::ApplicationSpecific(0x03)
        );
        assert_eq!(
            CredentialStatus::from_byte(0x04),
            CredentialStatus::Reserved(0x04)
        );
    }

    #[test]
    fn total_mapping() {
        for byte in 0..=u8::MAX {
            let status = CredentialStatus::from_byte(byte);
            assert_eq!(status.to_byte(), byte);
            assert_eq!(CredentialStatus::from_byte(status.to_byte()), status);

            match byte {
                0x00 => assert_eq!(status, CredentialStatus::Valid),
                0x01 => assert_eq!(status, CredentialStatus::Invalid),
                0x02 => assert_eq!(status, CredentialStatus::Suspended),
                0x03 | 0x0b..=0x0f => {
                    assert_eq!(status, CredentialStatus::ApplicationSpecific(byte))
                }
                _ => assert_eq!(status, CredentialStatus::Reserved(byte)),
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!(CredentialStatus::Valid.to_string(), "valid");
        assert_eq!(
            CredentialStatus::ApplicationSpecific(0x0b).to_string(),
            "application-specific(0x0b)"
        );
        assert_eq!(CredentialStatus::Reserved(0xff).to_string(), "reserved(0xff)");
    }
}
