use core::fmt;

use crate::{
    MEDIA_SUBTYPE_STATUS_LIST_CWT, MEDIA_SUBTYPE_STATUS_LIST_JWT, MEDIA_TYPE_STATUS_LIST_CWT,
    MEDIA_TYPE_STATUS_LIST_JWT,
};

/// Serialization of a Status List Token.
///
/// Only [`TokenFormat::Jwt`] can be processed. [`TokenFormat::Cwt`] is
/// recognized but every lookup using it fails with
/// [`crate::StatusError::CwtNotSupported`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFormat {
    #[default]
    Jwt,
    Cwt,
}

impl TokenFormat {
    /// Media type sent in the `Accept` header when fetching a token in this
    /// format.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Jwt => MEDIA_TYPE_STATUS_LIST_JWT,
            Self::Cwt => MEDIA_TYPE_STATUS_LIST_CWT,
        }
    }

    /// Expected token type (JOSE `typ` header or COSE content type).
    pub fn media_subtype(&self) -> &'static str {
        match self {
            Self::Jwt => MEDIA_SUBTYPE_STATUS_LIST_JWT,
            Self::Cwt => MEDIA_SUBTYPE_STATUS_LIST_CWT,
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt => write!(f, "jwt"),
            Self::Cwt => write!(f, "cwt"),
        }
    }
}
