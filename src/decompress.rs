//! Status list decompression.
//!
//! Status lists are compressed using DEFLATE ([RFC1951]) with the ZLIB
//! ([RFC1950]) data format. [`Decompressible`] strips the ZLIB envelope and
//! hands the raw DEFLATE stream to an [`Inflate`] implementation.
//!
//! [RFC1951]: <https://www.rfc-editor.org/rfc/rfc1951>
//! [RFC1950]: <https://www.rfc-editor.org/rfc/rfc1950>
use std::io::{self, Read};

use flate2::bufread::DeflateDecoder;

/// Length of the ZLIB header (`CMF` and `FLG` bytes).
pub const ZLIB_HEADER_LEN: usize = 2;

/// ZLIB compression method for DEFLATE.
const ZLIB_DEFLATE: u8 = 8;

/// ZLIB `FDICT` flag.
const ZLIB_PRESET_DICTIONARY: u8 = 0x20;

#[derive(Debug, thiserror::Error)]
pub enum DecompressionError {
    #[error("missing ZLIB header")]
    MissingHeader,

    #[error("invalid ZLIB header")]
    InvalidHeader,

    #[error("decompressed status list exceeds {0} bytes")]
    LimitExceeded(u64),

    #[error("DEFLATE decompression: {0}")]
    Inflate(#[from] io::Error),
}

/// Raw DEFLATE decompression capability.
pub trait Inflate {
    /// Decompresses a raw DEFLATE stream.
    ///
    /// If `limit` is given, the output must not exceed `limit` bytes, or
    /// [`DecompressionError::LimitExceeded`] is returned.
    fn inflate(&self, deflated: &[u8], limit: Option<u64>) -> Result<Vec<u8>, DecompressionError>;
}

impl<T: Inflate> Inflate for &T {
    fn inflate(&self, deflated: &[u8], limit: Option<u64>) -> Result<Vec<u8>, DecompressionError> {
        T::inflate(*self, deflated, limit)
    }
}

/// [`Inflate`] implementation backed by `flate2`.
///
/// The output buffer grows with the decompressed data.
#[derive(Debug, Default, Clone, Copy)]
pub struct Deflate;

impl Inflate for Deflate {
    fn inflate(&self, deflated: &[u8], limit: Option<u64>) -> Result<Vec<u8>, DecompressionError> {
        let mut decoder = DeflateDecoder::new(deflated);
        let mut buffer = Vec::with_capacity(deflated.len() * 4);

        match limit {
            Some(limit) => {
                // Read one extra byte to detect overflows.
                decoder
                    .by_ref()
                    .take(limit.saturating_add(1))
                    .read_to_end(&mut buffer)?;
                if buffer.len() as u64 > limit {
                    return Err(DecompressionError::LimitExceeded(limit));
                }
            }
            None => {
                decoder.read_to_end(&mut buffer)?;
            }
        }

        Ok(buffer)
    }
}

/// ZLIB compressed bytes.
///
/// Each lookup owns its own value, so nothing is shared between concurrent
/// lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressible {
    data: Vec<u8>,
}

impl Decompressible {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Validates and strips the ZLIB header, then inflates the remaining
    /// DEFLATE stream.
    ///
    /// The trailing Adler-32 checksum is not checked.
    pub fn decompress(
        &self,
        inflate: &impl Inflate,
        limit: Option<u64>,
    ) -> Result<Vec<u8>, DecompressionError> {
        inflate.inflate(self.deflated()?, limit)
    }

    fn deflated(&self) -> Result<&[u8], DecompressionError> {
        let [cmf, flg, deflated @ ..] = self.data.as_slice() else {
            return Err(DecompressionError::MissingHeader);
        };

        let check = (u16::from(*cmf) << 8) | u16::from(*flg);
        if cmf & 0x0f != ZLIB_DEFLATE || check % 31 != 0 || flg & ZLIB_PRESET_DICTIONARY != 0 {
            return Err(DecompressionError::InvalidHeader);
        }

        Ok(deflated)
    }
}

impl From<Vec<u8>> for Decompressible {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
