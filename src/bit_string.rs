//! Status list bit array.
//!
//! A status list is a byte array holding the statuses of many Referenced
//! Tokens, each encoded on 1, 2, 4 or 8 bits. Statuses never cross byte
//! boundaries and are stored starting from the least significant bit of each
//! byte.
//!
//! See: <https://www.ietf.org/archive/id/draft-ietf-oauth-status-list-10.html#section-4>
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
#[error("invalid status size {0}, expected 1, 2, 4 or 8")]
pub struct InvalidStatusSize(pub u8);

/// Number of bits per Referenced Token in a Status List.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BitsPerStatus {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl BitsPerStatus {
    /// Returns the number of bits per status.
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// Returns the number of statuses per status list byte.
    pub const fn status_per_byte(&self) -> usize {
        8 / self.bits() as usize
    }

    /// Returns the bit-mask necessary to extract a status.
    pub const fn status_mask(&self) -> u8 {
        match self {
            Self::One => 0b1,
            Self::Two => 0b11,
            Self::Four => 0b1111,
            Self::Eight => 0b11111111,
        }
    }

    /// Returns the byte index storing the given status index in a status list
    /// with this status size, along with the intra-byte offset.
    pub const fn offset_of(&self, index: usize) -> (usize, u32) {
        let spb = self.status_per_byte();
        (index / spb, ((index % spb) * self.bits() as usize) as u32)
    }

    /// Extracts the status stored at `bit_offset` in `byte`.
    fn read_status_byte(&self, byte: u8, bit_offset: u32) -> u8 {
        (byte & (self.status_mask() << bit_offset)) >> bit_offset
    }
}

impl TryFrom<u8> for BitsPerStatus {
    type Error = InvalidStatusSize;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            other => Err(InvalidStatusSize(other)),
        }
    }
}

impl From<BitsPerStatus> for u8 {
    fn from(value: BitsPerStatus) -> Self {
        value.bits()
    }
}

impl Serialize for BitsPerStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> serde::Deserialize<'de> for BitsPerStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u8::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Reads the status at `index` in `bytes`.
///
/// Returns `None` if the index falls outside of the byte array.
pub fn read_status(bytes: &[u8], bits: BitsPerStatus, index: usize) -> Option<u8> {
    let (byte_position, bit_offset) = bits.offset_of(index);
    bytes
        .get(byte_position)
        .map(|byte| bits.read_status_byte(*byte, bit_offset))
}

/// Decompressed status list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusList {
    bits: BitsPerStatus,
    bytes: Vec<u8>,
}

impl StatusList {
    /// Creates a new status list from a status size and byte array.
    pub fn from_parts(bits: BitsPerStatus, bytes: Vec<u8>) -> Self {
        Self { bits, bytes }
    }

    /// Returns the status bit-size.
    pub fn bits_per_status(&self) -> BitsPerStatus {
        self.bits
    }

    /// Checks if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the length of the list (number of statuses).
    pub fn len(&self) -> usize {
        self.bytes.len() * self.bits.status_per_byte()
    }

    /// Returns `index`-th status in the list.
    pub fn get(&self, index: usize) -> Option<u8> {
        read_status(&self.bytes, self.bits, index)
    }

    /// Returns an iterator over all the statuses stored in this list.
    pub fn iter(&self) -> StatusListIter<'_> {
        StatusListIter {
            list: self,
            index: 0,
        }
    }

    /// Returns this list as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the list and returns the status size and underlying byte
    /// array.
    pub fn into_parts(self) -> (BitsPerStatus, Vec<u8>) {
        (self.bits, self.bytes)
    }
}

/// Iterator over the statuses of a [`StatusList`], in index order.
pub struct StatusListIter<'a> {
    list: &'a StatusList,
    index: usize,
}

impl<'a> Iterator for StatusListIter<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.get(self.index).inspect(|_| {
            self.index += 1;
        })
    }
}
