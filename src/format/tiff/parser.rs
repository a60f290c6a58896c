//! TIFF header and IFD entry parsing.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A for TIFF, vendor values for some RAW formats)
//! Bytes 4-7: Offset to first IFD (4 bytes)
//! ```
//!
//! # IFD Entry Structure (12 bytes)
//!
//! ```text
//! Bytes 0-1:  Tag id
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Value count
//! Bytes 8-11: Value, or offset to the value when it does not fit
//! ```

use tracing::debug;

use crate::error::{DecodeError, TiffError};
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteReader};

use super::tags::FieldType;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for standard TIFF
pub const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: u64 = 12;

/// Size of the entry count field at the start of an IFD
pub const IFD_COUNT_SIZE: u64 = 2;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF stream.
///
/// Determined once from the first two bytes of the stream and used for
/// every multi-byte value that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Detect the byte order from the two marker bytes at the start of a stream.
    pub fn from_marker(bytes: [u8; 2]) -> Result<Self, TiffError> {
        // Read as little-endian because we're matching byte patterns
        let magic = u16::from_le_bytes(bytes);
        match magic {
            BYTE_ORDER_LITTLE_ENDIAN => Ok(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Ok(ByteOrder::BigEndian),
            _ => Err(TiffError::InvalidMagic(magic)),
        }
    }

    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the stream
    pub byte_order: ByteOrder,

    /// Version word (42 for TIFF; ORF and RW2 use their own values)
    pub version: u16,

    /// Offset to the first IFD, relative to the start of the stream
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of `bytes`.
    ///
    /// Only the byte order marker is validated. The version word is recorded
    /// but not enforced, and the first IFD offset is not checked here: an
    /// offset past the end simply yields an empty walk.
    ///
    /// # Errors
    /// - `FileTooSmall` if there are fewer than 8 bytes
    /// - `InvalidMagic` if the byte order bytes are not II or MM
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        let too_small = || TiffError::FileTooSmall {
            required: TIFF_HEADER_SIZE as u64,
            actual: bytes.len() as u64,
        };

        // Marker first, so a short non-TIFF buffer still reports InvalidMagic
        let byte_order = match bytes {
            [a, b, ..] => ByteOrder::from_marker([*a, *b])?,
            _ => return Err(too_small()),
        };

        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(too_small());
        }

        let version = byte_order.read_u16(&bytes[2..4]);
        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]);

        if version != VERSION_TIFF {
            debug!(version, "non-standard TIFF version word, walking anyway");
        }

        Ok(TiffHeader {
            byte_order,
            version,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte IFD entry.
///
/// Entries only live while their directory is being decoded; the value
/// field is kept raw because its meaning depends on the value size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag id
    pub tag_id: u16,

    /// Field type if it is one we decode
    pub field_type: Option<FieldType>,

    /// Field type as stored in the file
    pub field_type_raw: u16,

    /// Number of values
    pub count: u32,

    /// Raw value/offset field
    pub value_offset_bytes: [u8; 4],

    /// Absolute position of the value/offset field in the buffer
    pub value_field_position: u64,
}

impl IfdEntry {
    /// Read the entry that starts at `position`.
    ///
    /// Fails with `OutOfBounds` if the full 12 bytes are not available.
    pub fn read(reader: &ByteReader<'_>, position: u64) -> Result<Self, DecodeError> {
        let bytes = reader.slice(position, IFD_ENTRY_SIZE)?;
        let byte_order = reader.byte_order();

        let tag_id = byte_order.read_u16(&bytes[0..2]);
        let field_type_raw = byte_order.read_u16(&bytes[2..4]);
        let count = byte_order.read_u32(&bytes[4..8]);
        let value_offset_bytes = [bytes[8], bytes[9], bytes[10], bytes[11]];

        Ok(IfdEntry {
            tag_id,
            field_type: FieldType::from_u16(field_type_raw),
            field_type_raw,
            count,
            value_offset_bytes,
            value_field_position: position + 8,
        })
    }

    /// Interpret the value field as a 32-bit offset.
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.read_u32(&self.value_offset_bytes)
    }

    /// Total size of the value in bytes, or `None` for unknown field types.
    pub fn value_byte_size(&self) -> Option<u64> {
        self.field_type
            .map(|ft| ft.size_in_bytes() as u64 * self.count as u64)
    }
}

// =============================================================================
// Tests
// =============================================================================
