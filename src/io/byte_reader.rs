use crate::error::DecodeError;
use crate::format::tiff::ByteOrder;

/// Bounds-checked, endian-aware reader over an in-memory buffer.
///
/// Every read is checked against the buffer length before touching it, so
/// a corrupt offset turns into a [`DecodeError::OutOfBounds`] for the entry
/// being decoded instead of a panic. The reader borrows the buffer and never
/// mutates it.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> ByteReader<'a> {
    /// Create a reader over `data` using `byte_order` for multi-byte values.
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self { data, byte_order }
    }

    /// Byte order used for multi-byte reads.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: u64, len: u64) -> Result<&'a [u8], DecodeError> {
        let out_of_bounds = || DecodeError::OutOfBounds {
            offset,
            len,
            size: self.data.len() as u64,
        };

        let end = offset.checked_add(len).ok_or_else(out_of_bounds)?;
        if end > self.data.len() as u64 {
            return Err(out_of_bounds());
        }

        Ok(&self.data[offset as usize..end as usize])
    }

    /// Read an unsigned 8-bit value.
    pub fn read_u8(&self, offset: u64) -> Result<u8, DecodeError> {
        Ok(self.slice(offset, 1)?[0])
    }

    /// Read an unsigned 16-bit value in the reader's byte order.
    pub fn read_u16(&self, offset: u64) -> Result<u16, DecodeError> {
        let bytes = self.slice(offset, 2)?;
        Ok(self.byte_order.read_u16(bytes))
    }

    /// Read an unsigned 32-bit value in the reader's byte order.
    pub fn read_u32(&self, offset: u64) -> Result<u32, DecodeError> {
        let bytes = self.slice(offset, 4)?;
        Ok(self.byte_order.read_u32(bytes))
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// Unchecked helpers used by `ByteOrder`. Callers must have validated the
// slice length, which `ByteReader` always does.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
