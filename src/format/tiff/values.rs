//! Tag value decoding.
//!
//! Values are stored either inline in the 4-byte value field of the IFD
//! entry (when `type size * count <= 4`) or at an absolute offset in the
//! buffer that the field points to. [`fits_inline`] is the only place that
//! decision is made.
//!
//! Every decoding step reports through one result type: the walker calls
//! [`ValueDecoder::decode`] and inserts the value if it is present.

use tracing::trace;

use crate::error::DecodeError;
use crate::io::ByteReader;
use crate::metadata::TagValue;

use super::parser::IfdEntry;
use super::tags::{fits_inline, FieldType};

// =============================================================================
// ValueDecoder
// =============================================================================

/// Decodes IFD entry values from a TIFF buffer.
#[derive(Debug, Clone, Copy)]
pub struct ValueDecoder<'a> {
    reader: ByteReader<'a>,
}

impl<'a> ValueDecoder<'a> {
    /// Create a decoder over the reader's buffer.
    pub fn new(reader: ByteReader<'a>) -> Self {
        Self { reader }
    }

    /// Decode an entry's value, or `None` if it cannot be decoded.
    ///
    /// Out-of-bounds reads and unsupported type/count combinations both come
    /// back as `None`; neither is an error for the caller.
    pub fn decode(&self, entry: &IfdEntry) -> Option<TagValue> {
        match self.try_decode(entry) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(tag = entry.tag_id, error = %err, "skipping undecodable entry");
                None
            }
        }
    }

    /// Decode an entry's value, reporting why it failed.
    pub fn try_decode(&self, entry: &IfdEntry) -> Result<TagValue, DecodeError> {
        let unsupported = || DecodeError::UnsupportedType {
            field_type: entry.field_type_raw,
            count: entry.count,
        };

        let field_type = entry.field_type.ok_or_else(unsupported)?;
        let location = self.value_location(entry);
        let reader = &self.reader;

        match (field_type, entry.count) {
            (FieldType::Byte, 1) => Ok(TagValue::Integer(reader.read_u8(location)? as u32)),
            (FieldType::Ascii, count) if count > 0 => {
                let bytes = reader.slice(location, count as u64 - 1)?;
                Ok(TagValue::Text(decode_ascii(bytes)))
            }
            (FieldType::Short, 1) => Ok(TagValue::Integer(reader.read_u16(location)? as u32)),
            (FieldType::Long, 1) => Ok(TagValue::Integer(reader.read_u32(location)?)),
            (FieldType::Rational, 1) => Ok(TagValue::Float(self.read_rational(location)?)),
            (FieldType::Rational, 3) => Ok(TagValue::Triplet([
                self.read_rational(location)?,
                self.read_rational(location + 8)?,
                self.read_rational(location + 16)?,
            ])),
            _ => Err(unsupported()),
        }
    }

    /// Absolute position of the entry's value in the buffer.
    fn value_location(&self, entry: &IfdEntry) -> u64 {
        if entry.value_byte_size().is_some_and(fits_inline) {
            entry.value_field_position
        } else {
            entry.value_offset(self.reader.byte_order()) as u64
        }
    }

    /// Read one numerator/denominator pair and divide it.
    fn read_rational(&self, offset: u64) -> Result<f64, DecodeError> {
        let numerator = self.reader.read_u32(offset)?;
        let denominator = self.reader.read_u32(offset + 4)?;
        Ok(rational_to_f64(numerator, denominator))
    }
}

/// Divide a rational, mapping a zero denominator to 0.
#[inline]
pub fn rational_to_f64(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Text up to the first NUL, lossily decoded and trimmed.
fn decode_ascii(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim().to_string()
}

// =============================================================================
// Tests
// =============================================================================
