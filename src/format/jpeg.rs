//! JPEG marker handling.
//!
//! EXIF metadata in a JPEG lives in an APP1 segment whose payload starts
//! with the identifier `Exif\0\0`, followed by a complete TIFF stream. This
//! module walks the marker segments at the head of a JPEG to find it.
//!
//! # Segment Layout
//!
//! ```text
//! FF D8                     SOI
//! FF Ex LL LL <payload>     APPn, LLLL = big-endian length including itself
//! ...
//! FF DA ...                 SOS: entropy-coded data follows, stop here
//! ```

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 1 (Exif/XMP) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Identifier at the start of an Exif APP1 payload
pub const EXIF_IDENTIFIER: &[u8] = b"Exif\0\0";

/// Whether `data` starts with a JPEG start-of-image marker.
#[inline]
pub fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&SOI)
}

/// Whether a marker byte stands alone, without a length field.
fn is_standalone(marker: u8) -> bool {
    // TEM, RST0-RST7, SOI, EOI
    marker == 0x01 || (0xD0..=0xD9).contains(&marker)
}

/// Locate the TIFF stream inside a JPEG's Exif APP1 segment.
///
/// Returns the bytes after the `Exif\0\0` identifier, up to the end of the
/// segment. Returns `None` when the data is not a JPEG, has no Exif segment
/// before the first scan, or a segment length runs past the end.
pub fn find_exif_payload(data: &[u8]) -> Option<&[u8]> {
    if !is_jpeg(data) {
        return None;
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];

        // Fill bytes before a marker
        if marker == 0xFF {
            pos += 1;
            continue;
        }

        if [0xFF, marker] == SOS || [0xFF, marker] == EOI {
            return None;
        }

        if is_standalone(marker) {
            pos += 2;
            continue;
        }

        if pos + 4 > data.len() {
            return None;
        }
        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let segment_end = pos + 2 + length;
        if length < 2 || segment_end > data.len() {
            return None;
        }

        let payload = &data[pos + 4..segment_end];
        if [0xFF, marker] == APP1 && payload.starts_with(EXIF_IDENTIFIER) {
            return Some(&payload[EXIF_IDENTIFIER.len()..]);
        }

        pos = segment_end;
    }

    None
}

// =============================================================================
// Tests
// =============================================================================
