//! Format detection for image files.
//!
//! Detection looks at magic bytes first. RAW formats that are plain TIFF on
//! the outside (NEF, ARW, DNG, PEF, SRW) cannot be told apart from a TIFF by
//! content alone, so an optional file extension hint promotes a TIFF to RAW.
//!
//! Files that match nothing are rejected with
//! [`FormatError::UnsupportedFormat`].

use serde::Serialize;

use crate::error::FormatError;

use super::jpeg::is_jpeg;

// =============================================================================
// ImageFormat
// =============================================================================

/// Camera RAW container families that can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RawKind {
    /// Canon CR2
    Cr2,
    /// Canon CR3 (ISO base media)
    Cr3,
    /// Fujifilm RAF
    Raf,
    /// Olympus ORF
    Orf,
    /// Panasonic RW2
    Rw2,
    /// TIFF-structured RAW identified by extension (NEF, ARW, DNG, ...)
    TiffBased,
}

/// Detected image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    /// JPEG / JFIF / Exif
    Jpeg,
    /// PNG
    Png,
    /// GIF
    Gif,
    /// WebP
    WebP,
    /// Windows bitmap
    Bmp,
    /// TIFF
    Tiff,
    /// Camera RAW container
    Raw(RawKind),
}

impl ImageFormat {
    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::WebP => "WEBP",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Raw(RawKind::Cr2) => "Canon CR2",
            ImageFormat::Raw(RawKind::Cr3) => "Canon CR3",
            ImageFormat::Raw(RawKind::Raf) => "Fujifilm RAF",
            ImageFormat::Raw(RawKind::Orf) => "Olympus ORF",
            ImageFormat::Raw(RawKind::Rw2) => "Panasonic RW2",
            ImageFormat::Raw(RawKind::TiffBased) => "Camera RAW",
        }
    }

    /// MIME type.
    pub const fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Raw(RawKind::Cr2) => "image/x-canon-cr2",
            ImageFormat::Raw(RawKind::Cr3) => "image/x-canon-cr3",
            ImageFormat::Raw(RawKind::Raf) => "image/x-fuji-raf",
            ImageFormat::Raw(RawKind::Orf) => "image/x-olympus-orf",
            ImageFormat::Raw(RawKind::Rw2) => "image/x-panasonic-rw2",
            ImageFormat::Raw(RawKind::TiffBased) => "image/x-raw",
        }
    }

    /// Whether this is a camera RAW container.
    pub const fn is_raw(&self) -> bool {
        matches!(self, ImageFormat::Raw(_))
    }

    /// Whether the file itself is a TIFF stream that can be walked directly.
    pub const fn is_tiff_structured(&self) -> bool {
        matches!(
            self,
            ImageFormat::Tiff
                | ImageFormat::Raw(RawKind::Cr2)
                | ImageFormat::Raw(RawKind::Orf)
                | ImageFormat::Raw(RawKind::Rw2)
                | ImageFormat::Raw(RawKind::TiffBased)
        )
    }
}

// =============================================================================
// Format Detection
// =============================================================================

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const RAF_SIGNATURE: &[u8] = b"FUJIFILMCCD-RAW";

/// Extensions of RAW formats that are plain TIFF on the outside.
const TIFF_RAW_EXTENSIONS: &[&str] = &[
    "nef", "nrw", "arw", "srf", "sr2", "dng", "pef", "srw", "cr2", "orf", "rw2", "raf", "cr3",
];

/// Detect the format of `data`.
///
/// # Arguments
/// * `data` - The file contents (at least the first 16 bytes)
/// * `extension` - Optional file extension, without the dot, any case
///
/// # Errors
/// `FormatError::UnsupportedFormat` if no known signature matches.
pub fn detect_format(data: &[u8], extension: Option<&str>) -> Result<ImageFormat, FormatError> {
    if let Some(format) = detect_from_magic(data) {
        if format == ImageFormat::Tiff && extension.is_some_and(is_raw_extension) {
            return Ok(ImageFormat::Raw(RawKind::TiffBased));
        }
        return Ok(format);
    }

    Err(FormatError::UnsupportedFormat {
        reason: match extension {
            Some(ext) => format!("unrecognised file signature for .{ext} file"),
            None => "unrecognised file signature".to_string(),
        },
    })
}

/// Whether `extension` names a known RAW format.
pub fn is_raw_extension(extension: &str) -> bool {
    let lower = extension.to_ascii_lowercase();
    TIFF_RAW_EXTENSIONS.contains(&lower.as_str())
}

fn detect_from_magic(data: &[u8]) -> Option<ImageFormat> {
    if data.len() >= 3 && is_jpeg(data) && data[2] == 0xFF {
        return Some(ImageFormat::Jpeg);
    }
    if data.starts_with(PNG_SIGNATURE) {
        return Some(ImageFormat::Png);
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some(ImageFormat::Gif);
    }
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return Some(ImageFormat::WebP);
    }
    if data.starts_with(RAF_SIGNATURE) {
        return Some(ImageFormat::Raw(RawKind::Raf));
    }
    if data.len() >= 12 && &data[4..8] == b"ftyp" && &data[8..11] == b"crx" {
        return Some(ImageFormat::Raw(RawKind::Cr3));
    }
    if data.starts_with(b"IIRO") || data.starts_with(b"IIRS") || data.starts_with(b"MMOR") {
        return Some(ImageFormat::Raw(RawKind::Orf));
    }
    if data.starts_with(b"IIU\0") {
        return Some(ImageFormat::Raw(RawKind::Rw2));
    }
    if data.starts_with(b"II*\0") {
        if data.len() >= 10 && &data[8..10] == b"CR" {
            return Some(ImageFormat::Raw(RawKind::Cr2));
        }
        return Some(ImageFormat::Tiff);
    }
    if data.starts_with(b"MM\0*") {
        return Some(ImageFormat::Tiff);
    }
    if data.starts_with(b"BM") && data.len() >= 26 {
        return Some(ImageFormat::Bmp);
    }
    None
}

// =============================================================================
// Tests
// =============================================================================
