//! Whole-file inspection.
//!
//! [`inspect_bytes`] ties the pieces together: it detects the container,
//! locates the EXIF TIFF stream (the JPEG APP1 segment, the file itself for
//! TIFF, or the embedded preview for RAW), decodes it, and reads the pixel
//! dimensions.

use std::io::Cursor;
use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use image::ImageReader;
use serde::Serialize;
use tracing::debug;

use crate::error::FormatError;
use crate::format::tiff::read_metadata;
use crate::format::{
    detect_format, extract_largest_jpeg, find_exif_payload, ImageFormat, PreviewSpan,
};
use crate::geo::GpsCoordinates;
use crate::io::read_file;
use crate::metadata::MetadataRecord;

// =============================================================================
// Dimensions
// =============================================================================

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Width divided by height, or `None` for a zero height.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0).then(|| self.width as f64 / self.height as f64)
    }

    /// Total pixel count in millions.
    pub fn megapixels(&self) -> f64 {
        (self.width as f64 * self.height as f64) / 1_000_000.0
    }

    /// Read dimensions from an encoded image header.
    fn from_encoded(data: &[u8]) -> Option<Self> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .ok()?;
        match reader.into_dimensions() {
            Ok((width, height)) => Some(Self { width, height }),
            Err(e) => {
                debug!(error = %e, "could not read image header");
                None
            }
        }
    }

    /// Read dimensions from decoded metadata fields.
    fn from_record(record: &MetadataRecord) -> Option<Self> {
        let pair = |w: &str, h: &str| {
            Some(Self {
                width: record.integer(w)?,
                height: record.integer(h)?,
            })
        };
        pair("ImageWidth", "ImageHeight").or_else(|| pair("PixelXDimension", "PixelYDimension"))
    }
}

// =============================================================================
// ImageReport
// =============================================================================

/// Everything learned about one image file.
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    /// Detected container format
    pub format: ImageFormat,

    /// MIME type of the container
    pub mime_type: &'static str,

    /// Size of the inspected buffer in bytes
    pub file_size: u64,

    /// Pixel dimensions; for RAW files, those of the embedded preview
    pub dimensions: Option<Dimensions>,

    /// Decoded EXIF fields
    pub metadata: MetadataRecord,

    /// Decimal-degree position, when both coordinates are present
    pub gps: Option<GpsCoordinates>,

    /// Location of the embedded preview inside a RAW file
    pub preview: Option<PreviewSpan>,

    /// Filesystem modification time; only known when inspected from disk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl ImageReport {
    /// Slice the embedded preview out of the buffer the report was built from.
    pub fn preview_bytes(&self, source: &Bytes) -> Option<Bytes> {
        self.preview?.slice_bytes(source)
    }
}

// =============================================================================
// Inspection
// =============================================================================

/// Inspect an in-memory image.
///
/// # Arguments
/// * `data` - Complete file contents
/// * `extension` - Optional file extension used to classify TIFF-based RAW files
///
/// # Errors
/// `FormatError::UnsupportedFormat` when the container is not recognised.
/// Missing EXIF data, a missing RAW preview and unreadable headers are not
/// errors; they leave the corresponding report fields empty.
pub fn inspect_bytes(data: &[u8], extension: Option<&str>) -> Result<ImageReport, FormatError> {
    let format = detect_format(data, extension)?;
    debug!(format = format.name(), size = data.len(), "detected format");

    let preview = if format.is_raw() {
        extract_largest_jpeg(data)
    } else {
        None
    };
    let preview_data = preview.and_then(|span| span.slice(data));

    let metadata = collect_metadata(data, format, preview_data);

    let dimensions = match (format.is_raw(), preview_data) {
        (true, Some(preview)) => Dimensions::from_encoded(preview),
        (true, None) => None,
        (false, _) => Dimensions::from_encoded(data),
    }
    .or_else(|| Dimensions::from_record(&metadata));

    let gps = GpsCoordinates::from_record(&metadata);

    Ok(ImageReport {
        format,
        mime_type: format.mime_type(),
        file_size: data.len() as u64,
        dimensions,
        metadata,
        gps,
        preview,
        modified: None,
    })
}

/// Load a file from disk and inspect it.
///
/// The path's extension is used as the format hint and the report carries
/// the file's modification time. The loaded bytes are returned with the
/// report so the preview can be sliced out of them.
pub async fn inspect_file(
    path: &Path,
    max_size: u64,
) -> Result<(ImageReport, Bytes), FormatError> {
    let loaded = read_file(path, max_size).await?;
    let extension = path.extension().and_then(|e| e.to_str());
    let mut report = inspect_bytes(&loaded.data, extension)?;
    report.modified = loaded.modified;
    Ok((report, loaded.data))
}

/// Decode every EXIF stream the format carries into one record.
fn collect_metadata(data: &[u8], format: ImageFormat, preview: Option<&[u8]>) -> MetadataRecord {
    let mut record = MetadataRecord::new();

    match format {
        ImageFormat::Jpeg => {
            if let Some(tiff) = find_exif_payload(data) {
                record = read_metadata(tiff);
            }
        }
        ImageFormat::Tiff => record = read_metadata(data),
        ImageFormat::Raw(_) => {
            if let Some(tiff) = preview.and_then(find_exif_payload) {
                record = read_metadata(tiff);
            }
            // The container's own directories take precedence
            if format.is_tiff_structured() {
                record.merge(read_metadata(data));
            }
        }
        ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP | ImageFormat::Bmp => {}
    }

    debug!(fields = record.len(), "decoded metadata");
    record
}
