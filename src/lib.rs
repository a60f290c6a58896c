//! # metaimage
//!
//! EXIF metadata decoding and RAW preview extraction for image files.
//!
//! This library reads the TIFF directory structure embedded in JPEG, TIFF and
//! camera RAW files, decodes camera, exposure, GPS and authoring tags into a
//! flat [`MetadataRecord`], and locates the full-size JPEG preview that camera
//! RAW containers carry next to the sensor data.
//!
//! ## Features
//!
//! - **Tolerant decoding**: a corrupt entry loses only that entry; the
//!   directory walk is bounds-checked, cycle-safe and capped
//! - **Both byte orders**: little-endian (`II`) and big-endian (`MM`) streams
//! - **RAW previews**: the largest embedded JPEG is found without any
//!   vendor-specific parsing
//! - **Format detection**: raster formats and common RAW containers by
//!   signature
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked byte reads and file loading
//! - [`mod@format`] - Format detection, TIFF/EXIF walker, JPEG and RAW scanners
//! - [`metadata`] - Decoded tag values and the metadata record
//! - [`geo`] - GPS coordinate conversion
//! - [`inspect`] - Whole-file inspection
//! - [`report`] - Human-readable summaries
//! - [`config`] - CLI configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use metaimage::{inspect_file, DEFAULT_MAX_FILE_SIZE};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (report, _data) = inspect_file(Path::new("photo.jpg"), DEFAULT_MAX_FILE_SIZE)
//!         .await
//!         .unwrap();
//!
//!     if let Some(make) = report.metadata.text("Make") {
//!         println!("Camera: {make}");
//!     }
//!     if let Some(gps) = report.gps {
//!         println!("Taken at {}, {}", gps.latitude, gps.longitude);
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod geo;
pub mod inspect;
pub mod io;
pub mod metadata;
pub mod report;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{DecodeError, FormatError, IoError, TiffError};
pub use format::tiff::{parse_tiff, read_metadata, walk, ByteOrder, IfdEntry, TiffHeader};
pub use format::{
    detect_format, extract_largest_jpeg, find_exif_payload, ImageFormat, PreviewSpan, RawKind,
};
pub use geo::{to_decimal_degrees, GpsCoordinates, Hemisphere};
pub use inspect::{inspect_bytes, inspect_file, Dimensions, ImageReport};
pub use io::{read_file, ByteReader, LoadedFile, DEFAULT_MAX_FILE_SIZE};
pub use metadata::{MetadataRecord, TagValue};
pub use report::{format_bytes, Summary};
