//! Container parsers for image files.
//!
//! The TIFF directory walker is the heart of metadata decoding: plain TIFF
//! files, TIFF-structured RAW files and the Exif segment of a JPEG all carry
//! the same IFD layout.
//!
//! # Format Detection
//!
//! Use [`detect::detect_format`] to identify a file from its leading bytes.
//! Supported families:
//!
//! - **Raster**: JPEG, PNG, GIF, WebP, BMP, TIFF
//! - **Camera RAW**: CR2, CR3, RAF, ORF, RW2 by signature; NEF, ARW, DNG and
//!   other TIFF-structured RAW files by extension hint

pub mod detect;
pub mod jpeg;
pub mod raw;
pub mod tiff;

pub use detect::{detect_format, is_raw_extension, ImageFormat, RawKind};
pub use jpeg::{find_exif_payload, is_jpeg};
pub use raw::{extract_largest_jpeg, PreviewSpan, MIN_PREVIEW_SIZE};
