use thiserror::Error;

/// I/O errors raised while loading image files or writing previews
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// The file could not be read
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// The file could not be written
    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    /// The file is larger than the configured ceiling
    #[error("File size {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    /// The path does not exist
    #[error("File not found: {0}")]
    NotFound(String),
}

/// Failure to decode a single IFD entry.
///
/// These never escape the directory walker: the affected entry is treated
/// as absent and the walk continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read would run past the end of the buffer
    #[error("Read out of bounds: {len} bytes at offset {offset}, buffer size is {size}")]
    OutOfBounds { offset: u64, len: u64, size: u64 },

    /// The type/count combination has no decoding rule
    #[error("Unsupported field type {field_type} with count {count}")]
    UnsupportedType { field_type: u16, count: u32 },
}

/// Errors that prevent a TIFF stream from being walked at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Invalid byte order marker (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Buffer is too small to hold a TIFF header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },
}

/// Errors related to format detection and file inspection
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// TIFF container error
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),

    /// File format is not a supported image format
    #[error("Unsupported format: {reason}")]
    UnsupportedFormat { reason: String },

    /// No embedded JPEG preview large enough was found in a RAW container
    #[error("No embedded JPEG preview found")]
    NoPreviewFound,
}
