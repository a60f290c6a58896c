//! TIFF/EXIF directory decoding.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF streams declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values are read in that order.
//!
//! - **IFD (Image File Directory)**: a 16-bit entry count followed by 12-byte
//!   entries. IFD0 describes the image; the Exif and GPS sub-IFDs hang off it
//!   through pointer tags.
//!
//! - **Inline vs offset values**: values of at most 4 bytes are stored in the
//!   entry itself, larger values at an offset pointed to by the entry.
//!
//! - **Tolerance**: a corrupt entry loses only that entry. Only an unusable
//!   header stops a parse.

mod parser;
mod tags;
mod values;
mod walker;

pub use parser::{ByteOrder, IfdEntry, TiffHeader, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE, VERSION_TIFF};
pub use tags::{
    fits_inline, lookup, sub_ifd_pointer, FieldType, IfdKind, TagDef, ValueKind, EXIF_TAGS,
    GPS_TAGS, MAIN_TAGS, TAG_EXIF_IFD_POINTER, TAG_GPS_IFD_POINTER,
};
pub use values::{rational_to_f64, ValueDecoder};
pub use walker::{
    parse_tiff, read_metadata, walk, IfdWalker, MAX_DIRECTORIES, MAX_ENTRIES_PER_IFD,
};
