//! TIFF field types and the EXIF tag catalog.
//!
//! This module defines the vocabulary for directory decoding:
//! - Field types that determine how values are encoded and where they live
//! - The tag catalog mapping numeric tag ids to canonical field names, one
//!   table per IFD namespace (main, Exif, GPS)
//!
//! Tags missing from the catalog are skipped during the walk; they are never
//! surfaced as extra metadata.

use crate::metadata::TagValue;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that the decoder understands.
///
/// TIFF defines more types (SBYTE, SRATIONAL, FLOAT, ...). Entries using
/// them keep `field_type: None` and are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte = 1,

    /// 8-bit ASCII character (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Two unsigned 32-bit integers, numerator then denominator (8 bytes)
    Rational = 5,
}

impl FieldType {
    /// Maximum bytes that can be stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte => 1,
            FieldType::Ascii => 1,
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Rational => 8,
        }
    }

    /// Create a FieldType from its numeric value.
    ///
    /// Returns `None` for types the decoder does not handle.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            _ => None,
        }
    }
}

/// Inline placement rule: a value of `byte_size` bytes lives in the entry's
/// own 4-byte field when it fits, otherwise the field holds its offset.
#[inline]
pub const fn fits_inline(byte_size: u64) -> bool {
    byte_size <= FieldType::INLINE_THRESHOLD
}

// =============================================================================
// IFD Namespaces and Pointers
// =============================================================================

/// Tag namespace of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfdKind {
    /// IFD0, the primary image directory
    Main,
    /// Exif sub-IFD (camera settings)
    Exif,
    /// GPS sub-IFD
    Gps,
}

impl IfdKind {
    /// Name used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            IfdKind::Main => "IFD0",
            IfdKind::Exif => "Exif",
            IfdKind::Gps => "GPS",
        }
    }
}

/// Tag id of the Exif sub-IFD pointer.
pub const TAG_EXIF_IFD_POINTER: u16 = 0x8769;

/// Tag id of the GPS sub-IFD pointer.
pub const TAG_GPS_IFD_POINTER: u16 = 0x8825;

/// Which directory a pointer tag leads to, if `tag_id` is a pointer tag.
pub fn sub_ifd_pointer(tag_id: u16) -> Option<IfdKind> {
    match tag_id {
        TAG_EXIF_IFD_POINTER => Some(IfdKind::Exif),
        TAG_GPS_IFD_POINTER => Some(IfdKind::Gps),
        _ => None,
    }
}

// =============================================================================
// Tag Catalog
// =============================================================================

/// Shape of value a catalogued tag is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// ASCII text
    Text,
    /// Byte, Short or Long
    Integer,
    /// Single rational
    Rational,
    /// Three rationals (degrees/minutes/seconds, hours/minutes/seconds)
    RationalTriplet,
}

impl ValueKind {
    /// Whether a decoded value has the shape this kind expects.
    pub fn matches(self, value: &TagValue) -> bool {
        matches!(
            (self, value),
            (ValueKind::Text, TagValue::Text(_))
                | (ValueKind::Integer, TagValue::Integer(_))
                | (ValueKind::Rational, TagValue::Float(_))
                | (ValueKind::RationalTriplet, TagValue::Triplet(_))
        )
    }
}

/// A catalogued tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDef {
    /// Numeric tag id
    pub id: u16,
    /// Canonical field name used as the record key
    pub name: &'static str,
    /// Expected value shape
    pub kind: ValueKind,
}

const fn tag(id: u16, name: &'static str, kind: ValueKind) -> TagDef {
    TagDef { id, name, kind }
}

use ValueKind::{Integer, Rational, RationalTriplet, Text};

/// Tags of IFD0.
pub static MAIN_TAGS: &[TagDef] = &[
    tag(0x0100, "ImageWidth", Integer),
    tag(0x0101, "ImageHeight", Integer),
    tag(0x0103, "Compression", Integer),
    tag(0x0106, "PhotometricInterpretation", Integer),
    tag(0x010E, "ImageDescription", Text),
    tag(0x010F, "Make", Text),
    tag(0x0110, "Model", Text),
    tag(0x0112, "Orientation", Integer),
    tag(0x0115, "SamplesPerPixel", Integer),
    tag(0x011A, "XResolution", Rational),
    tag(0x011B, "YResolution", Rational),
    tag(0x011C, "PlanarConfiguration", Integer),
    tag(0x0128, "ResolutionUnit", Integer),
    tag(0x0131, "Software", Text),
    tag(0x0132, "DateTime", Text),
    tag(0x013B, "Artist", Text),
    tag(0x013C, "HostComputer", Text),
    tag(0x0213, "YCbCrPositioning", Integer),
    tag(0x8298, "Copyright", Text),
];

/// Tags of the Exif sub-IFD. Ids shared with IFD0 resolve through
/// [`MAIN_TAGS`].
pub static EXIF_TAGS: &[TagDef] = &[
    tag(0x829A, "ExposureTime", Rational),
    tag(0x829D, "FNumber", Rational),
    tag(0x8822, "ExposureProgram", Integer),
    tag(0x8824, "SpectralSensitivity", Text),
    tag(0x8827, "ISOSpeedRatings", Integer),
    tag(0x8830, "SensitivityType", Integer),
    tag(0x9003, "DateTimeOriginal", Text),
    tag(0x9004, "DateTimeDigitized", Text),
    tag(0x9010, "OffsetTime", Text),
    tag(0x9011, "OffsetTimeOriginal", Text),
    tag(0x9202, "ApertureValue", Rational),
    tag(0x9205, "MaxApertureValue", Rational),
    tag(0x9206, "SubjectDistance", Rational),
    tag(0x9207, "MeteringMode", Integer),
    tag(0x9208, "LightSource", Integer),
    tag(0x9209, "Flash", Integer),
    tag(0x920A, "FocalLength", Rational),
    tag(0x9290, "SubsecTime", Text),
    tag(0xA001, "ColorSpace", Integer),
    tag(0xA002, "PixelXDimension", Integer),
    tag(0xA003, "PixelYDimension", Integer),
    tag(0xA217, "SensingMethod", Integer),
    tag(0xA401, "CustomRendered", Integer),
    tag(0xA402, "ExposureMode", Integer),
    tag(0xA403, "WhiteBalance", Integer),
    tag(0xA404, "DigitalZoomRatio", Rational),
    tag(0xA405, "FocalLengthIn35mmFilm", Integer),
    tag(0xA406, "SceneCaptureType", Integer),
    tag(0xA408, "Contrast", Integer),
    tag(0xA409, "Saturation", Integer),
    tag(0xA40A, "Sharpness", Integer),
    tag(0xA420, "ImageUniqueID", Text),
    tag(0xA430, "CameraOwnerName", Text),
    tag(0xA431, "BodySerialNumber", Text),
    tag(0xA433, "LensMake", Text),
    tag(0xA434, "LensModel", Text),
    tag(0xA435, "LensSerialNumber", Text),
];

/// Tags of the GPS sub-IFD.
pub static GPS_TAGS: &[TagDef] = &[
    tag(0x0001, "GPSLatitudeRef", Text),
    tag(0x0002, "GPSLatitude", RationalTriplet),
    tag(0x0003, "GPSLongitudeRef", Text),
    tag(0x0004, "GPSLongitude", RationalTriplet),
    tag(0x0005, "GPSAltitudeRef", Integer),
    tag(0x0006, "GPSAltitude", Rational),
    tag(0x0007, "GPSTimeStamp", RationalTriplet),
    tag(0x0008, "GPSSatellites", Text),
    tag(0x0009, "GPSStatus", Text),
    tag(0x000A, "GPSMeasureMode", Text),
    tag(0x000B, "GPSDOP", Rational),
    tag(0x000C, "GPSSpeedRef", Text),
    tag(0x000D, "GPSSpeed", Rational),
    tag(0x000E, "GPSTrackRef", Text),
    tag(0x000F, "GPSTrack", Rational),
    tag(0x0010, "GPSImgDirectionRef", Text),
    tag(0x0011, "GPSImgDirection", Rational),
    tag(0x0012, "GPSMapDatum", Text),
    tag(0x0017, "GPSDestBearingRef", Text),
    tag(0x0018, "GPSDestBearing", Rational),
    tag(0x001D, "GPSDateStamp", Text),
    tag(0x001F, "GPSHPositioningError", Rational),
];

fn find(table: &'static [TagDef], tag_id: u16) -> Option<&'static TagDef> {
    table.iter().find(|def| def.id == tag_id)
}

/// Look up a tag id in the namespace of `kind`.
///
/// Returns `None` for unknown tags. Unknown is not an error; the caller
/// skips the entry.
pub fn lookup(kind: IfdKind, tag_id: u16) -> Option<&'static TagDef> {
    match kind {
        IfdKind::Main => find(MAIN_TAGS, tag_id),
        IfdKind::Exif => find(EXIF_TAGS, tag_id).or_else(|| find(MAIN_TAGS, tag_id)),
        IfdKind::Gps => find(GPS_TAGS, tag_id),
    }
}

// =============================================================================
// Tests
// =============================================================================
