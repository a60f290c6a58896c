//! GPS coordinate conversion.
//!
//! EXIF stores latitude and longitude as degrees/minutes/seconds triplets
//! with a separate reference letter. This module turns them into signed
//! decimal degrees.

use serde::Serialize;

use crate::metadata::MetadataRecord;

/// Hemisphere of a coordinate, from the `GPSLatitudeRef` and
/// `GPSLongitudeRef` letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse a reference letter. Case and surrounding whitespace are ignored.
    pub fn from_ref(reference: &str) -> Option<Self> {
        match reference.trim() {
            "N" | "n" => Some(Hemisphere::North),
            "S" | "s" => Some(Hemisphere::South),
            "E" | "e" => Some(Hemisphere::East),
            "W" | "w" => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// Whether coordinates in this hemisphere are negative.
    pub const fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

/// Convert degrees, minutes and seconds to decimal degrees.
///
/// No range validation is performed. An unknown hemisphere (`None`) leaves
/// the value positive.
pub fn to_decimal_degrees(
    degrees: f64,
    minutes: f64,
    seconds: f64,
    hemisphere: Option<Hemisphere>,
) -> f64 {
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    match hemisphere {
        Some(h) if h.is_negative() => -value,
        _ => value,
    }
}

/// Decimal-degree position of an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    /// Read the position from a decoded record.
    ///
    /// Returns `None` unless both `GPSLatitude` and `GPSLongitude` are
    /// present as triplets. Missing reference letters count as N/E.
    pub fn from_record(record: &MetadataRecord) -> Option<Self> {
        let [lat_d, lat_m, lat_s] = record.triplet("GPSLatitude")?;
        let [lon_d, lon_m, lon_s] = record.triplet("GPSLongitude")?;

        let lat_ref = record.text("GPSLatitudeRef").and_then(Hemisphere::from_ref);
        let lon_ref = record.text("GPSLongitudeRef").and_then(Hemisphere::from_ref);

        Some(Self {
            latitude: to_decimal_degrees(lat_d, lat_m, lat_s, lat_ref),
            longitude: to_decimal_degrees(lon_d, lon_m, lon_s, lon_ref),
        })
    }

    /// Map link for the position.
    pub fn map_url(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            self.latitude, self.longitude
        )
    }
}
