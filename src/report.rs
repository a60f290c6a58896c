//! Human-readable presentation of an [`ImageReport`].
//!
//! A [`Summary`] groups the decoded fields into titled sections of
//! `(label, value)` rows, with units and formatting applied. It renders as
//! plain text through `Display` and as JSON through `serde`.

use std::fmt;

use serde::Serialize;

use crate::inspect::ImageReport;
use crate::metadata::{MetadataRecord, TagValue};

/// Fields shown in a dedicated section, never under "Additional".
const PRESENTED_FIELDS: &[&str] = &[
    "Make",
    "Model",
    "LensModel",
    "ExposureTime",
    "FNumber",
    "ISOSpeedRatings",
    "FocalLength",
    "Flash",
    "WhiteBalance",
    "GPSLatitude",
    "GPSLatitudeRef",
    "GPSLongitude",
    "GPSLongitudeRef",
    "GPSAltitude",
    "GPSAltitudeRef",
    "GPSDateStamp",
    "GPSTimeStamp",
    "Artist",
    "Copyright",
    "ImageDescription",
    "Software",
];

// =============================================================================
// Summary
// =============================================================================

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
}

/// A titled group of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<Row>,
}

impl Section {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(Row {
            label: label.into(),
            value: value.into(),
        });
    }

    /// Value of the row with the given label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }
}

/// Presentation of one inspected file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub file_name: String,
    pub sections: Vec<Section>,
}

impl Summary {
    /// Build the summary for `report`. Empty sections are left out.
    pub fn from_report(report: &ImageReport, file_name: &str) -> Self {
        let record = &report.metadata;

        let mut basic = Section::new("Basic");
        basic.push("Format", report.format.name());
        basic.push("MIME Type", report.mime_type);
        basic.push("File Name", file_name);
        basic.push("File Size", format_bytes(report.file_size));
        if let Some(modified) = report.modified {
            basic.push("Last Modified", modified.format("%Y-%m-%d %H:%M:%S UTC").to_string());
        }
        if let Some(preview) = report.preview {
            basic.push("Preview", format_bytes(preview.len() as u64));
        }

        let mut dimensions = Section::new("Dimensions");
        if let Some(dims) = report.dimensions {
            dimensions.push("Width", format!("{} px", dims.width));
            dimensions.push("Height", format!("{} px", dims.height));
            if let Some(ratio) = dims.aspect_ratio() {
                dimensions.push("Aspect Ratio", format!("{ratio:.2}"));
            }
            dimensions.push("Megapixels", format!("{:.2} MP", dims.megapixels()));
        }

        let sections = [
            basic,
            dimensions,
            camera_section(record),
            gps_section(report),
            author_section(record),
            additional_section(record),
        ];

        Self {
            file_name: file_name.to_string(),
            sections: sections
                .into_iter()
                .filter(|section| !section.rows.is_empty())
                .collect(),
        }
    }

    /// Section with the given title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.title == title)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.file_name)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "  {}", section.title)?;
            let width = section
                .rows
                .iter()
                .map(|row| row.label.len())
                .max()
                .unwrap_or(0);
            for row in &section.rows {
                writeln!(f, "    {:<width$}  {}", row.label, row.value)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Sections
// =============================================================================

fn camera_section(record: &MetadataRecord) -> Section {
    let mut section = Section::new("Camera");

    if let Some(make) = record.text("Make") {
        section.push("Camera Make", make);
    }
    if let Some(model) = record.text("Model") {
        section.push("Camera Model", model);
    }
    if let Some(lens) = record.text("LensModel") {
        section.push("Lens Model", lens);
    }

    // A zero-denominator rational decodes to 0, which carries no reading
    let nonzero = |name: &str| record.number(name).filter(|value| *value != 0.0);

    if let Some(exposure) = nonzero("ExposureTime") {
        section.push("Exposure Time", format!("{} sec", format_exposure(exposure)));
    }
    if let Some(f_number) = nonzero("FNumber") {
        section.push("F-Number", format!("f/{f_number}"));
    }
    if let Some(iso) = record.integer("ISOSpeedRatings") {
        section.push("ISO", iso.to_string());
    }
    if let Some(focal) = nonzero("FocalLength") {
        section.push("Focal Length", format!("{focal} mm"));
    }
    if let Some(flash) = record.integer("Flash") {
        section.push("Flash", flash.to_string());
    }
    if let Some(white_balance) = record.integer("WhiteBalance") {
        let mode = if white_balance == 0 { "Auto" } else { "Manual" };
        section.push("White Balance", mode);
    }

    section
}

fn gps_section(report: &ImageReport) -> Section {
    let record = &report.metadata;
    let mut section = Section::new("GPS");

    if let Some(coords) = report.gps {
        let lat_ref = record.text("GPSLatitudeRef").unwrap_or_default();
        let lon_ref = record.text("GPSLongitudeRef").unwrap_or_default();
        section.push("Latitude", format!("{:.6}° {lat_ref}", coords.latitude).trim_end());
        section.push("Longitude", format!("{:.6}° {lon_ref}", coords.longitude).trim_end());
        section.push("Map Link", coords.map_url());
    }

    if let Some(altitude) = record.number("GPSAltitude") {
        let direction = if record.integer("GPSAltitudeRef") == Some(1) {
            "Below"
        } else {
            "Above"
        };
        section.push("Altitude", format!("{altitude} m {direction} sea level"));
    }

    if let (Some(date), Some([h, m, s])) =
        (record.text("GPSDateStamp"), record.triplet("GPSTimeStamp"))
    {
        section.push("GPS Date/Time", format!("{date} {h}:{m}:{s}"));
    }

    section
}

fn author_section(record: &MetadataRecord) -> Section {
    let mut section = Section::new("Author");

    for (field, label) in [
        ("Artist", "Artist/Author"),
        ("Copyright", "Copyright"),
        ("ImageDescription", "Description"),
        ("Software", "Software"),
    ] {
        if let Some(value) = record.text(field) {
            section.push(label, value);
        }
    }

    section
}

fn additional_section(record: &MetadataRecord) -> Section {
    let mut section = Section::new("Additional");

    for (name, value) in record.iter() {
        if PRESENTED_FIELDS.contains(&name) {
            continue;
        }
        section.push(split_camel_case(name), display_value(value));
    }

    section
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Format a byte count with a binary unit and up to two decimals.
///
/// Trailing zeros are dropped: 1536 bytes is `1.5 KB`, 1024 bytes is `1 KB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Exposure time as a fraction when shorter than a second.
fn format_exposure(seconds: f64) -> String {
    if seconds > 0.0 && seconds < 1.0 {
        format!("1/{}", (1.0 / seconds).round())
    } else {
        seconds.to_string()
    }
}

/// Insert spaces at word boundaries of a CamelCase tag name.
///
/// Acronyms stay together: `GPSVersionID` becomes `GPS Version ID`.
pub fn split_camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out
}

fn display_value(value: &TagValue) -> String {
    match value {
        TagValue::Float(f) => format!("{}", (f * 10_000.0).round() / 10_000.0),
        other => other.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================
