//! RAW container integration tests.
//!
//! Tests verify:
//! - The largest embedded JPEG above the size threshold is selected
//! - Metadata is read from the preview's Exif segment and from the
//!   container's own directories, with the container taking precedence
//! - Preview bytes slice out as a decodable JPEG

use bytes::Bytes;

use metaimage::{extract_largest_jpeg, inspect_bytes, ImageFormat, RawKind};

use super::test_utils::{
    create_noisy_jpeg, create_raf, create_test_jpeg, create_tiff_raw, fake_jpeg_span,
    is_valid_jpeg, jpeg_with_exif, ByteOrderType, ExifBuilder, Value,
};

// =============================================================================
// Span Selection
// =============================================================================

#[test]
fn test_small_and_large_spans() {
    let mut data = vec![0x10; 64];
    data.extend(fake_jpeg_span(5 * 1024));
    data.extend(vec![0x20; 512]);
    let large_start = data.len() as u32;
    data.extend(fake_jpeg_span(50 * 1024));
    data.extend(vec![0x30; 64]);

    let span = extract_largest_jpeg(&data).unwrap();
    assert_eq!(span.start, large_start);
    assert_eq!(span.len(), 50 * 1024);
}

#[test]
fn test_only_small_spans() {
    let mut data = fake_jpeg_span(5 * 1024);
    data.extend(fake_jpeg_span(8 * 1024));
    data.extend(fake_jpeg_span(9_999));

    assert!(extract_largest_jpeg(&data).is_none());
}

#[test]
fn test_real_jpeg_is_found_whole() {
    let jpeg = create_noisy_jpeg(256, 256);
    assert!(jpeg.len() > 10_000);

    let raw = create_raf(&jpeg);
    let span = extract_largest_jpeg(&raw).unwrap();

    assert_eq!(span.len() as usize, jpeg.len());
    assert_eq!(span.slice(&raw).unwrap(), &jpeg[..]);
}

// =============================================================================
// Inspection
// =============================================================================

fn preview_with_exif() -> Vec<u8> {
    let tiff = ExifBuilder::new()
        .with_byte_order(ByteOrderType::BigEndian)
        .main(0x010F, Value::ascii("PreviewMake"))
        .main(0x0131, Value::ascii("Firmware 1.2"))
        .exif(0x829A, Value::Rational(1, 60))
        .build();
    jpeg_with_exif(&create_noisy_jpeg(320, 240), &tiff)
}

#[test]
fn test_tiff_based_raw_inspection() {
    let container = ExifBuilder::new()
        .main(0x010F, Value::ascii("Nikon"))
        .main(0x0110, Value::ascii("D850"))
        .build();
    let preview = preview_with_exif();
    let raw = create_tiff_raw(&container, &preview);

    let report = inspect_bytes(&raw, Some("NEF")).unwrap();
    assert_eq!(report.format, ImageFormat::Raw(RawKind::TiffBased));
    assert_eq!(report.mime_type, "image/x-raw");

    let span = report.preview.unwrap();
    assert_eq!(span.len() as usize, preview.len());

    // Container wins on collisions, preview-only fields survive
    assert_eq!(report.metadata.text("Make"), Some("Nikon"));
    assert_eq!(report.metadata.text("Model"), Some("D850"));
    assert_eq!(report.metadata.text("Software"), Some("Firmware 1.2"));
    assert!(report.metadata.number("ExposureTime").is_some());

    let dims = report.dimensions.unwrap();
    assert_eq!((dims.width, dims.height), (320, 240));

    let source = Bytes::from(raw);
    let preview_bytes = report.preview_bytes(&source).unwrap();
    assert_eq!(&preview_bytes[..], &preview[..]);
    assert!(is_valid_jpeg(&preview_bytes));
}

#[test]
fn test_same_bytes_without_raw_hint_is_tiff() {
    let container = ExifBuilder::new()
        .main(0x010F, Value::ascii("Nikon"))
        .build();
    let raw = create_tiff_raw(&container, &preview_with_exif());

    let report = inspect_bytes(&raw, Some("tif")).unwrap();
    assert_eq!(report.format, ImageFormat::Tiff);
    assert!(report.preview.is_none());
    assert_eq!(report.metadata.text("Make"), Some("Nikon"));
}

#[test]
fn test_raf_reads_preview_metadata() {
    let raw = create_raf(&preview_with_exif());

    let report = inspect_bytes(&raw, Some("raf")).unwrap();
    assert_eq!(report.format, ImageFormat::Raw(RawKind::Raf));
    assert!(report.preview.is_some());
    assert_eq!(report.metadata.text("Make"), Some("PreviewMake"));

    let dims = report.dimensions.unwrap();
    assert_eq!((dims.width, dims.height), (320, 240));
}

/// A preview whose Exif segment carries its own small JPEG thumbnail after
/// the TIFF directories, as camera firmware writes it.
fn preview_with_thumbnail() -> Vec<u8> {
    let mut payload = ExifBuilder::new()
        .with_byte_order(ByteOrderType::BigEndian)
        .main(0x010F, Value::ascii("PreviewMake"))
        .build();
    let thumbnail = create_test_jpeg(48, 32, 80);
    assert!(thumbnail.len() < 10_000);
    payload.extend_from_slice(&thumbnail);

    jpeg_with_exif(&create_noisy_jpeg(320, 240), &payload)
}

#[test]
fn test_preview_with_nested_thumbnail() {
    let preview = preview_with_thumbnail();
    let raw = create_raf(&preview);

    let span = extract_largest_jpeg(&raw).unwrap();
    assert_eq!(span.start, 160);
    assert_eq!(span.slice(&raw).unwrap(), &preview[..]);

    let report = inspect_bytes(&raw, Some("raf")).unwrap();
    assert_eq!(report.metadata.text("Make"), Some("PreviewMake"));

    let dims = report.dimensions.unwrap();
    assert_eq!((dims.width, dims.height), (320, 240));

    let source = Bytes::from(raw);
    assert!(is_valid_jpeg(&report.preview_bytes(&source).unwrap()));
}

#[test]
fn test_tiff_raw_preview_with_nested_thumbnail() {
    let container = ExifBuilder::new()
        .main(0x010F, Value::ascii("Nikon"))
        .build();
    let preview = preview_with_thumbnail();
    let raw = create_tiff_raw(&container, &preview);

    let report = inspect_bytes(&raw, Some("nef")).unwrap();
    let span = report.preview.unwrap();
    assert_eq!(span.slice(&raw).unwrap(), &preview[..]);
    assert_eq!(report.metadata.text("Make"), Some("Nikon"));
}

#[test]
fn test_raw_without_large_preview() {
    let container = ExifBuilder::new()
        .main(0x010F, Value::ascii("Nikon"))
        .build();
    let mut raw = container.clone();
    raw.extend(fake_jpeg_span(4_096));
    raw.extend(vec![0x00; 1024]);

    let report = inspect_bytes(&raw, Some("dng")).unwrap();
    assert!(report.format.is_raw());
    assert!(report.preview.is_none());
    assert!(report.dimensions.is_none());
    assert_eq!(report.metadata.text("Make"), Some("Nikon"));
    assert!(report.preview_bytes(&Bytes::from(raw)).is_none());
}
