//! Test utilities for integration tests.
//!
//! This module provides builders for synthetic EXIF/TIFF streams in either
//! byte order, real JPEG images encoded with the `image` crate, and helpers
//! that splice the two together into JPEG and RAW-like containers.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use metaimage::format::tiff::TAG_EXIF_IFD_POINTER;
use metaimage::format::tiff::TAG_GPS_IFD_POINTER;

// =============================================================================
// Test Image Creation
// =============================================================================

/// Create a test JPEG image with a simple gradient pattern.
pub fn create_test_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, y| {
        let val = ((x + y) % 256) as u8;
        Luma([val])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Create an RGB JPEG filled with pseudo-random noise.
///
/// Noise compresses poorly, so the result is reliably well above the
/// preview size threshold.
pub fn create_noisy_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    let img = RgbImage::from_fn(width, height, |_, _| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, _] = state.to_le_bytes();
        Rgb([r, g, b])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, 95);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Create a PNG image.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([128])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// A fake JPEG of exactly `len` bytes: SOI, filler, EOI.
pub fn fake_jpeg_span(len: usize) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.resize(len - 2, 0x5A);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

// =============================================================================
// EXIF Builder
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

/// A tag value to be encoded into a directory entry.
#[derive(Clone, Debug)]
pub enum Value {
    Ascii(String),
    Byte(u8),
    Short(u16),
    Long(u32),
    Rational(u32, u32),
    Rationals(Vec<(u32, u32)>),
}

impl Value {
    pub fn ascii(s: &str) -> Self {
        Value::Ascii(s.to_string())
    }

    /// Field type, count and raw bytes in the given byte order.
    fn encode(&self, byte_order: ByteOrderType) -> (u16, u32, Vec<u8>) {
        let w = Writer(byte_order);
        match self {
            Value::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (2, bytes.len() as u32, bytes)
            }
            Value::Byte(v) => (1, 1, vec![*v]),
            Value::Short(v) => (3, 1, w.u16(*v).to_vec()),
            Value::Long(v) => (4, 1, w.u32(*v).to_vec()),
            Value::Rational(n, d) => (5, 1, [w.u32(*n), w.u32(*d)].concat()),
            Value::Rationals(pairs) => {
                let bytes = pairs
                    .iter()
                    .flat_map(|(n, d)| [w.u32(*n), w.u32(*d)].concat())
                    .collect();
                (5, pairs.len() as u32, bytes)
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Writer(ByteOrderType);

impl Writer {
    fn u16(self, v: u16) -> [u8; 2] {
        match self.0 {
            ByteOrderType::LittleEndian => v.to_le_bytes(),
            ByteOrderType::BigEndian => v.to_be_bytes(),
        }
    }

    fn u32(self, v: u32) -> [u8; 4] {
        match self.0 {
            ByteOrderType::LittleEndian => v.to_le_bytes(),
            ByteOrderType::BigEndian => v.to_be_bytes(),
        }
    }
}

/// Builder for complete EXIF TIFF streams: IFD0 plus optional Exif and GPS
/// sub-IFDs, with out-of-line values laid out after the directories.
///
/// Layout:
/// ```text
/// 0       header
/// 8       IFD0 (with pointer entries appended)
/// ...     Exif IFD, GPS IFD
/// ...     value area
/// ```
pub struct ExifBuilder {
    byte_order: ByteOrderType,
    main: Vec<(u16, Value)>,
    exif: Vec<(u16, Value)>,
    gps: Vec<(u16, Value)>,
    self_referential_gps: bool,
}

impl ExifBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            main: Vec::new(),
            exif: Vec::new(),
            gps: Vec::new(),
            self_referential_gps: false,
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    pub fn main(mut self, tag: u16, value: Value) -> Self {
        self.main.push((tag, value));
        self
    }

    pub fn exif(mut self, tag: u16, value: Value) -> Self {
        self.exif.push((tag, value));
        self
    }

    pub fn gps(mut self, tag: u16, value: Value) -> Self {
        self.gps.push((tag, value));
        self
    }

    /// Add a GPS pointer inside the GPS directory that points back at itself.
    pub fn with_self_referential_gps(mut self) -> Self {
        self.self_referential_gps = true;
        self
    }

    /// Typical camera metadata: Make/Model, exposure settings and a GPS fix
    /// at 40°26'46" N, 79°58'56" W.
    pub fn camera_sample(byte_order: ByteOrderType) -> Self {
        Self::new()
            .with_byte_order(byte_order)
            .main(0x010F, Value::ascii("Acme"))
            .main(0x0110, Value::ascii("X100"))
            .main(0x0112, Value::Short(1))
            .main(0x011A, Value::Rational(72, 1))
            .main(0x013B, Value::ascii("Jane Roe"))
            .exif(0x829A, Value::Rational(1, 250))
            .exif(0x829D, Value::Rational(28, 10))
            .exif(0x8827, Value::Short(400))
            .exif(0x920A, Value::Rational(35, 1))
            .exif(0xA403, Value::Short(0))
            .exif(0x9003, Value::ascii("2024:05:01 14:30:05"))
            .gps(0x0001, Value::ascii("N"))
            .gps(0x0002, Value::Rationals(vec![(40, 1), (26, 1), (46, 1)]))
            .gps(0x0003, Value::ascii("W"))
            .gps(0x0004, Value::Rationals(vec![(79, 1), (58, 1), (56, 1)]))
            .gps(0x0005, Value::Byte(0))
            .gps(0x0006, Value::Rational(2735, 10))
    }

    pub fn build(&self) -> Vec<u8> {
        let w = Writer(self.byte_order);
        let dir_size = |entries: usize| 2 + 12 * entries as u32 + 4;

        let has_exif = !self.exif.is_empty();
        let has_gps = !self.gps.is_empty() || self.self_referential_gps;

        let main_count = self.main.len() + has_exif as usize + has_gps as usize;
        let gps_count = self.gps.len() + self.self_referential_gps as usize;

        let ifd0_offset = 8u32;
        let exif_offset = ifd0_offset + dir_size(main_count);
        let gps_offset = exif_offset + if has_exif { dir_size(self.exif.len()) } else { 0 };
        let data_start = gps_offset + if has_gps { dir_size(gps_count) } else { 0 };

        let mut main = self.main.clone();
        if has_exif {
            main.push((TAG_EXIF_IFD_POINTER, Value::Long(exif_offset)));
        }
        if has_gps {
            main.push((TAG_GPS_IFD_POINTER, Value::Long(gps_offset)));
        }
        let mut gps = self.gps.clone();
        if self.self_referential_gps {
            gps.push((TAG_GPS_IFD_POINTER, Value::Long(gps_offset)));
        }

        let mut out = Vec::new();
        match self.byte_order {
            ByteOrderType::LittleEndian => out.extend_from_slice(b"II"),
            ByteOrderType::BigEndian => out.extend_from_slice(b"MM"),
        }
        out.extend_from_slice(&w.u16(42));
        out.extend_from_slice(&w.u32(ifd0_offset));

        let mut values = Vec::new();
        let mut dirs = vec![main];
        if has_exif {
            dirs.push(self.exif.clone());
        }
        if has_gps {
            dirs.push(gps);
        }

        for dir in &dirs {
            out.extend_from_slice(&w.u16(dir.len() as u16));
            for (tag, value) in dir {
                let (field_type, count, bytes) = value.encode(self.byte_order);
                out.extend_from_slice(&w.u16(*tag));
                out.extend_from_slice(&w.u16(field_type));
                out.extend_from_slice(&w.u32(count));
                if bytes.len() <= 4 {
                    let mut field = [0u8; 4];
                    field[..bytes.len()].copy_from_slice(&bytes);
                    out.extend_from_slice(&field);
                } else {
                    let offset = data_start + values.len() as u32;
                    out.extend_from_slice(&w.u32(offset));
                    values.extend_from_slice(&bytes);
                    if values.len() % 2 == 1 {
                        values.push(0);
                    }
                }
            }
            out.extend_from_slice(&w.u32(0));
        }

        assert_eq!(out.len() as u32, data_start);
        out.extend_from_slice(&values);
        out
    }
}

impl Default for ExifBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Containers
// =============================================================================

/// Insert an Exif APP1 segment carrying `tiff` right after the SOI marker.
pub fn jpeg_with_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// A TIFF-structured RAW-like file: a small EXIF stream of its own, then a
/// small thumbnail span, sensor-like filler, and `preview` near the end.
pub fn create_tiff_raw(container_tiff: &[u8], preview: &[u8]) -> Vec<u8> {
    let mut out = container_tiff.to_vec();
    out.extend(vec![0x00; 256]);
    out.extend(fake_jpeg_span(5_000));
    out.extend((0..20_000u32).map(|i| (i % 200) as u8));
    out.extend_from_slice(preview);
    out.extend(vec![0x00; 128]);
    out
}

/// A Fujifilm-style RAF file: signature, filler and an embedded preview.
pub fn create_raf(preview: &[u8]) -> Vec<u8> {
    let mut out = b"FUJIFILMCCD-RAW 0201FF383501".to_vec();
    out.resize(160, 0);
    out.extend_from_slice(preview);
    out.extend(vec![0x00; 4096]);
    out
}

// =============================================================================
// Validation Helpers
// =============================================================================

/// Check if data is a valid, decodable JPEG.
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    if data.len() < 4 {
        return false;
    }

    if data[0] != 0xFF || data[1] != 0xD8 {
        return false;
    }

    if data[data.len() - 2] != 0xFF || data[data.len() - 1] != 0xD9 {
        return false;
    }

    image::load_from_memory_with_format(data, image::ImageFormat::Jpeg).is_ok()
}
