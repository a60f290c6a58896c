//! Embedded JPEG preview extraction for RAW containers.
//!
//! Camera RAW files carry one or more JPEG renditions (thumbnail, medium
//! preview, full-size preview) next to the sensor data. The extractor does
//! not understand any vendor layout; it scans the buffer once for JPEG
//! start/end marker pairs and keeps the largest span above a size
//! threshold, which in practice is the full-size preview.
//!
//! The heuristic can pick a span that is not a preview when unrelated data
//! happens to be bracketed by marker bytes. That is accepted behaviour.

use std::ops::Range;

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use super::jpeg::{EOI, SOI};

/// Spans of this many bytes or fewer are never selected.
pub const MIN_PREVIEW_SIZE: u32 = 10_000;

/// Byte range of an embedded JPEG inside a larger buffer.
///
/// `end` is exclusive and includes the end-of-image marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewSpan {
    /// Offset of the start-of-image marker
    pub start: u32,
    /// Offset one past the end-of-image marker
    pub end: u32,
}

impl PreviewSpan {
    /// Length of the span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The span as a `usize` range.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Borrow the span out of `data`, or `None` if `data` is too short.
    pub fn slice<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.range())
    }

    /// Zero-copy slice of the span out of `data`.
    pub fn slice_bytes(&self, data: &Bytes) -> Option<Bytes> {
        (self.end as usize <= data.len()).then(|| data.slice(self.range()))
    }
}

/// Upper bound on start markers awaiting their end marker.
///
/// Sensor data can contain stray start markers; once the bound is reached
/// the oldest one is dropped.
const MAX_OPEN_STARTS: usize = 64;

/// Find the largest embedded JPEG in `data`.
///
/// Single pass over the buffer. Start markers are pushed onto a stack of
/// unmatched starts and every end marker pairs with the most recent one,
/// so a thumbnail nested in a preview's Exif segment closes before the
/// preview does. A pair longer than both the current best and
/// [`MIN_PREVIEW_SIZE`] becomes the new best.
pub fn extract_largest_jpeg(data: &[u8]) -> Option<PreviewSpan> {
    // Offsets are 32-bit
    let data = &data[..data.len().min(u32::MAX as usize)];

    let mut open: Vec<u32> = Vec::new();
    let mut best: Option<PreviewSpan> = None;

    for (i, pair) in data.windows(2).enumerate() {
        let i = i as u32;

        if pair == SOI {
            if open.len() == MAX_OPEN_STARTS {
                open.remove(0);
            }
            open.push(i);
        } else if pair == EOI {
            let Some(start) = open.pop() else {
                continue;
            };

            let candidate = PreviewSpan { start, end: i + 2 };
            let best_len = best.map_or(0, |b| b.len());
            if candidate.len() > best_len && candidate.len() > MIN_PREVIEW_SIZE {
                best = Some(candidate);
            }
        }
    }

    match best {
        Some(span) => debug!(start = span.start, len = span.len(), "found embedded JPEG preview"),
        None => debug!("no embedded JPEG preview above threshold"),
    }

    best
}
