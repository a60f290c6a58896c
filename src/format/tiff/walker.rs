//! IFD traversal.
//!
//! The walker reads IFD0 and follows the Exif and GPS sub-IFD pointers,
//! decoding every catalogued entry into a single [`MetadataRecord`].
//!
//! Traversal uses an explicit work-list together with a set of visited
//! directory offsets: a pointer to a directory that was already walked (or
//! queued) is ignored, so self-referential and cyclic pointers terminate.
//! Per-entry failures never escape; a corrupt entry only loses that entry.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::TiffError;
use crate::io::ByteReader;
use crate::metadata::MetadataRecord;

use super::parser::{ByteOrder, IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE};
use super::tags::{lookup, sub_ifd_pointer, IfdKind};
use super::values::ValueDecoder;

/// Maximum number of entries read from a single directory.
pub const MAX_ENTRIES_PER_IFD: u16 = 512;

/// Maximum number of directories walked per parse.
pub const MAX_DIRECTORIES: usize = 8;

// =============================================================================
// IfdWalker
// =============================================================================

/// Walks a chain of directories over one TIFF buffer.
pub struct IfdWalker<'a> {
    reader: ByteReader<'a>,
    decoder: ValueDecoder<'a>,
    visited: HashSet<u32>,
}

impl<'a> IfdWalker<'a> {
    /// Create a walker over `data` with the given byte order.
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        let reader = ByteReader::new(data, byte_order);
        Self {
            reader,
            decoder: ValueDecoder::new(reader),
            visited: HashSet::new(),
        }
    }

    /// Offsets of the directories walked or queued so far.
    pub fn visited(&self) -> &HashSet<u32> {
        &self.visited
    }

    /// Walk the directory at `offset` and every sub-IFD it points to.
    ///
    /// A directory at an already visited offset is not walked again.
    pub fn walk(&mut self, offset: u32, kind: IfdKind, record: &mut MetadataRecord) {
        if !self.visited.insert(offset) {
            trace!(offset, "directory already visited");
            return;
        }

        let mut pending = vec![(offset, kind)];
        let mut walked = 0usize;

        while let Some((offset, kind)) = pending.pop() {
            if walked == MAX_DIRECTORIES {
                debug!(offset, "directory limit reached, stopping walk");
                break;
            }
            walked += 1;

            for (pointer, sub_kind) in self.walk_directory(offset, kind, record) {
                if self.visited.insert(pointer) {
                    pending.push((pointer, sub_kind));
                } else {
                    trace!(pointer, ifd = sub_kind.name(), "ignoring repeated sub-IFD pointer");
                }
            }
        }
    }

    /// Decode one directory into `record`, returning the sub-IFD pointers
    /// it contains.
    fn walk_directory(
        &self,
        offset: u32,
        kind: IfdKind,
        record: &mut MetadataRecord,
    ) -> Vec<(u32, IfdKind)> {
        let mut pointers = Vec::new();
        let offset = offset as u64;

        // Missing or truncated count: nothing to read, not fatal
        let Ok(count) = self.reader.read_u16(offset) else {
            debug!(offset, ifd = kind.name(), "directory offset out of bounds");
            return pointers;
        };

        if count > MAX_ENTRIES_PER_IFD {
            debug!(count, ifd = kind.name(), "clamping directory entry count");
        }
        let count = count.min(MAX_ENTRIES_PER_IFD) as u64;

        for index in 0..count {
            let position = offset + IFD_COUNT_SIZE + index * IFD_ENTRY_SIZE;
            let entry = match IfdEntry::read(&self.reader, position) {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(index, ifd = kind.name(), error = %err, "directory truncated");
                    break;
                }
            };

            if let Some(sub_kind) = sub_ifd_pointer(entry.tag_id) {
                pointers.push((entry.value_offset(self.reader.byte_order()), sub_kind));
                continue;
            }

            let Some(def) = lookup(kind, entry.tag_id) else {
                continue;
            };

            match self.decoder.decode(&entry) {
                Some(value) if def.kind.matches(&value) => record.insert(def.name, value),
                Some(_) => trace!(tag = def.name, "value shape does not match catalog"),
                None => {}
            }
        }

        pointers
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Walk the directory at `ifd_offset` into `record`.
///
/// `visited` carries the offsets of directories already walked in this
/// parse; it is updated with every directory this call reaches.
pub fn walk(
    buffer: &[u8],
    ifd_offset: u32,
    byte_order: ByteOrder,
    record: &mut MetadataRecord,
    visited: &mut HashSet<u32>,
) {
    let mut walker = IfdWalker::new(buffer, byte_order);
    walker.visited = std::mem::take(visited);
    walker.walk(ifd_offset, IfdKind::Main, record);
    *visited = walker.visited;
}

/// Parse a TIFF stream and walk it from the first IFD.
///
/// Fails only when the header is unusable: fewer than 8 bytes, or a first
/// word other than `II`/`MM`.
pub fn parse_tiff(buffer: &[u8]) -> Result<MetadataRecord, TiffError> {
    let header = TiffHeader::parse(buffer)?;

    let mut record = MetadataRecord::new();
    let mut walker = IfdWalker::new(buffer, header.byte_order);
    walker.walk(header.first_ifd_offset, IfdKind::Main, &mut record);

    debug!(
        fields = record.len(),
        directories = walker.visited().len(),
        "decoded TIFF metadata"
    );
    Ok(record)
}

/// Like [`parse_tiff`], but an unusable container yields an empty record.
pub fn read_metadata(buffer: &[u8]) -> MetadataRecord {
    parse_tiff(buffer).unwrap_or_else(|err| {
        debug!(error = %err, "not a TIFF stream");
        MetadataRecord::new()
    })
}

// =============================================================================
// Tests
// =============================================================================
