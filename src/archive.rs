//! Append-only frame archive.
//!
//! Entries are written into an in-memory zip in insertion order and the zip is finalized exactly
//! once. Frame entries use the naming contract expected by downstream image-sequence tooling:
//! a 6-digit zero-padded frame index plus `.png` (`%06d.png`).

use std::collections::HashSet;
use std::io::{Cursor, Write as _};

use zip::write::SimpleFileOptions;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};

/// File extension of captured frames.
pub const FRAME_EXTENSION: &str = "png";

/// MIME type of a finalized archive.
pub const ARCHIVE_MIME_TYPE: &str = "application/zip";

/// Canonical archive entry name for a frame, e.g. `000007.png`.
pub fn frame_entry_name(idx: FrameIndex) -> String {
    format!("{:06}.{FRAME_EXTENSION}", idx.0)
}

/// A finalized archive, ready to be handed to a delivery mechanism.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinishedArchive {
    bytes: Vec<u8>,
    entries: Vec<String>,
}

impl FinishedArchive {
    /// MIME type of the archive bytes.
    pub fn mime_type(&self) -> &'static str {
        ARCHIVE_MIME_TYPE
    }

    /// Entry names in insertion order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A finalized archive always has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the zip bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the zip bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Append-only, insertion-ordered container of named blobs.
pub struct ArchiveBuilder {
    writer: Option<zip::ZipWriter<Cursor<Vec<u8>>>>,
    names: Vec<String>,
    seen: HashSet<String>,
}

impl std::fmt::Debug for ArchiveBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveBuilder")
            .field("entries", &self.names.len())
            .field("finalized", &self.is_finalized())
            .finish()
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            writer: Some(zip::ZipWriter::new(Cursor::new(Vec::new()))),
            names: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Number of entries added since the last reset.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` when no entries were added since the last reset.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `true` after [`ArchiveBuilder::finalize`] until the next reset.
    pub fn is_finalized(&self) -> bool {
        self.writer.is_none()
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Append a named entry.
    pub fn put(&mut self, name: &str, bytes: &[u8]) -> ReelResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(ReelError::ArchiveFinalized);
        };
        if self.seen.contains(name) {
            return Err(ReelError::DuplicateName(name.to_owned()));
        }

        // PNG payloads are already deflated.
        let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(name, opts)?;
        writer
            .write_all(bytes)
            .map_err(|e| ReelError::archive(format!("write entry '{name}': {e}")))?;

        self.seen.insert(name.to_owned());
        self.names.push(name.to_owned());
        tracing::trace!(name, len = bytes.len(), "archive entry added");
        Ok(())
    }

    /// Append a frame under its canonical name.
    pub fn put_frame(&mut self, idx: FrameIndex, png: &[u8]) -> ReelResult<()> {
        self.put(&frame_entry_name(idx), png)
    }

    /// Seal the archive and return its bytes.
    ///
    /// Further `put`/`finalize` calls fail until [`ArchiveBuilder::reset`].
    pub fn finalize(&mut self) -> ReelResult<FinishedArchive> {
        if self.writer.is_none() {
            return Err(ReelError::ArchiveFinalized);
        }
        if self.names.is_empty() {
            return Err(ReelError::EmptyArchive);
        }
        let Some(writer) = self.writer.take() else {
            return Err(ReelError::ArchiveFinalized);
        };
        let bytes = writer.finish()?.into_inner();
        self.seen.clear();
        Ok(FinishedArchive {
            bytes,
            entries: std::mem::take(&mut self.names),
        })
    }

    /// Discard all entries and make the builder writable again.
    pub fn reset(&mut self) {
        self.writer = Some(zip::ZipWriter::new(Cursor::new(Vec::new())));
        self.names = Vec::new();
        self.seen = HashSet::new();
    }
}

#[cfg(test)]
#[path = "../tests/unit/archive.rs"]
mod tests;
