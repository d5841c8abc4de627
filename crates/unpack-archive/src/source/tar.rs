use std::io::Read;

use crate::Result;
use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::Error;
use crate::source::EntrySource;

/// Streams tar headers; skipped bodies are seeked or read past by `tar` itself.
pub struct TarSource<'a, R: Read + 'a> {
    entries: tar::Entries<'a, R>,
}

impl<'a, R: Read + 'a> TarSource<'a, R> {
    pub fn new(entries: tar::Entries<'a, R>) -> Self {
        Self { entries }
    }
}

impl<'a, R: Read + 'a> EntrySource for TarSource<'a, R> {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        let entry = match self.entries.next()? {
            Ok(e) => e,
            Err(e) => return Some(Err(Error::Corrupted(e.to_string()))),
        };

        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let size = entry.size();
        let entry_type = entry.header().entry_type();
        let kind = if entry_type.is_file() {
            EntryKind::File
        } else if entry_type.is_dir() {
            EntryKind::Directory
        } else if entry_type.is_symlink() || entry_type.is_hard_link() {
            EntryKind::Link
        } else {
            EntryKind::Other
        };

        Some(Ok(ArchiveEntry::new(name, size, kind, entry)))
    }
}
