use std::fmt;
use std::io::{self, Read};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Symbolic or hard link; the target is not carried as content.
    Link,
    /// Device nodes, fifos and anything else without file content.
    Other,
}

/// One entry of an archive, valid for a single iteration step.
///
/// The content is only pulled from the container when the entry is read.
/// Dropping an entry without reading it costs nothing beyond its header.
pub struct ArchiveEntry<'a> {
    name: String,
    size: u64,
    kind: EntryKind,
    reader: Box<dyn Read + 'a>,
}

impl<'a> ArchiveEntry<'a> {
    pub fn new(name: String, size: u64, kind: EntryKind, reader: impl Read + 'a) -> Self {
        Self {
            name,
            size,
            kind,
            reader: Box::new(reader),
        }
    }

    /// Name as stored in the archive, with `/` separators.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uncompressed size declared by the entry header.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

impl Read for ArchiveEntry<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for ArchiveEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
