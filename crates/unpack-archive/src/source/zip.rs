use std::io::{self, Read, Seek};
use std::mem;

use zip::ZipArchive;
use zip::read::ZipFile;

use crate::Result;
use crate::entry::{ArchiveEntry, EntryKind};
use crate::source::EntrySource;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// Walks the central directory in stored order.
pub struct ZipSource<'a, R: Read + Seek> {
    archive: &'a mut ZipArchive<R>,
    index: usize,
}

impl<'a, R: Read + Seek> ZipSource<'a, R> {
    pub fn new(archive: &'a mut ZipArchive<R>) -> Self {
        Self { archive, index: 0 }
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<'_, R> {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        if self.index >= self.archive.len() {
            return None;
        }
        let index = self.index;
        self.index += 1;

        // Raw access never decrypts or inflates, so encrypted or exotic
        // entries only fail once somebody reads them.
        let (name, size, kind) = match self.archive.by_index_raw(index) {
            Ok(file) => (file.name().to_owned(), file.size(), kind_of(&file)),
            Err(e) => return Some(Err(e.into())),
        };

        let body = LazyFile::Pending {
            archive: &mut *self.archive,
            index,
        };
        Some(Ok(ArchiveEntry::new(name, size, kind, body)))
    }
}

fn kind_of<R: Read>(file: &ZipFile<'_, R>) -> EntryKind {
    if file.is_dir() {
        EntryKind::Directory
    } else if file.unix_mode().is_some_and(|m| m & S_IFMT == S_IFLNK) {
        EntryKind::Link
    } else {
        EntryKind::File
    }
}

/// Entry body that is decrypted and inflated on first read.
enum LazyFile<'a, R: Read + Seek> {
    Pending {
        archive: &'a mut ZipArchive<R>,
        index: usize,
    },
    Open(ZipFile<'a, R>),
    Broken,
}

impl<R: Read + Seek> Read for LazyFile<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if matches!(self, Self::Pending { .. }) {
            if let Self::Pending { archive, index } = mem::replace(self, Self::Broken) {
                *self = Self::Open(archive.by_index(index)?);
            }
        }
        match self {
            Self::Open(file) => file.read(buf),
            _ => Err(io::Error::other("zip entry could not be opened")),
        }
    }
}
