use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::entry::ArchiveEntry;
use crate::error::{Error, Result};
use crate::format::{self, ArchiveFormat, Compression, Decoder};

mod tar;
mod zip;

pub use self::tar::TarSource;
pub use self::zip::ZipSource;

/// A lazy, forward-only sequence of archive entries.
///
/// Each entry borrows the source, so the previous entry must be dropped
/// before the next one is requested.
pub trait EntrySource {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>>;
}

/// An opened archive whose container format has been sniffed.
pub struct ArchiveFile<R: Read + Seek = BufReader<File>> {
    inner: Inner<R>,
}

enum Inner<R: Read + Seek> {
    Zip(::zip::ZipArchive<R>),
    Tar {
        archive: ::tar::Archive<Decoder<R>>,
        compression: Compression,
    },
}

impl ArchiveFile {
    /// Open the archive at `path`.
    ///
    /// A file that cannot be opened or sniffed is [`Error::Open`], an
    /// unrecognised one [`Error::UnsupportedFormat`]. A damaged zip central
    /// directory surfaces as [`Error::Corrupted`] or [`Error::Io`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_err = |source| Error::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = BufReader::new(File::open(path).map_err(open_err)?);
        let format = format::detect_from_reader(&mut reader).map_err(open_err)?;
        Self::with_format(reader, format.ok_or(Error::UnsupportedFormat)?)
    }
}

impl<R: Read + Seek> ArchiveFile<R> {
    /// Sniff the format from `reader` and prepare it for iteration.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        let format = format::detect_from_reader(&mut reader)?.ok_or(Error::UnsupportedFormat)?;
        Self::with_format(reader, format)
    }

    fn with_format(reader: R, format: ArchiveFormat) -> Result<Self> {
        let inner = match format {
            ArchiveFormat::Zip => Inner::Zip(::zip::ZipArchive::new(reader)?),
            ArchiveFormat::Tar(compression) => Inner::Tar {
                archive: ::tar::Archive::new(compression.decoder(reader)?),
                compression,
            },
        };
        Ok(Self { inner })
    }

    pub fn format(&self) -> ArchiveFormat {
        match &self.inner {
            Inner::Zip(_) => ArchiveFormat::Zip,
            Inner::Tar { compression, .. } => ArchiveFormat::Tar(*compression),
        }
    }

    /// Start the single sequential pass over the archive.
    ///
    /// Tar streams cannot be rewound, so this can only be called once for a
    /// tar archive.
    pub fn entries(&mut self) -> Result<Entries<'_, R>> {
        match &mut self.inner {
            Inner::Zip(archive) => Ok(Entries::Zip(ZipSource::new(archive))),
            Inner::Tar { archive, .. } => Ok(Entries::Tar(TarSource::new(archive.entries()?))),
        }
    }
}

/// Entry sequence of an [`ArchiveFile`], dispatching on its format.
pub enum Entries<'a, R: Read + Seek> {
    Zip(ZipSource<'a, R>),
    Tar(TarSource<'a, Decoder<R>>),
}

impl<R: Read + Seek> EntrySource for Entries<'_, R> {
    fn next_entry(&mut self) -> Option<Result<ArchiveEntry<'_>>> {
        match self {
            Self::Zip(source) => source.next_entry(),
            Self::Tar(source) => source.next_entry(),
        }
    }
}
