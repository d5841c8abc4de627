use std::io;
use std::path::PathBuf;

/// Why one archive could not be processed to the end.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("{0}")]
    ArchiveOpen(#[source] unpack_archive::Error),

    #[error("read failed: {0}")]
    ArchiveRead(#[source] unpack_archive::Error),

    #[error("cannot write '{path}': {source}")]
    DestinationWrite { path: PathBuf, source: io::Error },

    #[error("worker task aborted: {0}")]
    TaskAborted(String),
}

impl ExtractError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DestinationWrite {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
