use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot open manifest '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("malformed manifest: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ManifestError>;
