use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ManifestError, Result};
use crate::work_map::WorkMap;

/// Load the manifest at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<WorkMap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ManifestError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let map = from_reader(file)?;
    info!(
        manifest = %path.display(),
        archives = map.len(),
        requests = map.request_count(),
        "manifest loaded"
    );
    Ok(map)
}

/// Read a manifest from any byte stream.
///
/// The first row is the header. Rows may be shorter or longer than the
/// header; every cell is considered regardless of its column. The first
/// malformed row (bad quoting, invalid UTF-8) aborts the whole read.
pub fn from_reader<R: Read>(reader: R) -> Result<WorkMap> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut map = WorkMap::new();
    let mut rows = 0usize;
    let mut requests = 0usize;
    for record in csv.records() {
        let record = record.map_err(ManifestError::from)?;
        rows += 1;
        for cell in record.iter() {
            if map.add_cell(cell) {
                requests += 1;
            }
        }
    }

    debug!(rows, requests, archives = map.len(), "manifest parsed");
    Ok(map)
}
