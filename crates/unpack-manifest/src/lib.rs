//! Extraction manifest loading.
//!
//! A manifest is a CSV file with a header row. Any cell, in any column, may
//! hold a request of the form `archive!entry`; every other cell is ignored.
//! Requests are grouped per archive into a [`WorkMap`].

pub use error::{ManifestError, Result};
pub use loader::{from_reader, load};
pub use work_map::{ArchiveId, EntryName, TargetSet, WorkMap, parse_request};

mod error;
mod loader;
mod work_map;
