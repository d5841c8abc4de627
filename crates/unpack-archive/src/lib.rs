//! Sequential entry streaming over archive files.
//!
//! # Architecture
//!
//! - `format.rs` - Format detection and decompression wrappers
//! - `entry.rs` - The borrowed entry handed out during iteration
//! - `source/` - Per-format `EntrySource` implementations
//!
//! Entries are produced lazily in the order the container stores them. An
//! entry's reader borrows its source, so it can only be read during the
//! iteration step that produced it; entries that are never read are never
//! buffered.

pub use entry::{ArchiveEntry, EntryKind};
pub use error::{Error, Result};
pub use format::{ArchiveFormat, Compression, Decoder, detect_format, detect_from_reader};
pub use source::{ArchiveFile, Entries, EntrySource};

mod entry;
mod error;
mod format;
mod source;
