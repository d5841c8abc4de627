//! Selective extraction across many archives.
//!
//! # Architecture
//!
//! - `extract.rs` - The streaming pass over one archive
//! - `scheduler.rs` - One task per archive under a concurrency limit
//! - `outcome.rs` - Per-archive outcomes, diagnostic lines and the run report
//! - `sink.rs` - Progress and diagnostic receivers
//!
//! Every archive ends in exactly one [`Outcome`]. Failures stay with the
//! archive that produced them and never stop the others.

pub use error::{ExtractError, Result};
pub use extract::{Written, extract_requested, process_archive};
pub use options::{DEFAULT_BUFFER_SIZE, ExtractOptions};
pub use outcome::{ArchiveSummary, Diagnostic, Outcome, RunReport};
pub use scheduler::Scheduler;
pub use sink::{DiagnosticSink, NoProgress, ProgressSink, WriterDiagnostics};

mod error;
mod extract;
mod options;
mod outcome;
mod scheduler;
mod sink;
