use std::io;

use indicatif::ProgressBar;
use unpack_extract::{Diagnostic, DiagnosticSink, WriterDiagnostics};

/// Writes diagnostic lines to stderr without tearing the progress bar.
pub struct ConsoleDiagnostics {
    pb: ProgressBar,
    stderr: WriterDiagnostics<io::Stderr>,
}

impl ConsoleDiagnostics {
    pub fn new(pb: ProgressBar) -> Self {
        Self {
            pb,
            stderr: WriterDiagnostics::new(io::stderr()),
        }
    }
}

impl DiagnosticSink for ConsoleDiagnostics {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.pb.suspend(|| self.stderr.emit(diagnostic));
    }
}
