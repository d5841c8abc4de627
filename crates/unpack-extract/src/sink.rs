use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::outcome::Diagnostic;

/// Receives progress of a run: one total up front, then one increment
/// per archive that reaches a terminal outcome.
pub trait ProgressSink: Send + Sync {
    fn set_total(&self, total: u64);
    fn increment(&self);
}

/// Receives warning and error lines as archives finish.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<T: ProgressSink + ?Sized> ProgressSink for &T {
    fn set_total(&self, total: u64) {
        (**self).set_total(total)
    }

    fn increment(&self) {
        (**self).increment()
    }
}

impl<T: ProgressSink + ?Sized> ProgressSink for Arc<T> {
    fn set_total(&self, total: u64) {
        (**self).set_total(total)
    }

    fn increment(&self) {
        (**self).increment()
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic)
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set_total(&self, _total: u64) {}

    fn increment(&self) {}
}

/// Writes each diagnostic as one line to a shared writer.
///
/// Lines are written whole under a lock so concurrent archives never
/// interleave. Write failures are dropped.
#[derive(Debug, Default)]
pub struct WriterDiagnostics<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterDiagnostics<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> DiagnosticSink for WriterDiagnostics<W> {
    fn emit(&self, diagnostic: &Diagnostic) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{diagnostic}");
        let _ = writer.flush();
    }
}
