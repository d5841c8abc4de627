//! Bounded-parallel processing of a whole work map.

use std::path::Path;
use std::sync::Arc;

use futures_util::{StreamExt, stream::FuturesUnordered};
use tokio::sync::Semaphore;
use tracing::info;
use unpack_manifest::{TargetSet, WorkMap};

use crate::error::ExtractError;
use crate::extract::{Written, process_archive};
use crate::options::ExtractOptions;
use crate::outcome::{ArchiveSummary, Outcome, RunReport};
use crate::sink::{DiagnosticSink, ProgressSink};

/// Runs one task per archive with at most `concurrency` in flight.
///
/// Diagnostics and progress ticks are delivered from the task that awaits
/// [`Scheduler::run`], one archive at a time, in completion order.
pub struct Scheduler<P, D> {
    options: Arc<ExtractOptions>,
    progress: P,
    diagnostics: D,
}

impl<P: ProgressSink, D: DiagnosticSink> Scheduler<P, D> {
    pub fn new(options: ExtractOptions, progress: P, diagnostics: D) -> Self {
        Self {
            options: Arc::new(options),
            progress,
            diagnostics,
        }
    }

    /// Process every archive of `work`, resolved against `base_dir`.
    ///
    /// Returns once every archive has reached its outcome. A failing archive
    /// never affects the others.
    pub async fn run(&self, work: WorkMap, base_dir: impl AsRef<Path>) -> RunReport {
        self.run_with(work, base_dir.as_ref(), process_archive).await
    }

    /// [`Scheduler::run`] with `process` standing in for the per-archive work.
    async fn run_with<F>(&self, work: WorkMap, base_dir: &Path, process: F) -> RunReport
    where
        F: Fn(&Path, &str, TargetSet, &ExtractOptions) -> ArchiveSummary + Send + Sync + 'static,
    {
        let process = Arc::new(process);
        let limit = self.options.effective_concurrency();

        self.progress.set_total(work.len() as u64);
        info!(
            archives = work.len(),
            requests = work.request_count(),
            limit,
            "unpacking"
        );

        let semaphore = Arc::new(Semaphore::new(limit));
        let mut pending = FuturesUnordered::new();

        for (archive_id, targets) in work {
            let path = base_dir.join(&archive_id);
            let options = Arc::clone(&self.options);
            let semaphore = Arc::clone(&semaphore);
            let process = Arc::clone(&process);

            pending.push(async move {
                let summary = match semaphore.acquire_owned().await {
                    Ok(permit) => {
                        let id = archive_id.clone();
                        let task = tokio::task::spawn_blocking(move || {
                            let _permit = permit;
                            (*process)(&path, &id, targets, &options)
                        });
                        task.await.unwrap_or_else(|e| aborted(e.to_string()))
                    }
                    Err(e) => aborted(e.to_string()),
                };
                (archive_id, summary)
            });
        }

        let mut report = RunReport::default();
        while let Some((archive_id, summary)) = pending.next().await {
            if let Some(diagnostic) = summary.outcome.diagnostic(&archive_id) {
                self.diagnostics.emit(&diagnostic);
            }
            report.record(&summary);
            self.progress.increment();
        }

        info!(
            archives = report.archives,
            satisfied = report.satisfied,
            partially_missing = report.partially_missing,
            failed = report.failed,
            entries = report.entries_written,
            bytes = report.bytes_written,
            "done"
        );
        report
    }
}

fn aborted(reason: String) -> ArchiveSummary {
    ArchiveSummary {
        outcome: Outcome::Failed(ExtractError::TaskAborted(reason)),
        written: Written::default(),
    }
}
