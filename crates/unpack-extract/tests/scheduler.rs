use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tempfile::TempDir;
use unpack_extract::{Diagnostic, DiagnosticSink, ExtractOptions, ProgressSink, RunReport, Scheduler};
use unpack_manifest::WorkMap;

#[derive(Default)]
struct Counter {
    total: AtomicU64,
    done: AtomicU64,
}

impl ProgressSink for Counter {
    fn set_total(&self, total: u64) {
        self.total.store(total, Ordering::SeqCst);
    }

    fn increment(&self) {
        self.done.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<Diagnostic>>);

impl Recorder {
    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.0.lock().unwrap().iter().map(ToString::to_string).collect();
        lines.sort();
        lines
    }
}

impl DiagnosticSink for Recorder {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.0.lock().unwrap().push(diagnostic.clone());
    }
}

struct Fixture {
    archives: TempDir,
    out: TempDir,
    progress: Counter,
    diagnostics: Recorder,
}

impl Fixture {
    fn new() -> Self {
        Self {
            archives: tempfile::tempdir().unwrap(),
            out: tempfile::tempdir().unwrap(),
            progress: Counter::default(),
            diagnostics: Recorder::default(),
        }
    }

    fn zip(&self, name: &str, entries: &[(&str, &[u8])]) {
        let file = File::create(self.archives.path().join(name)).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (entry, content) in entries {
            writer.start_file(*entry, options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap();
    }

    fn tar_gz(&self, name: &str, entries: &[(&str, &[u8])]) {
        let file = File::create(self.archives.path().join(name)).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (entry, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, entry, *content).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    async fn run(&self, cells: &[&str], concurrency: usize) -> RunReport {
        let options = ExtractOptions::default()
            .output_dir(self.out.path())
            .concurrency(concurrency);
        let scheduler = Scheduler::new(options, &self.progress, &self.diagnostics);
        scheduler
            .run(WorkMap::from_cells(cells), self.archives.path())
            .await
    }

    fn output(&self, name: &str) -> Option<Vec<u8>> {
        fs::read(self.out.path().join(name)).ok()
    }

    fn out_path(&self) -> &Path {
        self.out.path()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_targets_produce_one_warning() {
    let fx = Fixture::new();
    fx.zip("A.zip", &[("a", b"1"), ("b", b"2"), ("c", b"3")]);

    let report = fx.run(&["A.zip!a", "A.zip!c", "A.zip!z"], 2).await;

    assert_eq!(fx.output("a").as_deref(), Some(&b"1"[..]));
    assert_eq!(fx.output("c").as_deref(), Some(&b"3"[..]));
    assert_eq!(fx.output("b"), None);
    assert_eq!(fx.output("z"), None);
    assert_eq!(fx.diagnostics.lines(), vec!["WARN:A.zip:missing z"]);
    assert_eq!(report.partially_missing, 1);
    assert_eq!(report.entries_written, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_archive_does_not_stop_the_others() {
    let fx = Fixture::new();
    fx.zip("A.zip", &[("a", b"from a")]);
    fx.tar_gz("C.tar.gz", &[("c", b"from c")]);

    let report = fx.run(&["A.zip!a", "B.zip!b", "C.tar.gz!c"], 2).await;

    let lines = fx.diagnostics.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("ERROR:B.zip:"), "got {lines:?}");
    assert_eq!(fx.output("a").as_deref(), Some(&b"from a"[..]));
    assert_eq!(fx.output("c").as_deref(), Some(&b"from c"[..]));
    assert_eq!(report.failed, 1);
    assert_eq!(report.satisfied, 2);
    assert_eq!(fx.progress.done.load(Ordering::SeqCst), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn fully_satisfied_run_is_silent() {
    let fx = Fixture::new();
    fx.zip("A.zip", &[("a", b"1"), ("b", b"2")]);
    fx.tar_gz("B.tgz", &[("x", b"3"), ("y", b"4")]);

    let report = fx.run(&["A.zip!a", "A.zip!b", "B.tgz!y"], 4).await;

    assert!(fx.diagnostics.lines().is_empty());
    assert!(!report.has_problems());
    assert_eq!(report.entries_written, 3);
    assert_eq!(fx.output("x"), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn rerun_produces_identical_files() {
    let fx = Fixture::new();
    fx.zip("A.zip", &[("a", b"payload one"), ("b", b"payload two")]);
    let cells = ["A.zip!a", "A.zip!b"];

    fx.run(&cells, 1).await;
    let first = (fx.output("a"), fx.output("b"));
    fx.run(&cells, 1).await;
    let second = (fx.output("a"), fx.output("b"));

    assert_eq!(first, second);
    assert!(fx.diagnostics.lines().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn every_archive_completes_once_under_a_small_limit() {
    let fx = Fixture::new();
    let names: Vec<String> = (0..8).map(|i| format!("part{i}.zip")).collect();
    let cells: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let entry = format!("file{i}");
            fx.zip(name, &[(entry.as_str(), entry.as_bytes())]);
            format!("{name}!{entry}")
        })
        .collect();
    let cells: Vec<&str> = cells.iter().map(String::as_str).collect();

    let report = fx.run(&cells, 3).await;

    assert_eq!(fx.progress.total.load(Ordering::SeqCst), 8);
    assert_eq!(fx.progress.done.load(Ordering::SeqCst), 8);
    assert_eq!(report.archives, 8);
    assert_eq!(report.satisfied, 8);
    for i in 0..8 {
        let name = format!("file{i}");
        assert_eq!(fx.output(&name).as_deref(), Some(name.as_bytes()));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_archive_name_is_an_error() {
    let fx = Fixture::new();

    let report = fx.run(&["!a"], 1).await;

    let lines = fx.diagnostics.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("ERROR::"), "got {lines:?}");
    assert_eq!(report.failed, 1);
    assert!(!fx.out_path().join("a").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_work_map_finishes_immediately() {
    let fx = Fixture::new();

    let report = fx.run(&["header", "no request"], 2).await;

    assert_eq!(report, RunReport::default());
    assert_eq!(fx.progress.total.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn encrypted_entry_only_matters_when_requested() {
    let fx = Fixture::new();
    for name in ["locked.zip", "locked-too.zip"] {
        let file = File::create(fx.archives.path().join(name)).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let locked = zip::write::SimpleFileOptions::default()
            .with_aes_encryption(zip::AesMode::Aes256, "hunter2");
        writer.start_file("secret", locked).unwrap();
        writer.write_all(b"classified").unwrap();
        writer
            .start_file(
                if name == "locked.zip" { "a" } else { "b" },
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
        writer.write_all(b"open").unwrap();
        writer.finish().unwrap();
    }

    let report = fx
        .run(&["locked.zip!a", "locked-too.zip!secret"], 2)
        .await;

    assert_eq!(fx.output("a").as_deref(), Some(&b"open"[..]));
    let lines = fx.diagnostics.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("ERROR:locked-too.zip:"), "got {lines:?}");
    assert_eq!(report.satisfied, 1);
    assert_eq!(report.failed, 1);
}
