use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::debug;
use unpack_archive::{ArchiveFile, EntrySource};
use unpack_manifest::TargetSet;

use crate::error::{ExtractError, Result};
use crate::options::ExtractOptions;
use crate::outcome::{ArchiveSummary, Outcome};

/// Running totals of what one archive pass put on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Written {
    pub entries: usize,
    pub bytes: u64,
}

/// Stream `source` once and write every entry named in `targets` into
/// `output_dir`.
///
/// Extracted names are removed from `targets`, so whatever is left when this
/// returns `Ok` was not found. Entries that are not requested, or are not
/// regular files, are skipped without touching their content. Entry names are
/// joined onto `output_dir` as-is and missing parent directories are not
/// created.
///
/// On error, `written` still reflects the entries completed before it.
pub fn extract_requested<S>(
    source: &mut S,
    targets: &mut TargetSet,
    output_dir: &Path,
    buffer: &mut [u8],
    written: &mut Written,
) -> Result<()>
where
    S: EntrySource + ?Sized,
{
    while !targets.is_empty() {
        let Some(next) = source.next_entry() else {
            break;
        };
        let mut entry = next.map_err(ExtractError::ArchiveRead)?;
        if !entry.is_file() || !targets.contains(entry.name()) {
            continue;
        }

        let dest = output_dir.join(entry.name());
        let mut file = File::create(&dest).map_err(|e| ExtractError::write(&dest, e))?;
        let bytes = copy_through(&mut entry, &mut file, buffer, &dest)?;

        debug!(entry = entry.name(), bytes, "extracted");
        targets.remove(entry.name());
        written.entries += 1;
        written.bytes += bytes;
    }
    Ok(())
}

fn copy_through<R, W>(reader: &mut R, writer: &mut W, buffer: &mut [u8], dest: &Path) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total = 0u64;
    loop {
        let n = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractError::ArchiveRead(e.into())),
        };
        writer
            .write_all(&buffer[..n])
            .map_err(|e| ExtractError::write(dest, e))?;
        total += n as u64;
    }
    writer.flush().map_err(|e| ExtractError::write(dest, e))?;
    Ok(total)
}

/// Run the whole per-archive procedure for the archive at `path`.
///
/// Never fails: every problem becomes the archive's [`Outcome`].
pub fn process_archive(
    path: &Path,
    archive_id: &str,
    mut targets: TargetSet,
    options: &ExtractOptions,
) -> ArchiveSummary {
    let mut written = Written::default();

    let result = ArchiveFile::open(path)
        .map_err(ExtractError::ArchiveOpen)
        .and_then(|mut archive| {
            debug!(archive = archive_id, format = ?archive.format(), "opened");
            let mut entries = archive.entries().map_err(ExtractError::ArchiveOpen)?;
            let mut buffer = options.allocate_buffer();
            extract_requested(
                &mut entries,
                &mut targets,
                &options.output_dir,
                &mut buffer,
                &mut written,
            )
        });

    let outcome = match result {
        Ok(()) => Outcome::from_remaining(targets),
        Err(err) => Outcome::Failed(err),
    };
    debug!(
        archive = archive_id,
        entries = written.entries,
        bytes = written.bytes,
        satisfied = outcome.is_satisfied(),
        "archive done"
    );
    ArchiveSummary { outcome, written }
}
