// Archive traversal — runs the document scanner over every `.sgm` file.
//
// Files are processed one at a time in sorted name order. Each file is read
// whole, decoded as UTF-8 with invalid bytes dropped, scanned, and released
// before the next one is opened. Only the topic buckets and diagnostics
// carry over between files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use super::buckets::TopicBuckets;
use super::categories::CategorySet;
use super::diagnostics::Diagnostics;
use super::scanner::scan_text;

const ARCHIVE_EXTENSION: &str = "sgm";

/// Result of scanning a whole archive directory.
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub buckets: TopicBuckets,
    pub diagnostics: Diagnostics,
    pub files_scanned: usize,
    /// Documents that reached a closing tag, accepted or not.
    pub documents_seen: usize,
}

/// List the archive files in `dir`, sorted by file name.
pub fn archive_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read archive directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read archive directory: {}", dir.display()))?
            .path();
        let is_archive = path.extension().is_some_and(|ext| ext == ARCHIVE_EXTENSION);
        if is_archive && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Scan every archive file in `dir`, bucketing accepted documents.
pub fn extract_archive(
    dir: &Path,
    categories: &CategorySet,
    show_progress: bool,
) -> Result<ExtractionOutcome> {
    let files = archive_files(dir)?;
    info!(dir = %dir.display(), files = files.len(), "Scanning archive");
    if files.is_empty() {
        warn!(dir = %dir.display(), "No .sgm files found");
    }

    let pb = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Scanning [{bar:30}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?,
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut outcome = ExtractionOutcome::default();

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        pb.set_message(name.clone());

        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read archive file: {}", path.display()))?;
        let contents = decode_dropping_invalid(&bytes);

        let (diagnostics, counts) =
            scan_text(&name, &contents, categories, &mut outcome.buckets);

        outcome.diagnostics.extend(diagnostics);
        outcome.documents_seen += counts.closed;
        outcome.files_scanned += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();

    info!(
        files = outcome.files_scanned,
        documents = outcome.documents_seen,
        accepted = outcome.buckets.total(),
        warnings = outcome.diagnostics.len(),
        "Archive scan complete"
    );

    Ok(outcome)
}

/// Decode UTF-8, silently dropping any invalid byte sequences.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
