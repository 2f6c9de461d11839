// Writes topic buckets to disk as tokenized plain-text files.
//
// Layout: <output_dir>/<topic>/doc1.txt, doc2.txt, ... Each topic directory
// is emptied of plain files first so a re-run never mixes old and new
// documents; subdirectories are left alone.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::buckets::TopicBuckets;
use super::tokenize::WordTokenizer;

/// What was written for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicOutput {
    pub topic: String,
    pub directory: PathBuf,
    /// Documents accepted into the bucket.
    pub accepted: usize,
    /// Documents written (at most the per-topic cap).
    pub written: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub topics: Vec<TopicOutput>,
}

impl WriteSummary {
    pub fn total_written(&self) -> usize {
        self.topics.iter().map(|t| t.written).sum()
    }
}

/// Write the first `max_per_topic` documents of every bucket.
pub fn write_buckets(
    buckets: &TopicBuckets,
    output_dir: &Path,
    max_per_topic: usize,
    tokenizer: &dyn WordTokenizer,
) -> Result<WriteSummary> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let mut summary = WriteSummary::default();

    for (topic, docs) in buckets.iter() {
        let dir = output_dir.join(topic);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create topic directory: {}", dir.display()))?;
        let removed = clear_plain_files(&dir)?;

        let mut written = 0;
        for (i, doc) in docs.iter().take(max_per_topic).enumerate() {
            let path = dir.join(format!("doc{}.txt", i + 1));
            let tokens = tokenizer
                .tokenize(doc)
                .with_context(|| format!("Failed to tokenize document for {}", path.display()))?;
            std::fs::write(&path, tokens.join(" "))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written += 1;
        }

        info!(
            topic,
            accepted = docs.len(),
            written,
            removed,
            "Wrote topic directory"
        );

        summary.topics.push(TopicOutput {
            topic: topic.to_string(),
            directory: dir,
            accepted: docs.len(),
            written,
        });
    }

    Ok(summary)
}

/// Delete the plain files directly inside `dir`. A file that cannot be
/// removed is logged and skipped. Returns how many were removed.
pub fn clear_plain_files(dir: &Path) -> Result<usize> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    let mut removed = 0;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list directory: {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove stale file"),
        }
    }
    Ok(removed)
}
