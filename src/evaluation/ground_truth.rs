// Ground-truth labels — the authoritative id -> label mapping.
//
// The label file is a headerless two-column CSV: document id, label.
// Labels are integers (0/1 for the course task). When an id repeats, the
// later row wins, but every row still counts toward the distribution.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    labels: HashMap<String, i64>,
    /// Labels in file row order, duplicates included.
    row_labels: Vec<i64>,
}

impl GroundTruth {
    /// Load a label file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open label file: {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to read label file: {}", path.display()))
    }

    /// Parse label rows from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut truth = GroundTruth::default();

        for (idx, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("CSV parse error at row {}", idx + 1))?;

            // Fully blank rows carry nothing to score against.
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            if record.len() < 2 {
                anyhow::bail!(
                    "Label row {} has {} column(s), expected id and label",
                    idx + 1,
                    record.len()
                );
            }

            let id = record.get(0).unwrap_or_default().to_string();
            let raw_label = record.get(1).unwrap_or_default();
            let label = parse_label(raw_label)
                .with_context(|| format!("Invalid label {raw_label:?} at row {}", idx + 1))?;

            truth.insert(id, label);
        }

        Ok(truth)
    }

    /// Add a single id/label pair.
    pub fn insert(&mut self, id: impl Into<String>, label: i64) {
        self.labels.insert(id.into(), label);
        self.row_labels.push(label);
    }

    pub fn get(&self, id: &str) -> Option<i64> {
        self.labels.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.labels.contains_key(id)
    }

    /// Number of rows read from the label file.
    pub fn row_count(&self) -> usize {
        self.row_labels.len()
    }

    /// Count of rows per label, ordered by label.
    pub fn distribution(&self) -> BTreeMap<i64, usize> {
        let mut counts = BTreeMap::new();
        for &label in &self.row_labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }
}

/// Accept plain integers and integral floats such as "1.0".
fn parse_label(raw: &str) -> Result<i64> {
    if let Ok(label) = raw.parse::<i64>() {
        return Ok(label);
    }
    let value: f64 = raw.parse().context("not a number")?;
    if value.fract() != 0.0 || !value.is_finite() {
        anyhow::bail!("not an integer label");
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_basic() {
        let csv = "img1,1\nimg2,0\nimg3,1\n";
        let truth = GroundTruth::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(truth.row_count(), 3);
        assert_eq!(truth.get("img1"), Some(1));
        assert_eq!(truth.get("img2"), Some(0));
        assert!(!truth.contains("img4"));
    }

    #[test]
    fn test_float_labels_accepted() {
        let truth = GroundTruth::from_reader("a,1.0\nb,0.0\n".as_bytes()).unwrap();
        assert_eq!(truth.get("a"), Some(1));
        assert_eq!(truth.get("b"), Some(0));
    }

    #[test]
    fn test_non_numeric_label_fails() {
        let result = GroundTruth::from_reader("a,yes\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_label_column_fails() {
        let result = GroundTruth::from_reader("a\n".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let truth = GroundTruth::from_reader("a,0\na,1\n".as_bytes()).unwrap();
        assert_eq!(truth.get("a"), Some(1));
        assert_eq!(truth.row_count(), 2);
        let dist = truth.distribution();
        assert_eq!(dist[&0], 1);
        assert_eq!(dist[&1], 1);
    }
}
