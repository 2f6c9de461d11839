// Submission files — a ranked list of document ids with optional scores.
//
// One document per line: `<doc_id> [<score>]`, whitespace-separated. Line
// order is the ranking. Only lines with exactly two fields carry a score;
// a score above 0.5 predicts the positive class.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Scores strictly above this threshold predict label 1.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// One ranked entry of a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPrediction {
    pub doc_id: String,
    pub score: Option<f64>,
}

impl RankedPrediction {
    /// The predicted class, if this entry carried a score.
    pub fn predicted_label(&self) -> Option<i64> {
        self.score
            .map(|score| if score > DECISION_THRESHOLD { 1 } else { 0 })
    }
}

/// A parsed submission in ranked order.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub predictions: Vec<RankedPrediction>,
}

impl Submission {
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open submission file: {}", path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to read submission file: {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut predictions = Vec::new();

        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            predictions.push(parse_line(line, idx + 1)?);
        }

        Ok(Self { predictions })
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Predicted labels for the entries that carried a score, in rank order.
    pub fn predicted_labels(&self) -> Vec<i64> {
        self.predictions
            .iter()
            .filter_map(RankedPrediction::predicted_label)
            .collect()
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<RankedPrediction> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let Some(doc_id) = fields.first() else {
        anyhow::bail!("Submission line {line_number} has no fields");
    };

    let score = if fields.len() == 2 {
        let score: f64 = fields[1].parse().with_context(|| {
            format!(
                "Submission line {line_number}: score {:?} is not a number",
                fields[1]
            )
        })?;
        Some(score)
    } else {
        None
    };

    Ok(RankedPrediction {
        doc_id: doc_id.to_string(),
        score,
    })
}
