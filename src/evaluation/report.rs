// Evaluation report — aligns a submission to ground truth and scores it.
//
// The whole report is computed before anything is displayed, so a fatal
// input problem (unknown document id) never leaves a partial summary behind.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use super::classification::{self, ClassificationReport};
use super::ground_truth::GroundTruth;
use super::precision::{self, CutoffScore, CutoffScores};
use super::submission::Submission;

/// Everything `tcdata evaluate` prints.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Rows per label in the ground-truth file.
    pub label_distribution: BTreeMap<i64, usize>,
    /// Number of ranked entries in the submission.
    pub ranked_count: usize,
    /// Number of entries that carried a score.
    pub predicted_count: usize,
    /// Present only when every ranked entry carried a score.
    pub accuracy: Option<f64>,
    pub classification: Option<ClassificationReport>,
    /// AP at the headline cutoff, as a percentage.
    pub primary: CutoffScore,
    pub cutoffs: CutoffScores,
}

/// Ground-truth labels in the submission's ranked order.
///
/// Fails on the first submission id that has no ground-truth label.
pub fn align(truth: &GroundTruth, submission: &Submission) -> Result<Vec<i64>> {
    submission
        .predictions
        .iter()
        .enumerate()
        .map(|(rank, prediction)| match truth.get(&prediction.doc_id) {
            Some(label) => Ok(label),
            None => anyhow::bail!(
                "Document {:?} (rank {}) is not in the ground-truth labels",
                prediction.doc_id,
                rank + 1
            ),
        })
        .collect()
}

/// Score a submission against ground truth at the given AP cutoffs.
pub fn evaluate(
    truth: &GroundTruth,
    submission: &Submission,
    primary_cutoff: usize,
    cutoffs: &[usize],
) -> Result<EvaluationReport> {
    let ranked_truth = align(truth, submission)?;
    let predicted = submission.predicted_labels();

    info!(
        ranked = ranked_truth.len(),
        predicted = predicted.len(),
        "Aligned submission to ground truth"
    );

    let (accuracy, classification) = if predicted.len() == ranked_truth.len() {
        let accuracy = classification::accuracy(&ranked_truth, &predicted)?;
        let report = classification::classification_report(&ranked_truth, &predicted)?;
        (Some(accuracy), Some(report))
    } else {
        debug!(
            missing = ranked_truth.len() - predicted.len(),
            "Some entries have no score, skipping classification metrics"
        );
        (None, None)
    };

    let primary = CutoffScore {
        k: primary_cutoff,
        percent: 100.0 * precision::average_precision_at_k(primary_cutoff, &ranked_truth),
    };

    Ok(EvaluationReport {
        label_distribution: truth.distribution(),
        ranked_count: ranked_truth.len(),
        predicted_count: predicted.len(),
        accuracy,
        classification,
        primary,
        cutoffs: precision::cutoff_scores(&ranked_truth, cutoffs),
    })
}
