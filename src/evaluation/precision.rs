// Average precision at k — the ranking metric for submissions.
//
// A submission is a ranked list of documents. Walking it top-down, every
// relevant document contributes the precision at its rank; the score is the
// mean of those contributions over the first k positions. Relevant documents
// near the top are worth more than the same documents further down.

use serde::Serialize;

/// Cutoff reported on its own as the headline number.
pub const PRIMARY_CUTOFF: usize = 480;

/// Cutoffs reported individually and averaged into the mean AP.
pub const DEFAULT_CUTOFFS: [usize; 4] = [50, 100, 250, 480];

/// Average precision over the first `k` labels of a ranked sequence.
///
/// A label of `1` marks a relevant document; anything else is non-relevant.
/// `k` larger than the sequence is clamped to its length. Returns 0.0 when no
/// relevant document appears within the cutoff.
pub fn average_precision_at_k(k: usize, labels: &[i64]) -> f64 {
    let k = k.min(labels.len());

    let mut hits = 0.0;
    let mut score = 0.0;

    for (i, &label) in labels[..k].iter().enumerate() {
        if label == 1 {
            hits += 1.0;
            score += hits / (i as f64 + 1.0);
        }
    }

    if hits == 0.0 {
        return 0.0;
    }
    score / hits
}

/// AP@k for one cutoff, expressed as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffScore {
    pub k: usize,
    pub percent: f64,
}

/// AP@k at several cutoffs plus their mean (all percentages).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffScores {
    pub scores: Vec<CutoffScore>,
    pub mean_percent: f64,
}

/// Compute `100 * AP@k` for each cutoff, in the given order, and the mean.
pub fn cutoff_scores(labels: &[i64], cutoffs: &[usize]) -> CutoffScores {
    let scores: Vec<CutoffScore> = cutoffs
        .iter()
        .map(|&k| CutoffScore {
            k,
            percent: 100.0 * average_precision_at_k(k, labels),
        })
        .collect();

    let mean_percent = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|s| s.percent).sum::<f64>() / scores.len() as f64
    };

    CutoffScores {
        scores,
        mean_percent,
    }
}
