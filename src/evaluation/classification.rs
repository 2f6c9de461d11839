// Classification metrics — accuracy and a per-class precision/recall/F1 table.
//
// Classes are the union of labels seen in the truth and prediction
// sequences. Any ratio with a zero denominator is reported as 0.0.

use std::collections::BTreeSet;
use std::fmt;

use anyhow::Result;
use serde::Serialize;

/// Metrics for one class (or one averaged row).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of truth labels in this class (total for averaged rows).
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// Per-class rows, ordered by label.
    pub classes: Vec<(i64, ClassMetrics)>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

/// Fraction of positions where truth and prediction agree.
pub fn accuracy(truth: &[i64], predicted: &[i64]) -> Result<f64> {
    check_lengths(truth, predicted)?;
    if truth.is_empty() {
        return Ok(0.0);
    }
    let correct = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| t == p)
        .count();
    Ok(correct as f64 / truth.len() as f64)
}

/// Build the per-class report for two aligned label sequences.
pub fn classification_report(truth: &[i64], predicted: &[i64]) -> Result<ClassificationReport> {
    check_lengths(truth, predicted)?;

    let labels: BTreeSet<i64> = truth.iter().chain(predicted).copied().collect();

    let classes: Vec<(i64, ClassMetrics)> = labels
        .iter()
        .map(|&label| (label, class_metrics(label, truth, predicted)))
        .collect();

    let total_support: usize = classes.iter().map(|(_, m)| m.support).sum();
    let n_classes = classes.len().max(1) as f64;

    let macro_avg = ClassMetrics {
        precision: classes.iter().map(|(_, m)| m.precision).sum::<f64>() / n_classes,
        recall: classes.iter().map(|(_, m)| m.recall).sum::<f64>() / n_classes,
        f1: classes.iter().map(|(_, m)| m.f1).sum::<f64>() / n_classes,
        support: total_support,
    };

    let weighted_avg = ClassMetrics {
        precision: weighted_mean(&classes, total_support, |m| m.precision),
        recall: weighted_mean(&classes, total_support, |m| m.recall),
        f1: weighted_mean(&classes, total_support, |m| m.f1),
        support: total_support,
    };

    Ok(ClassificationReport {
        classes,
        accuracy: accuracy(truth, predicted)?,
        macro_avg,
        weighted_avg,
    })
}

fn class_metrics(label: i64, truth: &[i64], predicted: &[i64]) -> ClassMetrics {
    let mut true_pos = 0usize;
    let mut false_pos = 0usize;
    let mut false_neg = 0usize;

    for (&t, &p) in truth.iter().zip(predicted) {
        match (t == label, p == label) {
            (true, true) => true_pos += 1,
            (false, true) => false_pos += 1,
            (true, false) => false_neg += 1,
            (false, false) => {}
        }
    }

    let precision = ratio(true_pos, true_pos + false_pos);
    let recall = ratio(true_pos, true_pos + false_neg);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics {
        precision,
        recall,
        f1,
        support: true_pos + false_neg,
    }
}

/// Support-weighted mean of one metric across classes.
fn weighted_mean(
    classes: &[(i64, ClassMetrics)],
    total_support: usize,
    field: impl Fn(&ClassMetrics) -> f64,
) -> f64 {
    if total_support == 0 {
        return 0.0;
    }
    classes
        .iter()
        .map(|(_, m)| field(m) * m.support as f64)
        .sum::<f64>()
        / total_support as f64
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn check_lengths(truth: &[i64], predicted: &[i64]) -> Result<()> {
    if truth.len() != predicted.len() {
        anyhow::bail!(
            "Label sequences differ in length: {} truth vs {} predicted",
            truth.len(),
            predicted.len()
        );
    }
    Ok(())
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, m) in &self.classes {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                label, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
