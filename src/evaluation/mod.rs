// Submission evaluation — ground truth, ranked predictions, and metrics.

pub mod classification;
pub mod ground_truth;
pub mod precision;
pub mod report;
pub mod submission;
