// Colored terminal output for evaluation reports and extraction summaries.
//
// main.rs delegates all result display here; logs go through tracing.

use colored::Colorize;

use crate::corpus::archive::ExtractionOutcome;
use crate::corpus::writer::WriteSummary;
use crate::evaluation::report::EvaluationReport;

/// How many scan warnings to list before summarizing the rest.
const MAX_WARNINGS_SHOWN: usize = 10;

/// Display an evaluation report.
pub fn display_evaluation(report: &EvaluationReport) {
    println!("{}", "Ground-truth label distribution".bold());
    let distribution: Vec<String> = report
        .label_distribution
        .iter()
        .map(|(label, count)| format!("{label}: {count}"))
        .collect();
    println!("  {}", distribution.join(", "));
    println!();

    println!(
        "Ranked documents: {}  (with scores: {})",
        report.ranked_count, report.predicted_count
    );

    match (&report.accuracy, &report.classification) {
        (Some(accuracy), Some(classification)) => {
            println!("Accuracy: {}", format!("{accuracy:.4}").green());
            println!("\n{}", "Detailed classification report".bold());
            println!("{classification}");
        }
        _ => {
            println!(
                "{}",
                "Not every line has a score; skipping accuracy and classification report."
                    .dimmed()
            );
            println!();
        }
    }

    println!(
        "{}",
        format!("AP@{} = {:.4} %", report.primary.k, report.primary.percent).bold()
    );

    for score in &report.cutoffs.scores {
        println!("  AP@{:<4} = {:>8.4}", score.k, score.percent);
    }

    let cutoff_list: Vec<String> = report
        .cutoffs
        .scores
        .iter()
        .map(|s| s.k.to_string())
        .collect();
    println!(
        "{}",
        format!(
            "Mean AP@ [{}] = {:.4}",
            cutoff_list.join(", "),
            report.cutoffs.mean_percent
        )
        .bold()
    );
}

/// Display what the extractor found and wrote.
pub fn display_extraction(outcome: &ExtractionOutcome, summary: &WriteSummary) {
    println!(
        "\n{}",
        format!(
            "=== Extraction ({} files, {} documents) ===",
            outcome.files_scanned, outcome.documents_seen
        )
        .bold()
    );

    let warnings = outcome.diagnostics.warnings();
    if warnings.is_empty() {
        println!("  {}", "No markup problems found".green());
    } else {
        println!(
            "  {} {} markup warnings",
            "!".yellow().bold(),
            warnings.len()
        );
        for warning in warnings.iter().take(MAX_WARNINGS_SHOWN) {
            let preview = super::truncate_chars(&warning.line, 60);
            println!(
                "    {}:{}  {}  {}",
                warning.file,
                warning.line_number,
                warning.kind.as_str().yellow(),
                preview.dimmed()
            );
        }
        if warnings.len() > MAX_WARNINGS_SHOWN {
            println!(
                "    {}",
                format!("... and {} more", warnings.len() - MAX_WARNINGS_SHOWN).dimmed()
            );
        }
    }

    println!();
    if summary.topics.is_empty() {
        println!("  No documents matched the configured categories.");
        return;
    }

    println!(
        "  {:<12} {:>8} {:>8}",
        "Topic".dimmed(),
        "Accepted".dimmed(),
        "Written".dimmed()
    );
    println!("  {}", "-".repeat(30).dimmed());
    for topic in &summary.topics {
        println!(
            "  {:<12} {:>8} {:>8}",
            topic.topic, topic.accepted, topic.written
        );
    }
    println!();
    println!("  Total written: {}", summary.total_written());
}
