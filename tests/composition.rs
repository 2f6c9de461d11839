// Composition tests — the pipelines end to end on temporary directories.
//
//   archive dir -> extract_archive -> write_buckets -> per-topic files
//   label CSV + submission file -> evaluate
//
// Everything runs against tempfile directories; nothing touches the
// configured data paths.

use std::fs;
use std::path::Path;

use tcdata::corpus::archive::{archive_files, extract_archive};
use tcdata::corpus::categories::CategorySet;
use tcdata::corpus::diagnostics::WarningKind;
use tcdata::corpus::tokenize::{PunctuationTokenizer, WhitespaceTokenizer};
use tcdata::corpus::writer::write_buckets;
use tcdata::evaluation::ground_truth::GroundTruth;
use tcdata::evaluation::precision::{DEFAULT_CUTOFFS, PRIMARY_CUTOFF};
use tcdata::evaluation::report::evaluate;
use tcdata::evaluation::submission::Submission;

fn article(new_id: u32, topics_attr: &str, topics: &[&str], body: &str) -> String {
    let items: String = topics.iter().map(|t| format!("<D>{t}</D>")).collect();
    format!(
        "<REUTERS TOPICS=\"{topics_attr}\" LEWISSPLIT=\"TRAIN\" CGISPLIT=\"TRAINING-SET\" NEWID=\"{new_id}\">\n\
         <DATE>26-FEB-1987 15:01:01.79</DATE>\n\
         <TOPICS>{items}</TOPICS>\n\
         <TEXT>&#2;\n\
         <TITLE>TITLE {new_id}</TITLE>\n\
         <BODY>{body}\n\
         Reuter\n\
         &#3;</BODY></TEXT>\n\
         </REUTERS>\n"
    )
}

fn write_archive(dir: &Path, name: &str, articles: &[String]) {
    let mut contents = String::from("<!DOCTYPE lewis SYSTEM \"lewis.dtd\">\n");
    for a in articles {
        contents.push_str(a);
    }
    fs::write(dir.join(name), contents).unwrap();
}

fn read_dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================
// Extraction: archive -> buckets -> files
// ============================================================

#[test]
fn extract_and_write_per_topic_files() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_archive(
        input.path(),
        "reut2-000.sgm",
        &[
            article(1, "YES", &["earn"], "Profit rose, the company said."),
            article(2, "YES", &["earn", "acq"], "Ambiguous two-topic story."),
            article(3, "NO", &["earn"], "Untagged story."),
        ],
    );
    write_archive(
        input.path(),
        "reut2-001.sgm",
        &[
            article(4, "YES", &["cocoa", "crude"], "Oil output fell."),
            article(5, "YES", &["earn"], "Second earnings story."),
        ],
    );
    // Not an archive file; must be ignored
    fs::write(input.path().join("README.txt"), "<REUTERS TOPICS=\"YES\" X=\"1\">").unwrap();

    let outcome = extract_archive(input.path(), &CategorySet::default(), false).unwrap();
    assert_eq!(outcome.files_scanned, 2);
    assert_eq!(outcome.documents_seen, 5);
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.buckets.count("earn"), 2);
    assert_eq!(outcome.buckets.count("crude"), 1);
    assert_eq!(outcome.buckets.count("acq"), 0);

    let summary = write_buckets(&outcome.buckets, output.path(), 100, &PunctuationTokenizer).unwrap();
    assert_eq!(summary.total_written(), 3);

    assert_eq!(read_dir_names(output.path()), vec!["crude", "earn"]);
    assert_eq!(read_dir_names(&output.path().join("earn")), vec!["doc1.txt", "doc2.txt"]);

    let doc1 = fs::read_to_string(output.path().join("earn/doc1.txt")).unwrap();
    assert_eq!(doc1, "Profit rose , the company said .");
    let doc2 = fs::read_to_string(output.path().join("earn/doc2.txt")).unwrap();
    assert_eq!(doc2, "Second earnings story .");
}

#[test]
fn writer_caps_documents_per_topic() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let articles: Vec<String> = (1..=5)
        .map(|i| article(i, "YES", &["ship"], &format!("Story number {i}")))
        .collect();
    write_archive(input.path(), "reut2-000.sgm", &articles);

    let outcome = extract_archive(input.path(), &CategorySet::default(), false).unwrap();
    let summary = write_buckets(&outcome.buckets, output.path(), 3, &WhitespaceTokenizer).unwrap();

    assert_eq!(summary.topics.len(), 1);
    assert_eq!(summary.topics[0].accepted, 5);
    assert_eq!(summary.topics[0].written, 3);
    assert_eq!(
        read_dir_names(&output.path().join("ship")),
        vec!["doc1.txt", "doc2.txt", "doc3.txt"]
    );
    let doc3 = fs::read_to_string(output.path().join("ship/doc3.txt")).unwrap();
    assert_eq!(doc3, "Story number 3");
}

#[test]
fn writer_clears_stale_files_but_keeps_subdirectories() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let topic_dir = output.path().join("grain");
    fs::create_dir_all(topic_dir.join("notes")).unwrap();
    fs::write(topic_dir.join("doc7.txt"), "stale").unwrap();
    fs::write(topic_dir.join("notes/keep.txt"), "keep me").unwrap();

    write_archive(
        input.path(),
        "reut2-000.sgm",
        &[article(1, "YES", &["grain"], "Wheat harvest")],
    );
    let outcome = extract_archive(input.path(), &CategorySet::default(), false).unwrap();
    write_buckets(&outcome.buckets, output.path(), 100, &WhitespaceTokenizer).unwrap();

    assert_eq!(read_dir_names(&topic_dir), vec!["doc1.txt", "notes"]);
    assert!(topic_dir.join("notes/keep.txt").exists());
}

#[test]
fn malformed_file_does_not_stop_later_files() {
    let input = tempfile::tempdir().unwrap();

    // First file: document never closed before the next one opens
    let broken = "<REUTERS TOPICS=\"YES\" NEWID=\"1\">\n<TOPICS><D>earn</D></TOPICS>\n<BODY>cut off\n"
        .to_string();
    write_archive(
        input.path(),
        "reut2-000.sgm",
        &[
            broken,
            article(2, "YES", &["earn"], "Opened over the broken one."),
            article(3, "YES", &["earn"], "Survives."),
        ],
    );
    write_archive(
        input.path(),
        "reut2-001.sgm",
        &[article(4, "YES", &["trade"], "Tariffs.")],
    );

    let outcome = extract_archive(input.path(), &CategorySet::default(), false).unwrap();

    assert_eq!(outcome.diagnostics.count(WarningKind::MissingCloseTag), 1);
    assert_eq!(outcome.diagnostics.warnings()[0].file, "reut2-000.sgm");
    assert_eq!(
        outcome.buckets.get("earn").unwrap(),
        &["Survives. ".to_string()]
    );
    assert_eq!(outcome.buckets.count("trade"), 1);
}

#[test]
fn invalid_utf8_bytes_are_dropped() {
    let input = tempfile::tempdir().unwrap();
    let mut bytes = article(1, "YES", &["coffee"], "Caf\u{0}").into_bytes();
    // Replace the NUL placeholder with a lone Latin-1 byte
    let pos = bytes.iter().position(|&b| b == 0).unwrap();
    bytes[pos] = 0xe9;
    fs::write(input.path().join("reut2-000.sgm"), bytes).unwrap();

    let outcome = extract_archive(input.path(), &CategorySet::default(), false).unwrap();
    assert_eq!(outcome.buckets.get("coffee").unwrap(), &["Caf ".to_string()]);
}

#[test]
fn empty_archive_directory_yields_nothing() {
    let input = tempfile::tempdir().unwrap();
    assert!(archive_files(input.path()).unwrap().is_empty());

    let outcome = extract_archive(input.path(), &CategorySet::default(), false).unwrap();
    assert_eq!(outcome.files_scanned, 0);
    assert!(outcome.buckets.is_empty());
}

#[test]
fn missing_archive_directory_is_an_error() {
    let input = tempfile::tempdir().unwrap();
    let missing = input.path().join("nope");
    assert!(extract_archive(&missing, &CategorySet::default(), false).is_err());
}

// ============================================================
// Evaluation: files -> report
// ============================================================

#[test]
fn evaluate_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let labels = dir.path().join("labels.csv");
    let output = dir.path().join("submission.txt");
    fs::write(&labels, "101,1\n102,0\n103,1\n").unwrap();
    fs::write(&output, "103 0.95\n\n102 0.40\n101 0.75\n").unwrap();

    let truth = GroundTruth::load(&labels).unwrap();
    let submission = Submission::load(&output).unwrap();
    let report = evaluate(&truth, &submission, PRIMARY_CUTOFF, &DEFAULT_CUTOFFS).unwrap();

    assert_eq!(report.ranked_count, 3);
    assert!((report.accuracy.unwrap() - 1.0).abs() < 1e-9);
    // ranked truth 1 0 1: AP = (1 + 2/3) / 2
    let ap = (1.0 + 2.0 / 3.0) / 2.0 * 100.0;
    assert!((report.primary.percent - ap).abs() < 1e-9);
    assert_eq!(report.cutoffs.scores.len(), 4);
    assert!((report.cutoffs.mean_percent - ap).abs() < 1e-9);
}

#[test]
fn unknown_id_aborts_before_any_metric() {
    let dir = tempfile::tempdir().unwrap();
    let labels = dir.path().join("labels.csv");
    let output = dir.path().join("submission.txt");
    fs::write(&labels, "101,1\n102,0\n").unwrap();
    fs::write(&output, "101 0.9\n102 0.2\n103 0.7\n").unwrap();

    let truth = GroundTruth::load(&labels).unwrap();
    let submission = Submission::load(&output).unwrap();
    let result = evaluate(&truth, &submission, PRIMARY_CUTOFF, &DEFAULT_CUTOFFS);

    let err = result.unwrap_err();
    assert!(err.to_string().contains("103"));
}

#[test]
fn missing_label_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GroundTruth::load(&dir.path().join("absent.csv")).unwrap_err();
    assert!(err.to_string().contains("absent.csv"));
}
