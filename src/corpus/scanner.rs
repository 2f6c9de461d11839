// Per-file document scanner — an explicit state machine over tag events.
//
// States:
//   Idle        — between documents
//   InDocument  — inside <REUTERS> ... </REUTERS>, outside a body span
//   InBody      — inside a <BODY> span of the current document
//
// Body text can only accumulate while a document is open, so the
// "body outside a document" combination cannot be represented. Each tag
// event has its own transition; malformed markup produces a diagnostic and
// the affected state is discarded.

use tracing::debug;

use super::buckets::TopicBuckets;
use super::categories::{resolve_topic, CategorySet};
use super::diagnostics::{Diagnostics, ScanWarning, WarningKind};
use super::sgml::{self, TagEvent};

/// A document being assembled from the archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Topics from the `<TOPICS>` span, in document order.
    pub topics: Vec<String>,
    /// Body lines, each followed by a single space.
    pub body: String,
    /// False when the open tag said `TOPICS="NO"`.
    pub has_topics: bool,
}

impl Document {
    fn new(has_topics: bool) -> Self {
        Self {
            has_topics,
            ..Self::default()
        }
    }

    fn append_line(&mut self, text: &str) {
        self.body.push_str(text);
        self.body.push(' ');
    }
}

#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Idle,
    InDocument(Document),
    InBody(Document),
}

/// Counters for a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounts {
    /// Documents that reached their closing tag.
    pub closed: usize,
    /// Documents filed into a bucket.
    pub accepted: usize,
}

/// Scans the lines of one archive file.
pub struct DocumentScanner<'a> {
    file: String,
    categories: &'a CategorySet,
    state: ScanState,
    diagnostics: Diagnostics,
    counts: ScanCounts,
    last_line: usize,
}

impl<'a> DocumentScanner<'a> {
    pub fn new(file: impl Into<String>, categories: &'a CategorySet) -> Self {
        Self {
            file: file.into(),
            categories,
            state: ScanState::Idle,
            diagnostics: Diagnostics::new(),
            counts: ScanCounts::default(),
            last_line: 0,
        }
    }

    /// Feed one raw line (1-based `line_number`). Accepted documents are
    /// appended to `buckets`.
    pub fn feed(&mut self, line_number: usize, raw: &str, buckets: &mut TopicBuckets) {
        self.last_line = line_number;
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        // A topics span never ends the line's processing.
        if let Some(topics) = sgml::topics(line) {
            self.on_topics(topics);
        }

        match sgml::classify(line) {
            Some(TagEvent::Open { has_topics }) => self.on_open(line_number, line, has_topics),
            Some(TagEvent::Close) => self.on_close(line_number, line, buckets),
            Some(TagEvent::BodyOpen { inline }) => self.on_body_open(line_number, line, &inline),
            Some(TagEvent::BodyClose) => self.on_body_close(line_number, line),
            Some(TagEvent::Text(text)) => self.on_text(&text),
            None => {}
        }
    }

    /// End the scan, reporting a document left open at end of file.
    pub fn finish(mut self) -> (Diagnostics, ScanCounts) {
        match std::mem::take(&mut self.state) {
            ScanState::Idle => {}
            ScanState::InDocument(_) | ScanState::InBody(_) => {
                self.warn(self.last_line, "", WarningKind::UnterminatedDocument);
            }
        }
        (self.diagnostics, self.counts)
    }

    fn on_open(&mut self, line_number: usize, line: &str, has_topics: bool) {
        let has_topics = match std::mem::take(&mut self.state) {
            ScanState::Idle => has_topics,
            // A document opened over an unclosed one is never accepted.
            ScanState::InDocument(_) | ScanState::InBody(_) => {
                self.warn(line_number, line, WarningKind::MissingCloseTag);
                false
            }
        };
        self.state = ScanState::InDocument(Document::new(has_topics));
    }

    fn on_topics(&mut self, topics: Vec<String>) {
        match &mut self.state {
            ScanState::Idle => {}
            ScanState::InDocument(doc) | ScanState::InBody(doc) => doc.topics.extend(topics),
        }
    }

    fn on_close(&mut self, line_number: usize, line: &str, buckets: &mut TopicBuckets) {
        match std::mem::take(&mut self.state) {
            ScanState::Idle => self.warn(line_number, line, WarningKind::MissingOpenTag),
            ScanState::InDocument(doc) | ScanState::InBody(doc) => {
                self.counts.closed += 1;
                if let Some(topic) = accepted_topic(&doc, self.categories).map(str::to_string) {
                    debug!(file = %self.file, line_number, topic = %topic, "Accepted document");
                    buckets.push(&topic, doc.body);
                    self.counts.accepted += 1;
                }
            }
        }
    }

    fn on_body_open(&mut self, line_number: usize, line: &str, inline: &str) {
        self.state = match std::mem::take(&mut self.state) {
            ScanState::Idle => {
                self.warn(line_number, line, WarningKind::BodyOutsideDocument);
                ScanState::Idle
            }
            ScanState::InDocument(mut doc) => {
                if !inline.is_empty() {
                    doc.append_line(inline);
                }
                ScanState::InBody(doc)
            }
            ScanState::InBody(mut doc) => {
                self.warn(line_number, line, WarningKind::UnclosedBody);
                doc.body.clear();
                ScanState::InBody(doc)
            }
        };
    }

    fn on_body_close(&mut self, line_number: usize, line: &str) {
        self.state = match std::mem::take(&mut self.state) {
            ScanState::InBody(doc) => ScanState::InDocument(doc),
            other => {
                self.warn(line_number, line, WarningKind::MissingBodyOpen);
                other
            }
        };
    }

    fn on_text(&mut self, text: &str) {
        if let ScanState::InBody(doc) = &mut self.state {
            doc.append_line(text);
        }
    }

    fn warn(&mut self, line_number: usize, line: &str, kind: WarningKind) {
        self.diagnostics.push(ScanWarning {
            file: self.file.clone(),
            line_number,
            line: line.to_string(),
            kind,
        });
    }
}

/// The bucket a closed document goes into, if it passes every condition.
fn accepted_topic<'d>(doc: &'d Document, categories: &CategorySet) -> Option<&'d str> {
    if doc.body.is_empty() || doc.topics.is_empty() || !doc.has_topics {
        return None;
    }
    resolve_topic(&doc.topics, categories)
}

/// Scan a whole file's contents. Convenience wrapper over `DocumentScanner`.
pub fn scan_text(
    file: &str,
    contents: &str,
    categories: &CategorySet,
    buckets: &mut TopicBuckets,
) -> (Diagnostics, ScanCounts) {
    let mut scanner = DocumentScanner::new(file, categories);
    for (idx, line) in contents.lines().enumerate() {
        scanner.feed(idx + 1, line, buckets);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: &str = r#"<REUTERS TOPICS="YES" LEWISSPLIT="TRAIN" NEWID="1">"#;

    #[test]
    fn test_simple_document_accepted() {
        let text = format!(
            "{OPEN}\n<TOPICS><D>earn</D></TOPICS>\n<TEXT><BODY>Profit rose\nsharply.\nReuter\n&#3;</BODY></TEXT>\n</REUTERS>\n"
        );
        let cats = CategorySet::default();
        let mut buckets = TopicBuckets::new();
        let (diag, counts) = scan_text("a.sgm", &text, &cats, &mut buckets);

        assert!(diag.is_empty());
        assert_eq!(counts, ScanCounts { closed: 1, accepted: 1 });
        assert_eq!(buckets.get("earn").unwrap(), &["Profit rose sharply. ".to_string()]);
    }

    #[test]
    fn test_text_outside_body_ignored() {
        let text = format!(
            "{OPEN}\n<TOPICS><D>earn</D></TOPICS>\nstray line\n<BODY>kept\n</BODY></TEXT>\n</REUTERS>\n"
        );
        let mut buckets = TopicBuckets::new();
        scan_text("a.sgm", &text, &CategorySet::default(), &mut buckets);
        assert_eq!(buckets.get("earn").unwrap(), &["kept ".to_string()]);
    }

    #[test]
    fn test_unterminated_document_warns() {
        let text = format!("{OPEN}\n<BODY>never closed\n");
        let mut buckets = TopicBuckets::new();
        let (diag, counts) = scan_text("a.sgm", &text, &CategorySet::default(), &mut buckets);
        assert_eq!(diag.count(WarningKind::UnterminatedDocument), 1);
        assert_eq!(counts.closed, 0);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_topics_outside_document_not_carried_over() {
        let text = format!(
            "<TOPICS><D>earn</D></TOPICS>\n{OPEN}\n<BODY>no topics here\n</BODY></TEXT>\n</REUTERS>\n"
        );
        let mut buckets = TopicBuckets::new();
        let (diag, counts) = scan_text("a.sgm", &text, &CategorySet::default(), &mut buckets);
        assert!(diag.is_empty());
        assert_eq!(counts, ScanCounts { closed: 1, accepted: 0 });
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_body_outside_document_warns() {
        let mut buckets = TopicBuckets::new();
        let (diag, _) = scan_text(
            "a.sgm",
            "<BODY>orphan\nmore\n",
            &CategorySet::default(),
            &mut buckets,
        );
        assert_eq!(diag.count(WarningKind::BodyOutsideDocument), 1);
        assert!(buckets.is_empty());
    }
}
