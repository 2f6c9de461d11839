// Scan diagnostics — structural anomalies found while reading the archive.
//
// Every anomaly is recoverable: the scanner discards the affected state and
// carries on. Each one is kept as a record (so callers and tests can inspect
// them) and also emitted as a tracing warning.

use std::fmt;

use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// A new `<REUTERS>` started before the previous one was closed.
    MissingCloseTag,
    /// `</REUTERS>` with no open document.
    MissingOpenTag,
    /// A second `<BODY>` before the first was closed.
    UnclosedBody,
    /// `</BODY></TEXT>` with no open body.
    MissingBodyOpen,
    /// `<BODY>` outside any document.
    BodyOutsideDocument,
    /// The file ended inside a document.
    UnterminatedDocument,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::MissingCloseTag => "missing closing </REUTERS> tag",
            WarningKind::MissingOpenTag => "missing opening <REUTERS> tag",
            WarningKind::UnclosedBody => "missing closing </BODY> tag",
            WarningKind::MissingBodyOpen => "missing opening <BODY> tag",
            WarningKind::BodyOutsideDocument => "<BODY> outside of a document",
            WarningKind::UnterminatedDocument => "file ended inside a document",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub file: String,
    pub line_number: usize,
    pub line: String,
    pub kind: WarningKind,
}

/// Ordered collection of warnings from one or more files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    warnings: Vec<ScanWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn push(&mut self, warning: ScanWarning) {
        warn!(
            file = %warning.file,
            line_number = warning.line_number,
            line = %warning.line,
            "{}",
            warning.kind
        );
        self.warnings.push(warning);
    }

    /// Append the warnings of another scan, preserving their order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// How many warnings of the given kind were recorded.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }
}
