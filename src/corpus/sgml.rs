// Line-level recognition of the Reuters SGML markup.
//
// The archive is scanned line by line; each trimmed line is classified into
// at most one structural tag event, checked in a fixed priority order. A
// `<TOPICS>` span is recognized separately because it does not consume the
// line: the structural rules still apply to the same line afterwards.

use std::sync::LazyLock;

use regex_lite::Regex;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<REUTERS TOPICS="(.+?)".+?>$"#).expect("valid open-tag regex")
});
static TOPICS_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<TOPICS>.*</TOPICS>").expect("valid topics regex"));
static TOPIC_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<D>(.+?)</D>").expect("valid topic item regex"));
static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<BODY>(.*)$").expect("valid body regex"));
static LEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<.+?>").expect("valid leading tag regex"));

const CLOSE_TAG: &str = "</REUTERS>";
const BODY_CLOSE: &str = "</BODY></TEXT>";
/// Sign-off line at the end of most article bodies.
const SIGN_OFF: &str = "reuter";

/// A structural event recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// `<REUTERS TOPICS="...">`; `has_topics` is false for `TOPICS="NO"`.
    Open { has_topics: bool },
    /// `</REUTERS>`
    Close,
    /// `<BODY>` with whatever text follows it on the same line.
    BodyOpen { inline: String },
    /// `</BODY></TEXT>`
    BodyClose,
    /// A plain content line.
    Text(String),
}

/// Classify a trimmed, non-empty line. Returns `None` for markup lines that
/// carry nothing for the scanner, and for the "Reuter" sign-off.
pub fn classify(line: &str) -> Option<TagEvent> {
    if let Some(caps) = OPEN_TAG.captures(line) {
        let has_topics = &caps[1] != "NO";
        return Some(TagEvent::Open { has_topics });
    }

    if line.contains(CLOSE_TAG) {
        return Some(TagEvent::Close);
    }

    if let Some(caps) = BODY_OPEN.captures(line) {
        return Some(TagEvent::BodyOpen {
            inline: caps[1].to_string(),
        });
    }

    if line.contains(BODY_CLOSE) {
        return Some(TagEvent::BodyClose);
    }

    if !LEADING_TAG.is_match(line) && !line.eq_ignore_ascii_case(SIGN_OFF) {
        return Some(TagEvent::Text(line.to_string()));
    }

    None
}

/// Topics listed in a `<TOPICS><D>..</D>..</TOPICS>` span, in order.
///
/// Returns `None` when the line has no topics span. Open-tag lines never
/// count as topics lines.
pub fn topics(line: &str) -> Option<Vec<String>> {
    if OPEN_TAG.is_match(line) || !TOPICS_SPAN.is_match(line) {
        return None;
    }
    Some(
        TOPIC_ITEM
            .captures_iter(line)
            .map(|caps| caps[1].to_string())
            .collect(),
    )
}
