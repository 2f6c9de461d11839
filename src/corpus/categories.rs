// Category resolution — which bucket (if any) a document belongs to.

use std::collections::BTreeSet;

/// The ten Reuters topics the exercise clusters on.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "acq", "coffee", "crude", "earn", "grain", "interest", "money-fx", "ship", "trade", "sugar",
];

/// A closed set of recognized category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: BTreeSet<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}

impl CategorySet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated list, ignoring blanks around names.
    pub fn parse_list(list: &str) -> Self {
        Self::new(
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Pick the single category a document is filed under.
///
/// Matches keep the document's topic order. No match, or exactly two
/// matches, leaves the document unresolved; otherwise the first match wins
/// (so three or more matches still resolve).
pub fn resolve_topic<'a>(topics: &'a [String], categories: &CategorySet) -> Option<&'a str> {
    let matches: Vec<&str> = topics
        .iter()
        .map(String::as_str)
        .filter(|topic| categories.contains(topic))
        .collect();

    if matches.is_empty() || matches.len() == 2 {
        return None;
    }
    Some(matches[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_match() {
        let cats = CategorySet::default();
        assert_eq!(resolve_topic(&topics(&["cocoa", "earn"]), &cats), Some("earn"));
    }

    #[test]
    fn test_no_match() {
        let cats = CategorySet::default();
        assert_eq!(resolve_topic(&topics(&["cocoa", "gold"]), &cats), None);
        assert_eq!(resolve_topic(&[], &cats), None);
    }

    #[test]
    fn test_parse_list() {
        let cats = CategorySet::parse_list(" earn, acq ,,ship");
        assert_eq!(cats.len(), 3);
        assert!(cats.contains("acq"));
        assert!(!cats.contains(""));
    }
}
