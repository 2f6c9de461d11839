// Topic buckets — accepted document bodies grouped by resolved category.

use std::collections::BTreeMap;

/// Append-only map from category to accepted bodies, in acceptance order.
///
/// Topics iterate in sorted order so output and summaries are stable
/// across runs.
#[derive(Debug, Clone, Default)]
pub struct TopicBuckets {
    buckets: BTreeMap<String, Vec<String>>,
}

impl TopicBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, topic: &str, body: String) {
        self.buckets.entry(topic.to_string()).or_default().push(body);
    }

    pub fn get(&self, topic: &str) -> Option<&[String]> {
        self.buckets.get(topic).map(Vec::as_slice)
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets
            .iter()
            .map(|(topic, docs)| (topic.as_str(), docs.as_slice()))
    }

    /// Number of documents in the given bucket (0 if absent).
    pub fn count(&self, topic: &str) -> usize {
        self.buckets.get(topic).map_or(0, Vec::len)
    }

    /// Total accepted documents across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
