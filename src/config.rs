use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::corpus::categories::CategorySet;

pub const DEFAULT_REUTERS_DIR: &str = "./data/text_clustering/reuters21578";
pub const DEFAULT_OUTPUT_DIR: &str = "./data/text_clustering/tem501";
pub const DEFAULT_MAX_DOCS_PER_TOPIC: usize = 100;

/// Extraction settings loaded from environment variables.
///
/// Every value has a default matching the course's data layout. A .env
/// file is loaded automatically at startup via dotenvy; command-line flags
/// override whatever is loaded here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the `reut2-*.sgm` archive files
    pub reuters_dir: PathBuf,
    /// Root of the per-topic output directories
    pub output_dir: PathBuf,
    /// Documents written per topic at most
    pub max_docs_per_topic: usize,
    /// Topics documents are bucketed under
    pub categories: CategorySet,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Separated from `load` so tests don't have to mutate the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_docs_per_topic = match lookup("TCDATA_MAX_DOCS_PER_TOPIC") {
            Some(raw) => parse_max_docs(&raw)?,
            None => DEFAULT_MAX_DOCS_PER_TOPIC,
        };

        let categories = match lookup("TCDATA_CATEGORIES") {
            Some(list) => {
                let categories = CategorySet::parse_list(&list);
                if categories.is_empty() {
                    anyhow::bail!("TCDATA_CATEGORIES is set but names no categories");
                }
                categories
            }
            None => CategorySet::default(),
        };

        Ok(Self {
            reuters_dir: lookup("TCDATA_REUTERS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REUTERS_DIR)),
            output_dir: lookup("TCDATA_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            max_docs_per_topic,
            categories,
        })
    }
}

fn parse_max_docs(raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("TCDATA_MAX_DOCS_PER_TOPIC must be a number, got {raw:?}"))?;
    if value == 0 {
        anyhow::bail!("TCDATA_MAX_DOCS_PER_TOPIC must be at least 1");
    }
    Ok(value)
}
