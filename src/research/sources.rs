//! Citation sources collected from grounded answers
//!
//! Grounding metadata arrives with an optional, loosely-typed shape, so
//! entries are validated here before they reach the source list. The list
//! itself prepends each new batch, keeps the first occurrence of every
//! uri, and truncates to a fixed maximum.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::providers::GroundingMetadata;

/// Title used when a citation carries none
pub const DEFAULT_SOURCE_TITLE: &str = "Source";

/// A validated citation source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    /// Document title
    pub title: String,
    /// Absolute http(s) URI; unique key in a `SourceList`
    pub uri: String,
    /// 1-based position inside the batch it arrived in
    pub index: usize,
}

impl GroundingSource {
    /// Host part of the uri, for display
    ///
    /// # Examples
    ///
    /// ```
    /// use cairuilin::research::GroundingSource;
    ///
    /// let source = GroundingSource {
    ///     title: "KITA".to_string(),
    ///     uri: "https://www.kita.net/news/1".to_string(),
    ///     index: 1,
    /// };
    /// assert_eq!(source.hostname().as_deref(), Some("www.kita.net"));
    /// ```
    pub fn hostname(&self) -> Option<String> {
        Url::parse(&self.uri)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

fn is_valid_uri(uri: &str) -> bool {
    match Url::parse(uri) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// Extract validated sources from grounding metadata
///
/// Chunks without a web reference are skipped; web references without a
/// usable http(s) uri are rejected. Missing or blank titles become
/// `"Source"`.
pub fn sources_from_grounding(metadata: &GroundingMetadata) -> Vec<GroundingSource> {
    let mut sources = Vec::new();

    for web in metadata.grounding_chunks.iter().filter_map(|c| c.web.as_ref()) {
        let Some(uri) = web.uri.as_deref().map(str::trim).filter(|u| is_valid_uri(u)) else {
            tracing::warn!("Rejecting grounding source with invalid uri: {:?}", web.uri);
            continue;
        };

        let title = web
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_SOURCE_TITLE);

        sources.push(GroundingSource {
            title: title.to_string(),
            uri: uri.to_string(),
            index: sources.len() + 1,
        });
    }

    sources
}

/// Deduplicated, capped, most-recent-batch-first list of sources
#[derive(Debug, Clone)]
pub struct SourceList {
    entries: Vec<GroundingSource>,
    max: usize,
}

impl SourceList {
    /// Create an empty list holding at most `max` entries
    pub fn new(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            max,
        }
    }

    /// Prepend a batch, deduplicate by uri (first occurrence wins), and cap
    ///
    /// # Examples
    ///
    /// ```
    /// use cairuilin::research::{GroundingSource, SourceList};
    ///
    /// let source = |uri: &str| GroundingSource {
    ///     title: uri.to_string(),
    ///     uri: uri.to_string(),
    ///     index: 1,
    /// };
    /// let mut list = SourceList::new(15);
    /// list.merge_batch(vec![source("https://a.example")]);
    /// list.merge_batch(vec![source("https://b.example"), source("https://a.example")]);
    /// let uris: Vec<&str> = list.iter().map(|s| s.uri.as_str()).collect();
    /// assert_eq!(uris, vec!["https://b.example", "https://a.example"]);
    /// ```
    pub fn merge_batch(&mut self, batch: Vec<GroundingSource>) {
        let mut seen = HashSet::new();
        let previous = std::mem::take(&mut self.entries);

        self.entries = batch
            .into_iter()
            .chain(previous)
            .filter(|s| seen.insert(s.uri.clone()))
            .take(self.max)
            .collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroundingSource> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[GroundingSource] {
        &self.entries
    }
}
