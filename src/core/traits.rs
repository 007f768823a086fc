use async_trait::async_trait;
use std::time::Duration;

use super::error::Result;
use super::results::{SearchHit, SearchQuery, VerificationOutcome};

/// Trait for searching a code-hosting platform and fetching raw file
/// content from it.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one code-search query and return the matching files.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>>;

    /// Fetch the text of a raw-content URL. Unauthenticated.
    async fn fetch_raw(&self, url: &str) -> Result<String>;

    /// Name of the search provider (e.g., "github").
    fn name(&self) -> &str;
}

/// Trait for extracting candidate keys from fetched file content.
///
/// Extraction is line-oriented: a line qualifies only if it carries one
/// of the marker terms, and at most one key is taken per line.
pub trait KeyDetector: Send + Sync {
    /// Name of the key type this detector handles (e.g., "shodan").
    fn name(&self) -> &str;

    /// Term passed to the code-search API.
    fn search_term(&self) -> &str;

    /// Case variants that mark a line as worth pattern-matching.
    fn marker_terms(&self) -> &[&str];

    /// First pattern match on a marker-bearing line, if any.
    fn extract_from_line(&self, line: &str) -> Option<String>;

    /// Scan whole file content, one candidate at most per line.
    fn detect(&self, content: &str) -> Vec<String> {
        content
            .lines()
            .filter_map(|line| self.extract_from_line(line))
            .collect()
    }
}

/// Trait for confirming candidate keys against the service that issued
/// them.
#[async_trait]
pub trait KeyVerifier: Send + Sync {
    /// Check a key by making an API request. Transport-level failures
    /// come back as `Err`; an `Ok` outcome is a statement about the key.
    async fn verify(&self, key: &str) -> Result<VerificationOutcome>;

    /// The key type this verifier handles.
    fn key_type(&self) -> &str;

    /// Pause between verification requests.
    fn rate_limit(&self) -> Duration {
        Duration::from_secs(1)
    }
}
