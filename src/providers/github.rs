use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::{FetchConfig, GitHubConfig};
use crate::core::error::{MagpieError, Result};
use crate::core::results::{SearchHit, SearchQuery};
use crate::core::traits::SearchProvider;
use crate::utils::{HttpClient, HttpResponse, RateLimiter};

#[derive(Debug, Deserialize)]
struct CodeSearchResponse {
    total_count: u64,
    items: Vec<CodeSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CodeSearchItem {
    path: String,
    html_url: String,
    repository: RepositoryInfo,
}

#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    full_name: String,
}

/// Rewrite a web-view file URL to its raw-content form. Only the first
/// view segment is replaced; later occurrences stay untouched.
pub fn to_raw_content_url(html_url: &str) -> String {
    html_url.replacen("/blob/", "/raw/", 1)
}

pub struct GitHubProvider {
    token: String,
    base_url: String,
    search_timeout: Duration,
    fetch_timeout: Duration,
    search_limiter: RateLimiter,
    fetch_limiter: RateLimiter,
}

impl GitHubProvider {
    pub fn new(token: String, github: &GitHubConfig, fetch: &FetchConfig) -> Self {
        Self {
            token,
            base_url: github.base_url.clone(),
            search_timeout: Duration::from_secs(github.request_timeout_secs),
            fetch_timeout: Duration::from_secs(fetch.request_timeout_secs),
            search_limiter: RateLimiter::with_delay(Duration::from_millis(
                github.rate_limit_delay_ms,
            )),
            fetch_limiter: RateLimiter::with_delay(Duration::from_millis(
                fetch.rate_limit_delay_ms,
            )),
        }
    }

    /// curl is synchronous, so requests run on the blocking pool.
    async fn blocking_get(
        &self,
        url: String,
        headers: Vec<(String, String)>,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        tokio::task::spawn_blocking(move || {
            let client = HttpClient::with_timeout(timeout);
            let header_refs: Vec<(&str, &str)> = headers
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            client.get(&url, &header_refs)
        })
        .await
        .map_err(|e| MagpieError::Task(format!("join error: {}", e)))?
    }
}

#[async_trait]
impl SearchProvider for GitHubProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        info!("searching GitHub code for: {}", query.term);

        let url = format!(
            "{}/search/code?q={}&sort=forks&order=desc&per_page={}&page=1",
            self.base_url,
            urlencoding::encode(&query.term),
            query.per_page
        );

        let headers = vec![
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
            ("User-Agent".to_string(), "curl/7.68.0".to_string()),
            ("Authorization".to_string(), format!("token {}", self.token)),
        ];

        self.search_limiter.wait().await;
        let response = self.blocking_get(url, headers, self.search_timeout).await?;

        if response.is_rate_limited() {
            return Err(MagpieError::RateLimit(
                "GitHub code-search rate limit exceeded".to_string(),
            ));
        }
        if !response.is_success() {
            return Err(MagpieError::SearchProvider(format!(
                "GitHub API returned {}: {}",
                response.status_code,
                response.text().unwrap_or_default()
            )));
        }

        let parsed: CodeSearchResponse = response.json()?;
        info!("GitHub reports {} total matches", parsed.total_count);

        let hits = parsed
            .items
            .into_iter()
            .map(|item| SearchHit {
                repository: item.repository.full_name,
                file_path: item.path,
                raw_url: to_raw_content_url(&item.html_url),
                html_url: item.html_url,
            })
            .collect();

        Ok(hits)
    }

    async fn fetch_raw(&self, url: &str) -> Result<String> {
        debug!("fetching {}", url);

        // Raw-content fetches go out unauthenticated.
        let headers = vec![("User-Agent".to_string(), "curl/7.68.0".to_string())];

        self.fetch_limiter.wait().await;
        let response = self
            .blocking_get(url.to_string(), headers, self.fetch_timeout)
            .await?;

        if response.is_not_found() {
            return Err(MagpieError::NotFound(format!(
                "file no longer exists: {}",
                url
            )));
        }
        if !response.is_success() {
            return Err(MagpieError::Http(format!(
                "GET {} returned HTTP {}",
                url, response.status_code
            )));
        }

        response.text()
    }

    fn name(&self) -> &str {
        "github"
    }
}

// URL encoding utility (simple implementation)
mod urlencoding {
    pub fn encode(s: &str) -> String {
        s.chars()
            .map(|c| match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => c.to_string(),
                ' ' => "+".to_string(),
                _ => format!("%{:02X}", c as u8),
            })
            .collect()
    }
}
