use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;
use std::time::Duration;

use magpie::core::error::{MagpieError, Result};
use magpie::core::results::{
    SearchHit, SearchQuery, Stage, StageOutcome, VerificationOutcome,
};
use magpie::core::traits::{KeyVerifier, SearchProvider};
use magpie::detectors::ShodanKeyDetector;
use magpie::pipeline;
use magpie::providers::github::to_raw_content_url;

mock! {
    Provider {}

    #[async_trait]
    impl SearchProvider for Provider {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>>;
        async fn fetch_raw(&self, url: &str) -> Result<String>;
        fn name(&self) -> &str;
    }
}

fn hit(html_url: &str) -> SearchHit {
    SearchHit {
        repository: "org/repo".to_string(),
        file_path: html_url.rsplit('/').next().unwrap_or_default().to_string(),
        html_url: html_url.to_string(),
        raw_url: to_raw_content_url(html_url),
    }
}

async fn run_without_verifier(provider: MockProvider) -> magpie::RunSummary {
    pipeline::run(
        Arc::new(provider),
        Arc::new(ShodanKeyDetector::new()),
        None,
        SearchQuery::new("SHODAN_API_KEY"),
    )
    .await
}

#[tokio::test]
async fn one_hit_yields_one_key() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("github".to_string());
    provider.expect_search().times(1).returning(|_| {
        Ok(vec![hit("https://example.com/org/repo/blob/main/config.py")])
    });
    provider
        .expect_fetch_raw()
        .with(eq("https://example.com/org/repo/raw/main/config.py"))
        .times(1)
        .returning(|_| {
            Ok("SHODAN_API_KEY = \"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA\"\n".to_string())
        });

    let summary = run_without_verifier(provider).await;

    assert!(summary.all_completed());
    assert_eq!(summary.stats.urls_emitted, 1);
    assert_eq!(summary.stats.files_fetched, 1);
    assert_eq!(summary.stats.keys_printed, 1);
    assert_eq!(summary.stats.duplicate_keys, 0);
    assert_eq!(summary.stats.keys_unverified, 1);
}

#[tokio::test]
async fn identical_key_across_files_prints_once() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("github".to_string());
    provider.expect_search().times(1).returning(|_| {
        Ok(vec![
            hit("https://example.com/org/repo/blob/main/a.py"),
            hit("https://example.com/org/other/blob/main/b.py"),
        ])
    });
    provider.expect_fetch_raw().times(2).returning(|_| {
        Ok("shodan_api_key = 'AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA'\n".to_string())
    });

    let summary = run_without_verifier(provider).await;

    assert_eq!(summary.stats.files_fetched, 2);
    assert_eq!(summary.stats.keys_printed, 1);
    assert_eq!(summary.stats.duplicate_keys, 1);
}

#[tokio::test]
async fn short_value_produces_no_output() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("github".to_string());
    provider.expect_search().times(1).returning(|_| {
        Ok(vec![hit("https://example.com/org/repo/blob/main/settings.env")])
    });
    provider
        .expect_fetch_raw()
        .times(1)
        .returning(|_| Ok("SHODAN_API_KEY = abcdefgh12345678abcd\n".to_string()));

    let summary = run_without_verifier(provider).await;

    assert!(summary.all_completed());
    assert_eq!(summary.stats.files_fetched, 1);
    assert_eq!(summary.stats.keys_printed, 0);
    assert_eq!(summary.stats.keys_unverified, 0);
}

#[tokio::test]
async fn search_failure_still_drains_cleanly() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("github".to_string());
    provider.expect_search().times(1).returning(|_| {
        Err(MagpieError::SearchProvider(
            "GitHub API returned 500".to_string(),
        ))
    });
    provider.expect_fetch_raw().times(0);

    let summary = run_without_verifier(provider).await;

    assert!(!summary.all_completed());

    let searcher = summary
        .reports
        .iter()
        .find(|r| r.stage == Stage::Searcher)
        .unwrap();
    assert!(matches!(searcher.outcome, StageOutcome::Failed { .. }));

    let extractor = summary
        .reports
        .iter()
        .find(|r| r.stage == Stage::Extractor)
        .unwrap();
    assert_eq!(extractor.outcome, StageOutcome::Completed);
    assert_eq!(summary.stats.files_fetched, 0);
    assert_eq!(summary.stats.keys_printed, 0);
}

#[tokio::test]
async fn fetch_error_skips_file_and_continues() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("github".to_string());
    provider.expect_search().times(1).returning(|_| {
        Ok(vec![
            hit("https://example.com/org/gone/blob/main/deleted.py"),
            hit("https://example.com/org/live/blob/main/config.py"),
        ])
    });
    provider
        .expect_fetch_raw()
        .with(eq("https://example.com/org/gone/raw/main/deleted.py"))
        .times(1)
        .returning(|url| Err(MagpieError::NotFound(url.to_string())));
    provider
        .expect_fetch_raw()
        .with(eq("https://example.com/org/live/raw/main/config.py"))
        .times(1)
        .returning(|_| {
            Ok("SHODAN_API_KEY=BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB\n".to_string())
        });

    let summary = run_without_verifier(provider).await;

    assert!(summary.all_completed());
    assert_eq!(summary.stats.fetch_errors, 1);
    assert_eq!(summary.stats.files_fetched, 1);
    assert_eq!(summary.stats.keys_printed, 1);
}

struct StubVerifier;

#[async_trait]
impl KeyVerifier for StubVerifier {
    async fn verify(&self, key: &str) -> Result<VerificationOutcome> {
        if key.starts_with('A') {
            Ok(VerificationOutcome::Valid {
                metadata: Default::default(),
            })
        } else if key.starts_with('B') {
            Ok(VerificationOutcome::Invalid {
                reason: "unauthorized".to_string(),
            })
        } else {
            Err(MagpieError::Verification("server error".to_string()))
        }
    }

    fn key_type(&self) -> &str {
        "shodan"
    }

    fn rate_limit(&self) -> Duration {
        Duration::ZERO
    }
}

#[tokio::test]
async fn verifier_tags_each_unique_candidate() {
    let mut provider = MockProvider::new();
    provider.expect_name().return_const("github".to_string());
    provider.expect_search().times(1).returning(|_| {
        Ok(vec![hit("https://example.com/org/repo/blob/main/keys.env")])
    });
    provider.expect_fetch_raw().times(1).returning(|_| {
        Ok("\
SHODAN_API_KEY=AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA
SHODAN_API_KEY=BBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB
SHODAN_API_KEY=CCCCCCCCCCCCCCCCCCCCCCCCCCCCCCCC
"
        .to_string())
    });

    let summary = pipeline::run(
        Arc::new(provider),
        Arc::new(ShodanKeyDetector::new()),
        Some(Arc::new(StubVerifier)),
        SearchQuery::new("SHODAN_API_KEY"),
    )
    .await;

    assert!(summary.all_completed());
    assert_eq!(summary.stats.keys_printed, 3);
    assert_eq!(summary.stats.keys_checked, 3);
    assert_eq!(summary.stats.keys_valid, 1);
    assert_eq!(summary.stats.keys_invalid, 1);
    assert_eq!(summary.stats.verification_errors, 1);
    assert_eq!(summary.stats.keys_unverified, 0);
}
