//! The search -> extract -> verify pipeline.
//!
//! Three workers over two unbounded channels, one pass, no restart.
//! Each worker reports how it ended instead of signalling a bare
//! barrier, so the orchestrator can tell a clean drain from a
//! producer that died early.

pub mod extractor;
pub mod searcher;
pub mod verifier;

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::core::results::{RunSummary, SearchQuery, Stage, StageReport};
use crate::core::traits::{KeyDetector, KeyVerifier, SearchProvider};

/// Run one full pass of the pipeline and collect every stage's report.
pub async fn run(
    provider: Arc<dyn SearchProvider>,
    detector: Arc<dyn KeyDetector>,
    verifier: Option<Arc<dyn KeyVerifier>>,
    query: SearchQuery,
) -> RunSummary {
    let started_at = Utc::now();

    let (url_tx, url_rx) = mpsc::unbounded_channel();
    let (key_tx, key_rx) = mpsc::unbounded_channel();

    let search_task = tokio::spawn(searcher::run(Arc::clone(&provider), query, url_tx));
    let extract_task = tokio::spawn(extractor::run(provider, detector, url_rx, key_tx));
    let verify_task = tokio::spawn(verifier::run(verifier, key_rx));

    let (search_report, extract_report, verify_report) =
        tokio::join!(search_task, extract_task, verify_task);

    let reports = vec![
        reported(Stage::Searcher, search_report),
        reported(Stage::Extractor, extract_report),
        reported(Stage::Verifier, verify_report),
    ];

    RunSummary::from_reports(started_at, reports)
}

fn reported(stage: Stage, joined: Result<StageReport, JoinError>) -> StageReport {
    joined.unwrap_or_else(|e| StageReport::failed(stage, format!("worker aborted: {}", e)))
}
