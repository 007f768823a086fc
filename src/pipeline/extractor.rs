use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::core::results::{CandidateKey, RunStats, SearchHit, Stage, StageReport};
use crate::core::traits::{KeyDetector, SearchProvider};

/// Extract stage: single sequential consumer of the URL channel.
/// Fetch failures are per-item; the stage itself always completes.
pub async fn run(
    provider: Arc<dyn SearchProvider>,
    detector: Arc<dyn KeyDetector>,
    mut rx: UnboundedReceiver<SearchHit>,
    key_tx: UnboundedSender<CandidateKey>,
) -> StageReport {
    let mut stats = RunStats::default();
    // First-seen wins; lives for this run only.
    let mut seen: HashSet<String> = HashSet::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );

    while let Some(hit) = rx.recv().await {
        spinner.set_message(format!("fetching {}", hit.file_path));
        spinner.tick();

        let body = match provider.fetch_raw(&hit.raw_url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("fetch failed for {}: {}", hit.raw_url, e);
                stats.fetch_errors += 1;
                continue;
            }
        };
        stats.files_fetched += 1;

        for key in detector.detect(&body) {
            if seen.insert(key.clone()) {
                // Candidate keys are the tool's only stdout output.
                println!("{}", key);
                stats.keys_printed += 1;

                let candidate = CandidateKey {
                    key,
                    source_url: hit.raw_url.clone(),
                };
                if key_tx.send(candidate).is_err() {
                    debug!("verify stage hung up; keys still print");
                }
            } else {
                stats.duplicate_keys += 1;
            }
        }
    }

    spinner.finish_and_clear();
    StageReport::completed(Stage::Extractor, stats)
}
