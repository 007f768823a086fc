use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use crate::core::results::{RunStats, SearchHit, SearchQuery, Stage, StageReport};
use crate::core::traits::SearchProvider;

/// Search stage: one query, results pushed onto the URL channel in
/// API order. The channel closes when the sender drops, whether the
/// query succeeded or not.
pub async fn run(
    provider: Arc<dyn SearchProvider>,
    query: SearchQuery,
    tx: UnboundedSender<SearchHit>,
) -> StageReport {
    info!("searching {} for \"{}\"", provider.name(), query.term);

    let mut stats = RunStats::default();

    match provider.search(&query).await {
        Ok(hits) => {
            for hit in hits {
                if tx.send(hit).is_err() {
                    debug!("extract stage hung up; dropping remaining results");
                    break;
                }
                stats.urls_emitted += 1;
            }
            info!("search stage done, {} urls emitted", stats.urls_emitted);
            StageReport::completed(Stage::Searcher, stats)
        }
        Err(e) => {
            error!("search failed: {}", e);
            StageReport::failed(Stage::Searcher, e.to_string())
        }
    }
}
