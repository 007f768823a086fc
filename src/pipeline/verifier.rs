use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::core::results::{CandidateKey, RunStats, Stage, StageReport, VerificationOutcome};
use crate::core::traits::KeyVerifier;

/// Verify stage: drains the key channel whether or not verification is
/// enabled. Transport errors fold into the outcome; they are not a
/// stage failure.
pub async fn run(
    verifier: Option<Arc<dyn KeyVerifier>>,
    mut rx: UnboundedReceiver<CandidateKey>,
) -> StageReport {
    let mut stats = RunStats::default();

    while let Some(candidate) = rx.recv().await {
        let verifier = match verifier.as_ref() {
            Some(v) => v,
            None => {
                debug!("{}: {}", candidate.masked(), VerificationOutcome::Unverified);
                stats.keys_unverified += 1;
                continue;
            }
        };

        sleep(verifier.rate_limit()).await;
        stats.keys_checked += 1;

        let outcome = match verifier.verify(&candidate.key).await {
            Ok(outcome) => outcome,
            Err(e) => VerificationOutcome::Error {
                reason: e.to_string(),
            },
        };

        match &outcome {
            VerificationOutcome::Valid { .. } => {
                stats.keys_valid += 1;
                info!("{}: {}", candidate.masked(), outcome);
            }
            VerificationOutcome::Invalid { .. } => {
                stats.keys_invalid += 1;
                info!("{}: {}", candidate.masked(), outcome);
            }
            VerificationOutcome::Error { .. } => {
                stats.verification_errors += 1;
                warn!("{}: {}", candidate.masked(), outcome);
            }
            VerificationOutcome::Unverified => {
                stats.keys_unverified += 1;
            }
        }
    }

    StageReport::completed(Stage::Verifier, stats)
}
