//! # Magpie
//!
//! Hunts leaked Shodan API keys in public GitHub code.
//!
//! One run is a single pass through a three-stage pipeline connected
//! by unbounded channels:
//!
//! - **search**: one authenticated code-search query for the marker
//!   term, web-view URLs rewritten to raw-content form
//! - **extract**: sequential fetch of each raw URL, line-by-line
//!   marker scan, 32-character alphanumeric extraction, process-local
//!   dedup, first occurrences printed to stdout
//! - **verify**: candidates checked against the Shodan API when
//!   `--validate` is set, tagged `Unverified` otherwise
//!
//! Stages hand back structured reports instead of signalling a bare
//! barrier, so a run can say which worker ended how.
//!
//! Stdout carries exactly one key per line; logs, progress, and the
//! run summary go to stderr.
//!
//! ## Example
//!
//! ```rust
//! use magpie::{KeyDetector, ShodanKeyDetector};
//!
//! let detector = ShodanKeyDetector::new();
//! let keys = detector.detect(r#"SHODAN_API_KEY = "oykKBEq2KRySU33OxizNkOir5PgHpMLv""#);
//! assert_eq!(keys, vec!["oykKBEq2KRySU33OxizNkOir5PgHpMLv".to_string()]);
//! ```

pub mod cli;
pub mod core;
pub mod detectors;
pub mod pipeline;
pub mod providers;
pub mod utils;
pub mod verifiers;

// Re-export commonly used types
pub use crate::core::{
    CandidateKey, Config, Credentials, KeyDetector, KeyVerifier, MagpieError, Result, RunStats,
    RunSummary, SearchHit, SearchProvider, SearchQuery, Stage, StageOutcome, StageReport,
    VerificationOutcome,
};
pub use crate::detectors::ShodanKeyDetector;
pub use crate::providers::GitHubProvider;
pub use crate::verifiers::ShodanVerifier;
