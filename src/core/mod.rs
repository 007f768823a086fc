pub mod config;
pub mod error;
pub mod results;
pub mod traits;

pub use config::{Config, Credentials, FetchConfig, GitHubConfig, ShodanConfig};
pub use error::{MagpieError, Result};
pub use results::{
    CandidateKey, RunStats, RunSummary, SearchHit, SearchQuery, Stage, StageOutcome, StageReport,
    VerificationOutcome,
};
pub use traits::{KeyDetector, KeyVerifier, SearchProvider};
