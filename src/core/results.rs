use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// A file surfaced by the search stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub repository: String,
    pub file_path: String,
    /// Web-viewable URL as returned by the search API.
    pub html_url: String,
    /// Raw-content form of `html_url`, fetched by the extract stage.
    pub raw_url: String,
}

/// Query for the code-search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub per_page: usize,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            per_page: 100,
        }
    }
}

/// A key extracted next to a marker term. Format-matched only; nothing
/// about it has been checked against Shodan yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateKey {
    pub key: String,
    pub source_url: String,
}

impl CandidateKey {
    /// Shortened form for logs, so full keys only ever land on stdout.
    pub fn masked(&self) -> String {
        if self.key.len() > 14 {
            format!("{}...{}", &self.key[..10], &self.key[self.key.len() - 4..])
        } else {
            self.key.clone()
        }
    }
}

/// Outcome of checking a candidate key against the issuing service.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    /// Verification was not requested for this run.
    Unverified,
    Valid {
        metadata: HashMap<String, serde_json::Value>,
    },
    Invalid {
        reason: String,
    },
    /// The check itself failed; says nothing about the key.
    Error {
        reason: String,
    },
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unverified => write!(f, "unverified"),
            Self::Valid { metadata } => match metadata.get("plan") {
                Some(plan) => write!(f, "valid (plan: {})", plan),
                None => write!(f, "valid"),
            },
            Self::Invalid { reason } => write!(f, "invalid: {}", reason),
            Self::Error { reason } => write!(f, "verification error: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Searcher,
    Extractor,
    Verifier,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Searcher => write!(f, "searcher"),
            Self::Extractor => write!(f, "extractor"),
            Self::Verifier => write!(f, "verifier"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    Failed { reason: String },
}

/// Counters accumulated across the pipeline. Each stage fills its own
/// fields; the orchestrator merges them into one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub urls_emitted: usize,
    pub files_fetched: usize,
    pub fetch_errors: usize,
    pub keys_printed: usize,
    pub duplicate_keys: usize,
    pub keys_unverified: usize,
    pub keys_checked: usize,
    pub keys_valid: usize,
    pub keys_invalid: usize,
    pub verification_errors: usize,
}

impl RunStats {
    pub fn merge(&mut self, other: &RunStats) {
        self.urls_emitted += other.urls_emitted;
        self.files_fetched += other.files_fetched;
        self.fetch_errors += other.fetch_errors;
        self.keys_printed += other.keys_printed;
        self.duplicate_keys += other.duplicate_keys;
        self.keys_unverified += other.keys_unverified;
        self.keys_checked += other.keys_checked;
        self.keys_valid += other.keys_valid;
        self.keys_invalid += other.keys_invalid;
        self.verification_errors += other.verification_errors;
    }
}

/// Structured per-worker result collected by the orchestrator, so a
/// consumer can learn why a producer terminated early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub outcome: StageOutcome,
    pub stats: RunStats,
}

impl StageReport {
    pub fn completed(stage: Stage, stats: RunStats) -> Self {
        Self {
            stage,
            outcome: StageOutcome::Completed,
            stats,
        }
    }

    pub fn failed(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            outcome: StageOutcome::Failed {
                reason: reason.into(),
            },
            stats: RunStats::default(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == StageOutcome::Completed
    }
}

/// Everything one run produced, apart from the keys on stdout.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stats: RunStats,
    pub reports: Vec<StageReport>,
}

impl RunSummary {
    pub fn from_reports(started_at: DateTime<Utc>, reports: Vec<StageReport>) -> Self {
        let mut stats = RunStats::default();
        for report in &reports {
            stats.merge(&report.stats);
        }
        Self {
            started_at,
            finished_at: Utc::now(),
            stats,
            reports,
        }
    }

    pub fn all_completed(&self) -> bool {
        self.reports.iter().all(StageReport::is_completed)
    }
}
