use lazy_static::lazy_static;
use regex::Regex;

use crate::core::traits::KeyDetector;

lazy_static! {
    /// Shodan API keys are 32 alphanumeric characters.
    static ref KEY_PATTERN: Regex = Regex::new(r"[A-Za-z0-9]{32}").unwrap();
}

/// The search term plus the lowercase form files actually use.
const MARKER_TERMS: [&str; 2] = ["SHODAN_API_KEY", "shodan_api_key"];

pub struct ShodanKeyDetector {
    pattern: Regex,
}

impl ShodanKeyDetector {
    pub fn new() -> Self {
        Self {
            pattern: KEY_PATTERN.clone(),
        }
    }
}

impl Default for ShodanKeyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDetector for ShodanKeyDetector {
    fn name(&self) -> &str {
        "shodan"
    }

    fn search_term(&self) -> &str {
        "SHODAN_API_KEY"
    }

    fn marker_terms(&self) -> &[&str] {
        &MARKER_TERMS
    }

    fn extract_from_line(&self, line: &str) -> Option<String> {
        if !MARKER_TERMS.iter().any(|term| line.contains(term)) {
            return None;
        }
        self.pattern.find(line).map(|m| m.as_str().to_string())
    }
}
