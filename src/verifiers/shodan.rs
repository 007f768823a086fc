use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::core::config::ShodanConfig;
use crate::core::error::{MagpieError, Result};
use crate::core::results::VerificationOutcome;
use crate::core::traits::KeyVerifier;
use crate::utils::HttpClient;

#[derive(Debug, Deserialize)]
struct ShodanApiInfo {
    plan: Option<String>,
    query_credits: Option<i64>,
    scan_credits: Option<i64>,
    https: Option<bool>,
}

pub struct ShodanVerifier {
    base_url: String,
    timeout: Duration,
    rate_limit_ms: u64,
}

impl ShodanVerifier {
    pub fn new(config: &ShodanConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            rate_limit_ms: config.rate_limit_delay_ms,
        }
    }
}

impl Default for ShodanVerifier {
    fn default() -> Self {
        Self::new(&ShodanConfig::default())
    }
}

#[async_trait]
impl KeyVerifier for ShodanVerifier {
    async fn verify(&self, key: &str) -> Result<VerificationOutcome> {
        let url = format!("{}/api-info?key={}", self.base_url, key);
        let timeout = self.timeout;

        // curl is synchronous, so the request runs on the blocking pool.
        let response = tokio::task::spawn_blocking(move || {
            let client = HttpClient::with_timeout(timeout);
            client.get(&url, &[("Accept", "application/json")])
        })
        .await
        .map_err(|e| MagpieError::Task(format!("join error: {}", e)))??;

        if response.status_code == 200 {
            match response.json::<ShodanApiInfo>() {
                Ok(info) => {
                    let mut metadata = HashMap::new();

                    if let Some(plan) = &info.plan {
                        metadata.insert(
                            "plan".to_string(),
                            serde_json::Value::String(plan.clone()),
                        );
                    }
                    if let Some(credits) = info.query_credits {
                        metadata.insert(
                            "query_credits".to_string(),
                            serde_json::Value::Number(credits.into()),
                        );
                    }
                    if let Some(credits) = info.scan_credits {
                        metadata.insert(
                            "scan_credits".to_string(),
                            serde_json::Value::Number(credits.into()),
                        );
                    }
                    if let Some(https) = info.https {
                        metadata.insert("https".to_string(), serde_json::Value::Bool(https));
                    }

                    Ok(VerificationOutcome::Valid { metadata })
                }
                // Unparseable 200 bodies show up when Shodan serves an
                // HTML throttle page; that is not a verdict on the key.
                Err(_) => Err(MagpieError::Verification(
                    "unparseable api-info response (possible rate limit)".to_string(),
                )),
            }
        } else if response.status_code == 401 {
            // Only 401 condemns the key itself.
            Ok(VerificationOutcome::Invalid {
                reason: "unauthorized; key is invalid or revoked".to_string(),
            })
        } else if response.status_code == 429 {
            Err(MagpieError::RateLimit(
                "Shodan API rate limit exceeded".to_string(),
            ))
        } else if response.status_code >= 500 {
            Err(MagpieError::Verification(format!(
                "Shodan API server error: HTTP {}",
                response.status_code
            )))
        } else {
            Err(MagpieError::Verification(format!(
                "Shodan API returned HTTP {}",
                response.status_code
            )))
        }
    }

    fn key_type(&self) -> &str {
        "shodan"
    }

    fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }
}
