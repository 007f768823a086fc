use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::error::{MagpieError, Result};

const CONFIG_PATHS: [&str; 3] = ["config/default.toml", "magpie.toml", ".magpie.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub shodan: ShodanConfig,
    pub fetch: FetchConfig,
}

impl Config {
    /// Load configuration, trying an explicit path first, then the
    /// well-known locations, then built-in defaults. A broken file at
    /// an explicit path is fatal; a broken file at a well-known
    /// location is only warned about.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            let contents = fs::read_to_string(path).map_err(|e| {
                MagpieError::Config(format!("cannot read config {}: {}", path.display(), e))
            })?;
            let config = toml::from_str(&contents).map_err(|e| {
                MagpieError::Config(format!("cannot parse config {}: {}", path.display(), e))
            })?;
            info!("loaded config from {}", path.display());
            return Ok(config);
        }

        for path in CONFIG_PATHS {
            if !Path::new(path).exists() {
                continue;
            }
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("loaded config from {}", path);
                        return Ok(config);
                    }
                    Err(e) => warn!("failed to parse config from {}: {}", path, e),
                },
                Err(e) => warn!("failed to read config from {}: {}", path, e),
            }
        }

        Ok(Config::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub rate_limit_delay_ms: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            request_timeout_secs: 30,
            rate_limit_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShodanConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub rate_limit_delay_ms: u64,
}

impl Default for ShodanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.shodan.io".to_string(),
            request_timeout_secs: 30,
            rate_limit_delay_ms: 1000,
        }
    }
}

/// Settings for the unauthenticated raw-content fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub request_timeout_secs: u64,
    pub rate_limit_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            rate_limit_delay_ms: 250,
        }
    }
}

/// GitHub token read once at startup and passed by reference into the
/// components that need it.
#[derive(Debug, Clone)]
pub struct Credentials {
    github_token: String,
}

impl Credentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            MagpieError::Config(format!("cannot read key file {}: {}", path.display(), e))
        })?;
        let token = contents.trim().to_string();
        if token.is_empty() {
            return Err(MagpieError::Config(format!(
                "key file {} is empty",
                path.display()
            )));
        }
        Ok(Self {
            github_token: token,
        })
    }

    pub fn github_token(&self) -> &str {
        &self.github_token
    }
}
