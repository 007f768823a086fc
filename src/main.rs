use clap::Parser;
use std::sync::Arc;

use magpie::cli::{Cli, OutputFormatter};
use magpie::core::{Config, Credentials, SearchQuery};
use magpie::core::traits::{KeyDetector, KeyVerifier, SearchProvider};
use magpie::detectors::ShodanKeyDetector;
use magpie::pipeline;
use magpie::providers::GitHubProvider;
use magpie::verifiers::ShodanVerifier;

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    OutputFormatter::print_banner();
    OutputFormatter::print_ethical_warning();

    if let Err(e) = run(cli).await {
        OutputFormatter::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> magpie::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let credentials = Credentials::from_file(&cli.key_file)?;

    let provider: Arc<dyn SearchProvider> = Arc::new(GitHubProvider::new(
        credentials.github_token().to_string(),
        &config.github,
        &config.fetch,
    ));
    let detector: Arc<dyn KeyDetector> = Arc::new(ShodanKeyDetector::new());
    let verifier: Option<Arc<dyn KeyVerifier>> = if cli.validate {
        Some(Arc::new(ShodanVerifier::new(&config.shodan)))
    } else {
        None
    };

    let term = cli
        .query
        .unwrap_or_else(|| detector.search_term().to_string());

    let summary = pipeline::run(provider, detector, verifier, SearchQuery::new(term)).await;

    if !summary.all_completed() {
        tracing::warn!("one or more pipeline stages failed; see summary");
    }
    OutputFormatter::print_summary(&summary);

    Ok(())
}
