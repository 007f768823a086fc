use std::io::Write;
use std::time::Duration;

use magpie::core::config::Config;
use magpie::core::traits::KeyVerifier;
use magpie::verifiers::ShodanVerifier;

#[test]
fn explicit_config_overrides_some_fields_and_defaults_the_rest() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[github]\nrate_limit_delay_ms = 500\n\n[shodan]\nrate_limit_delay_ms = 2500\n"
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.github.rate_limit_delay_ms, 500);
    assert_eq!(config.github.base_url, "https://api.github.com");
    assert_eq!(config.shodan.base_url, "https://api.shodan.io");
    assert_eq!(config.fetch.request_timeout_secs, 30);

    let verifier = ShodanVerifier::new(&config.shodan);
    assert_eq!(
        verifier.rate_limit(),
        Duration::from_millis(2500),
        "verifier should pace requests at the configured delay"
    );
}

#[test]
fn broken_explicit_config_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "this is not [ valid toml").unwrap();

    assert!(Config::load(Some(file.path())).is_err());
}

#[test]
fn missing_explicit_config_is_fatal() {
    assert!(Config::load(Some(std::path::Path::new("/nonexistent/magpie.toml"))).is_err());
}

#[test]
fn no_config_file_falls_back_to_defaults() {
    let config = Config::load(None).unwrap();
    assert_eq!(config.github.rate_limit_delay_ms, 2000);
    assert_eq!(config.shodan.rate_limit_delay_ms, 1000);
    assert_eq!(config.fetch.rate_limit_delay_ms, 250);
}
