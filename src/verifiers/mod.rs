pub mod shodan;

pub use shodan::ShodanVerifier;
