pub mod shodan;

pub use shodan::ShodanKeyDetector;
