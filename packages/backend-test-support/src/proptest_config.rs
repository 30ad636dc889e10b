//! Proptest settings for integration suites.

use proptest::prelude::ProptestConfig;

/// `PROPTEST_CASES` cases (default 8), no failure persistence files.
pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    ProptestConfig {
        cases,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}
