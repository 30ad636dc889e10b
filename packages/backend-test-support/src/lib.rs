//! Backend test support utilities
//!
//! Shared by the backend's integration suites: one-time logging setup,
//! proptest configuration and unique player identities.

pub mod logging;
pub mod proptest_config;
pub mod unique_helpers;
