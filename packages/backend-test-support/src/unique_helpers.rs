//! Unique test identities, so parallel tests never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// assert_ne!(a, unique_str("player"));
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A short unique username, `{prefix}_` plus six random characters.
pub fn unique_username(prefix: &str) -> String {
    let id = Ulid::new().to_string();
    format!("{prefix}_{}", &id[id.len() - 6..].to_lowercase())
}
