/// Number of leading characters kept when a key is logged.
const VISIBLE_PREFIX: usize = 8;

/// Truncate a secret for log output.
pub fn redact(key: &str) -> String {
    if key.chars().count() <= VISIBLE_PREFIX {
        return "***".to_string();
    }
    let prefix: String = key.chars().take(VISIBLE_PREFIX).collect();
    format!("{prefix}...")
}
