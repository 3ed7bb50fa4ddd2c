//! Read-only snapshot of the process environment.
//!
//! Everything in this crate that consults environment variables takes an
//! [`EnvVars`] snapshot instead of reading `std::env` directly, so tests can
//! inject configuration without mutating process-wide state.

/// Environment variable naming the secret-store identifier. When unset,
/// tenant tokens come from defaults and environment variables only.
pub const SECRET_STORE_VAR: &str = "AWS_SECRET";

/// Environment variable selecting the run mode. The value `test` suppresses
/// secret-store consultation entirely.
pub const RUN_MODE_VAR: &str = "APP_ENV";

const TEST_MODE_VALUE: &str = "test";

/// Immutable key/value snapshot of environment variables.
///
/// Preserves capture order so that scans over the variable set are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: Vec<(String, String)>,
}

impl EnvVars {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable by exact name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over all captured pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The configured secret-store identifier, if any non-empty value is set.
    pub fn secret_store_id(&self) -> Option<&str> {
        self.get(SECRET_STORE_VAR).filter(|v| !v.is_empty())
    }

    /// Whether the process runs in test mode (secret store is skipped).
    pub fn test_mode(&self) -> bool {
        self.get(RUN_MODE_VAR) == Some(TEST_MODE_VALUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_process_captures_path() {
        let env = EnvVars::from_process();
        assert!(env.get("PATH").is_some());
    }

    #[test]
    fn test_get_exact_match_only() {
        let env = EnvVars::from_pairs([("TENANT_TOKEN_ACME", "xyz")]);
        assert_eq!(env.get("TENANT_TOKEN_ACME"), Some("xyz"));
        assert_eq!(env.get("tenant_token_acme"), None);
    }

    #[test]
    fn test_secret_store_id_requires_non_empty_value() {
        let unset = EnvVars::default();
        assert_eq!(unset.secret_store_id(), None);

        let empty = EnvVars::from_pairs([(SECRET_STORE_VAR, "")]);
        assert_eq!(empty.secret_store_id(), None);

        let set = EnvVars::from_pairs([(SECRET_STORE_VAR, "exchange/tenants")]);
        assert_eq!(set.secret_store_id(), Some("exchange/tenants"));
    }

    #[test]
    fn test_test_mode_matches_exact_value() {
        assert!(EnvVars::from_pairs([(RUN_MODE_VAR, "test")]).test_mode());
        assert!(!EnvVars::from_pairs([(RUN_MODE_VAR, "production")]).test_mode());
        assert!(!EnvVars::default().test_mode());
    }
}
