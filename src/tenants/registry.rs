//! Tenant token registry and merge policy.
//!
//! Holds tenant → access-token mappings with deterministic override order:
//! later insertions for the same key win. Keys come in two forms and both
//! forms are kept as inserted — a lower-cased bare name for
//! environment-derived entries, and the store's full secret name (no
//! normalization) for secret-store-derived entries.

use std::collections::HashMap;

use crate::env::EnvVars;
use crate::secrets::SecretEntry;

/// Tenant seeded as the default before any override source runs.
pub const DEFAULT_TENANT: &str = "test";
/// Reserved unprotected tenant, always present.
pub const RANDOM_TENANT: &str = "random";

const DEFAULT_TENANT_TOKEN: &str = "UNPROTECTED";
const RANDOM_TENANT_TOKEN: &str = "UNPROTECTED";

/// Environment variable prefix for per-tenant tokens, matched
/// case-insensitively. `TENANT_TOKEN_ACME=xyz` registers tenant `acme`.
pub const TENANT_TOKEN_PREFIX: &str = "TENANT_TOKEN_";

/// In-memory mapping from tenant identifier to access token.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    tokens: HashMap<String, String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the reserved default and "random" tenants. Runs before any
    /// override source so either can be overridden by it.
    pub fn seed_defaults(&mut self) {
        self.tokens
            .insert(DEFAULT_TENANT.to_string(), DEFAULT_TENANT_TOKEN.to_string());
        self.tokens
            .insert(RANDOM_TENANT.to_string(), RANDOM_TENANT_TOKEN.to_string());
    }

    /// Merge fetched secret-store entries. Each entry with a non-empty
    /// `token` field is inserted under the secret's full store name; entries
    /// without one are logged and skipped. Returns the number merged.
    pub fn merge_from_secret_store(&mut self, entries: &[SecretEntry]) -> usize {
        let mut merged = 0;
        for entry in entries {
            match entry.document.token.as_deref() {
                Some(token) if !token.is_empty() => {
                    self.tokens.insert(entry.name.clone(), token.to_string());
                    merged += 1;
                    tracing::info!(secret = %entry.name, "Loaded tenant token from secret store");
                }
                _ => {
                    tracing::warn!(secret = %entry.name, "Secret has no token value, skipping");
                }
            }
        }
        merged
    }

    /// Merge environment-derived tokens: every variable whose name starts
    /// with [`TENANT_TOKEN_PREFIX`] (case-insensitive) registers the
    /// remainder, lower-cased, as the tenant identifier. Returns the number
    /// merged.
    pub fn merge_from_environment(&mut self, env: &EnvVars) -> usize {
        let mut merged = 0;
        for (key, value) in env.iter() {
            let Some(prefix) = key.get(..TENANT_TOKEN_PREFIX.len()) else {
                continue;
            };
            if !prefix.eq_ignore_ascii_case(TENANT_TOKEN_PREFIX) {
                continue;
            }
            let tenant = key[TENANT_TOKEN_PREFIX.len()..].to_lowercase();
            self.tokens.insert(tenant, value.to_string());
            merged += 1;
        }
        merged
    }

    /// Look up a tenant's token: the secret-store path form
    /// `tenant/{name}/credentials` first (name as given), then the
    /// lower-cased bare name. `None` means unknown tenant.
    pub fn resolve(&self, tenant: &str) -> Option<&str> {
        let path_key = format!("tenant/{tenant}/credentials");
        if let Some(token) = self.tokens.get(&path_key) {
            return Some(token);
        }
        self.tokens.get(&tenant.to_lowercase()).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::SecretDocument;

    fn entry(name: &str, token: Option<&str>) -> SecretEntry {
        SecretEntry {
            name: name.to_string(),
            document: SecretDocument {
                token: token.map(str::to_string),
            },
        }
    }

    #[test]
    fn test_seed_defaults_registers_reserved_tenants() {
        let mut registry = TokenRegistry::new();
        registry.seed_defaults();
        assert_eq!(registry.resolve("test"), Some("UNPROTECTED"));
        assert_eq!(registry.resolve("random"), Some("UNPROTECTED"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_secret_merge_keeps_full_store_name_and_skips_empty_tokens() {
        let mut registry = TokenRegistry::new();
        let merged = registry.merge_from_secret_store(&[
            entry("tenant/acme/credentials", Some("secret-a")),
            entry("tenant/no-token/credentials", None),
            entry("tenant/empty/credentials", Some("")),
        ]);
        assert_eq!(merged, 1);
        assert_eq!(registry.resolve("acme"), Some("secret-a"));
        assert_eq!(registry.resolve("no-token"), None);
        assert_eq!(registry.resolve("empty"), None);
    }

    #[test]
    fn test_environment_merge_normalizes_names() {
        let env = EnvVars::from_pairs([
            ("TENANT_TOKEN_ACME", "xyz"),
            ("tenant_token_Globex", "abc"),
            ("TENANT_TOKEN", "prefix-without-separator"),
            ("UNRELATED", "ignored"),
        ]);
        let mut registry = TokenRegistry::new();
        let merged = registry.merge_from_environment(&env);
        assert_eq!(merged, 2);
        assert_eq!(registry.resolve("acme"), Some("xyz"));
        assert_eq!(registry.resolve("globex"), Some("abc"));
        assert_eq!(registry.resolve("unrelated"), None);
    }

    #[test]
    fn test_later_insertions_win_for_same_key() {
        let mut registry = TokenRegistry::new();
        registry.seed_defaults();
        registry.merge_from_secret_store(&[entry("test", Some("from-store"))]);
        assert_eq!(registry.resolve("test"), Some("from-store"));

        let env = EnvVars::from_pairs([("TENANT_TOKEN_TEST", "from-env")]);
        registry.merge_from_environment(&env);
        assert_eq!(registry.resolve("test"), Some("from-env"));
    }

    #[test]
    fn test_resolve_prefers_path_form_over_bare_name() {
        let mut registry = TokenRegistry::new();
        registry.merge_from_secret_store(&[entry("tenant/acme/credentials", Some("path-token"))]);
        let env = EnvVars::from_pairs([("TENANT_TOKEN_ACME", "bare-token")]);
        registry.merge_from_environment(&env);

        // Different registry keys, so no override applies; lookup checks the
        // path form first.
        assert_eq!(registry.resolve("acme"), Some("path-token"));
        // The literal path still resolves, via the bare-name branch.
        assert_eq!(
            registry.resolve("tenant/acme/credentials"),
            Some("path-token")
        );
    }

    #[test]
    fn test_store_keys_stay_case_sensitive() {
        let mut registry = TokenRegistry::new();
        registry.merge_from_secret_store(&[entry("tenant/Acme/credentials", Some("tok"))]);
        assert_eq!(registry.resolve("Acme"), Some("tok"));
        assert_eq!(registry.resolve("acme"), None);
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = TokenRegistry::new();
        registry.seed_defaults();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve("test"), None);
    }
}
