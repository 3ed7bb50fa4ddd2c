//! Lazy tenant token resolution.
//!
//! The resolver owns the registry behind an async lock together with an
//! explicit populated flag, so "reset and currently empty" and "never
//! populated" are distinct states. Population runs at most once per
//! lifecycle: the first lookup (or the first after a reset) seeds defaults,
//! merges the secret store when one is configured, then merges environment
//! tokens last so they take final precedence. Concurrent first lookups await
//! the same in-flight pass instead of issuing duplicate store calls.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::env::EnvVars;
use crate::secrets::{self, SecretStore, SecretStoreError};

use super::registry::TokenRegistry;

#[derive(Debug, Default)]
struct ResolverState {
    populated: bool,
    registry: TokenRegistry,
}

/// Resolves per-tenant access tokens from defaults, the secret store, and
/// environment variables.
#[derive(Clone)]
pub struct TokenResolver {
    env: EnvVars,
    store: Arc<dyn SecretStore>,
    state: Arc<RwLock<ResolverState>>,
}

impl TokenResolver {
    /// Create a resolver over an environment snapshot and a secret store
    /// client. Nothing is fetched until the first lookup.
    pub fn new(env: EnvVars, store: Arc<dyn SecretStore>) -> Self {
        Self {
            env,
            store,
            state: Arc::new(RwLock::new(ResolverState::default())),
        }
    }

    /// Resolve a tenant's access token.
    ///
    /// Triggers one-time population on first use. Lookup checks the
    /// secret-store path form `tenant/{name}/credentials` first, then the
    /// lower-cased bare name. `None` signals an unknown tenant; the caller
    /// owns the authorization decision.
    pub async fn resolve_token(&self, tenant: &str) -> Option<String> {
        {
            let state = self.state.read().await;
            if state.populated {
                return state.registry.resolve(tenant).map(str::to_string);
            }
        }

        let mut state = self.state.write().await;
        // Re-check under the write lock: a racing caller may have populated
        // while we waited.
        if !state.populated {
            self.populate(&mut state).await;
        }
        state.registry.resolve(tenant).map(str::to_string)
    }

    /// Clear the registry and force a fresh population pass on next lookup.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.registry.clear();
        state.populated = false;
        tracing::debug!("Token registry reset");
    }

    /// Fetch tenant secrets from the store and merge them into the current
    /// registry, independently of the population lifecycle. Returns the
    /// number of tokens merged.
    pub async fn load_from_secret_store(&self) -> Result<usize, SecretStoreError> {
        let entries = secrets::fetch_tenant_secrets(self.store.as_ref()).await?;
        let mut state = self.state.write().await;
        Ok(state.registry.merge_from_secret_store(&entries))
    }

    /// Populate the registry: seed defaults, then merge the secret store if
    /// one is configured and the process is not in test mode, then merge
    /// environment tokens last. Secret-store failure degrades to
    /// defaults+environment and never aborts.
    async fn populate(&self, state: &mut ResolverState) {
        state.registry.clear();
        state.registry.seed_defaults();

        if let Some(secret_id) = self.env.secret_store_id() {
            if self.env.test_mode() {
                tracing::debug!("Test mode set, skipping secret store");
            } else {
                tracing::info!(secret = secret_id, "Using secret store for tenant tokens");
                match secrets::fetch_tenant_secrets(self.store.as_ref()).await {
                    Ok(entries) => {
                        let merged = state.registry.merge_from_secret_store(&entries);
                        tracing::info!(merged, "Merged tenant tokens from secret store");
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Secret store unavailable, falling back to environment tokens"
                        );
                    }
                }
            }
        }

        let merged = state.registry.merge_from_environment(&self.env);
        tracing::debug!(
            merged,
            total = state.registry.len(),
            "Tenant token registry populated"
        );
        state.populated = true;
    }
}
