//! In-memory secret store.
//!
//! Honors the same listing contract as a real store (substring name filter,
//! page size, continuation tokens), which makes it suitable for tests and
//! local development runs where no external store exists.

use async_trait::async_trait;

use super::{SecretPage, SecretStore, SecretStoreError, SecretSummary};

/// Ordered in-memory store of secret name → payload text. Read-only after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    secrets: Vec<(String, String)>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret, builder-style. Listing order is insertion order.
    pub fn with_secret(mut self, name: impl Into<String>, payload: impl Into<String>) -> Self {
        self.secrets.push((name.into(), payload.into()));
        self
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn list_secrets(
        &self,
        name_filter: &str,
        page_size: u32,
        continuation: Option<String>,
    ) -> Result<SecretPage, SecretStoreError> {
        let matching: Vec<&str> = self
            .secrets
            .iter()
            .filter(|(name, _)| name.contains(name_filter))
            .map(|(name, _)| name.as_str())
            .collect();

        let start = match continuation {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| SecretStoreError::Unavailable(format!("bad continuation token '{token}'")))?,
            None => 0,
        };
        let end = start.saturating_add(page_size as usize).min(matching.len());

        let items = matching[start.min(matching.len())..end]
            .iter()
            .map(|name| SecretSummary {
                name: name.to_string(),
            })
            .collect();
        let next = (end < matching.len()).then(|| end.to_string());

        Ok(SecretPage { items, next })
    }

    async fn get_secret_value(&self, id: &str) -> Result<String, SecretStoreError> {
        self.secrets
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, payload)| payload.clone())
            .ok_or_else(|| SecretStoreError::Unavailable(format!("no such secret '{id}'")))
    }
}
