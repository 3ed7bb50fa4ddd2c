//! Secret store access for tenant credentials.
//!
//! The store itself is an opaque external collaborator reached through the
//! [`SecretStore`] trait: list secret names matching a filter (paginated),
//! fetch one secret's payload by identifier. This module owns the pagination
//! loop and payload extraction; transport belongs to the implementation.
//!
//! Failure policy: a failed fetch or malformed payload skips that one secret
//! and the batch continues. A failed listing aborts the batch and surfaces to
//! the caller, which degrades to environment-only resolution.

pub mod memory;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use memory::MemorySecretStore;

/// Name filter selecting tenant credential secrets.
pub const TENANT_FILTER: &str = "tenant";

/// Maximum number of summaries requested per list page.
pub const LIST_PAGE_SIZE: u32 = 100;

/// Errors from secret store access.
#[derive(Error, Debug)]
pub enum SecretStoreError {
    /// The store could not be reached or refused the call.
    #[error("secret store unavailable: {0}")]
    Unavailable(String),

    /// A secret's payload was not valid JSON.
    #[error("malformed payload for secret '{name}': {reason}")]
    MalformedPayload { name: String, reason: String },
}

/// One entry from a secret listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretSummary {
    /// Store-assigned name, e.g. `tenant/acme/credentials`. Doubles as the
    /// registry key exactly as returned, with no normalization.
    pub name: String,
}

/// One page of listing results.
#[derive(Debug, Clone, Default)]
pub struct SecretPage {
    pub items: Vec<SecretSummary>,
    /// Continuation token for the next page; `None` on the final page.
    pub next: Option<String>,
}

/// Parsed secret payload. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretDocument {
    #[serde(default)]
    pub token: Option<String>,
}

/// A fetched and parsed secret, ready for registry merge.
#[derive(Debug, Clone)]
pub struct SecretEntry {
    pub name: String,
    pub document: SecretDocument,
}

/// External secret store: paginated listing plus per-secret value fetch.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// List secrets whose name matches `name_filter`, returning at most
    /// `page_size` summaries and a continuation token when more remain.
    /// `continuation` is `None` for the first page.
    async fn list_secrets(
        &self,
        name_filter: &str,
        page_size: u32,
        continuation: Option<String>,
    ) -> Result<SecretPage, SecretStoreError>;

    /// Fetch one secret's payload text (a JSON document) by identifier.
    async fn get_secret_value(&self, id: &str) -> Result<String, SecretStoreError>;
}

/// Drive the pagination loop to exhaustion, accumulating all summaries in
/// store order.
pub async fn list_all(
    store: &dyn SecretStore,
    name_filter: &str,
) -> Result<Vec<SecretSummary>, SecretStoreError> {
    let mut summaries = Vec::new();
    let mut continuation = None;

    loop {
        let page = store
            .list_secrets(name_filter, LIST_PAGE_SIZE, continuation)
            .await?;
        summaries.extend(page.items);
        match page.next {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    Ok(summaries)
}

/// List all tenant secrets and fetch each one's payload.
///
/// Per-secret fetch or parse failures are logged and skipped; a listing
/// failure propagates.
pub async fn fetch_tenant_secrets(
    store: &dyn SecretStore,
) -> Result<Vec<SecretEntry>, SecretStoreError> {
    let summaries = list_all(store, TENANT_FILTER).await?;
    tracing::info!(
        count = summaries.len(),
        filter = TENANT_FILTER,
        "Listed secrets matching tenant filter"
    );

    let mut entries = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let raw = match store.get_secret_value(&summary.name).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(secret = %summary.name, error = %e, "Skipping secret: fetch failed");
                continue;
            }
        };

        match serde_json::from_str::<SecretDocument>(&raw) {
            Ok(document) => entries.push(SecretEntry {
                name: summary.name,
                document,
            }),
            Err(e) => {
                let err = SecretStoreError::MalformedPayload {
                    name: summary.name,
                    reason: e.to_string(),
                };
                tracing::warn!(error = %err, "Skipping secret");
            }
        }
    }

    Ok(entries)
}
