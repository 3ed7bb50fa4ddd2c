//! Tenant token resolution and service configuration for the exchange
//! coordinator.
//!
//! Configuration merges from three sources with defined precedence:
//! built-in defaults, then the external secret store, then environment
//! variables, which always win. Tokens are opaque strings; validation is the
//! caller's concern.
//!
//! Two independent surfaces:
//! - [`Settings`] — one-shot, immutable translation of flat environment
//!   variables (ports, service endpoints, feature flags).
//! - [`TokenResolver`] — lazily populated tenant → access-token registry
//!   with request-time lookup, explicit reset, and non-fatal degradation
//!   when the secret store is unreachable.
//!
//! Environment:
//! - `TENANT_TOKEN_<NAME>` registers a token for tenant `<name>`
//! - `AWS_SECRET` names the secret store; unset disables it
//! - `APP_ENV=test` suppresses secret-store consultation

pub mod env;
pub mod secrets;
pub mod settings;
pub mod tenants;

pub use env::EnvVars;
pub use secrets::{MemorySecretStore, SecretStore, SecretStoreError};
pub use settings::Settings;
pub use tenants::{TokenRegistry, TokenResolver};
