//! Tenant access-token registry and resolution
//!
//! The registry holds tenant → token mappings merged from built-in defaults,
//! the secret store, and environment variables; the resolver owns its
//! lifecycle and answers lookups.

pub mod registry;
pub mod resolver;

pub use registry::{TENANT_TOKEN_PREFIX, TokenRegistry};
pub use resolver::TokenResolver;
