//! Flat service settings loaded once from the environment.
//!
//! This is the trivial side of configuration: each field maps to exactly one
//! environment variable with a built-in default, and the resulting record is
//! immutable. Tenant token resolution lives in [`crate::tenants`] and is
//! independent of this loader.

use crate::env::EnvVars;

const DEFAULT_PORT: u16 = 4005;
const DEFAULT_EXCHANGE_HOST: &str = "http://coordinator:4005";
const DEFAULT_COORDINATOR_SERVICE: &str = "COORDINATOR:4005";
const DEFAULT_STATUS_SERVICE: &str = "STATUS:4008";
const DEFAULT_SIGNING_SERVICE: &str = "SIGNING:4006";
const DEFAULT_TRANSACTION_SERVICE: &str = "TRANSACTIONS:4004";

/// Immutable service configuration record.
///
/// Endpoint values are flat passthrough strings; no discovery or validation
/// is applied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Listen port for the exchange server (`PORT`).
    pub port: u16,
    /// Public host clients use to reach the exchange (`PUBLIC_EXCHANGE_HOST`).
    pub exchange_host: String,
    /// Coordinator endpoint (`COORDINATOR_SERVICE`).
    pub coordinator_service: String,
    /// Status endpoint (`STATUS_SERVICE`).
    pub status_service: String,
    /// Signing endpoint (`SIGNING_SERVICE`).
    pub signing_service: String,
    /// Transaction endpoint (`TRANSACTION_SERVICE`).
    pub transaction_service: String,
    /// Serve HTTPS in local development (`ENABLE_HTTPS_FOR_DEV`).
    pub enable_https_for_dev: bool,
    /// Emit per-request access logs (`ENABLE_ACCESS_LOGGING`).
    pub enable_access_logging: bool,
    /// Expose the status service (`ENABLE_STATUS_SERVICE`).
    pub enable_status_service: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            exchange_host: DEFAULT_EXCHANGE_HOST.to_string(),
            coordinator_service: DEFAULT_COORDINATOR_SERVICE.to_string(),
            status_service: DEFAULT_STATUS_SERVICE.to_string(),
            signing_service: DEFAULT_SIGNING_SERVICE.to_string(),
            transaction_service: DEFAULT_TRANSACTION_SERVICE.to_string(),
            enable_https_for_dev: false,
            enable_access_logging: false,
            enable_status_service: false,
        }
    }
}

impl Settings {
    /// Build settings from an environment snapshot, falling back to the
    /// built-in default for every unset or unparseable variable.
    pub fn from_env(env: &EnvVars) -> Self {
        let settings = Self {
            port: env
                .get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            exchange_host: string_or(env, "PUBLIC_EXCHANGE_HOST", DEFAULT_EXCHANGE_HOST),
            coordinator_service: string_or(env, "COORDINATOR_SERVICE", DEFAULT_COORDINATOR_SERVICE),
            status_service: string_or(env, "STATUS_SERVICE", DEFAULT_STATUS_SERVICE),
            signing_service: string_or(env, "SIGNING_SERVICE", DEFAULT_SIGNING_SERVICE),
            transaction_service: string_or(env, "TRANSACTION_SERVICE", DEFAULT_TRANSACTION_SERVICE),
            enable_https_for_dev: flag(env, "ENABLE_HTTPS_FOR_DEV"),
            enable_access_logging: flag(env, "ENABLE_ACCESS_LOGGING"),
            enable_status_service: flag(env, "ENABLE_STATUS_SERVICE"),
        };

        tracing::info!(
            port = settings.port,
            exchange_host = %settings.exchange_host,
            "Loaded service settings"
        );

        settings
    }
}

fn string_or(env: &EnvVars, key: &str, default: &str) -> String {
    match env.get(key) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => default.to_string(),
    }
}

/// A flag is enabled iff its variable equals `true`, case-insensitively.
fn flag(env: &EnvVars, key: &str) -> bool {
    env.get(key)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_empty_environment() {
        let settings = Settings::from_env(&EnvVars::default());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.port, 4005);
        assert_eq!(settings.coordinator_service, "COORDINATOR:4005");
        assert_eq!(settings.transaction_service, "TRANSACTIONS:4004");
        assert!(!settings.enable_status_service);
    }

    #[test]
    fn test_environment_overrides() {
        let env = EnvVars::from_pairs([
            ("PORT", "9100"),
            ("PUBLIC_EXCHANGE_HOST", "http://localhost:9100"),
            ("SIGNING_SERVICE", "localhost:4006"),
            ("ENABLE_ACCESS_LOGGING", "TRUE"),
        ]);
        let settings = Settings::from_env(&env);
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.exchange_host, "http://localhost:9100");
        assert_eq!(settings.signing_service, "localhost:4006");
        assert!(settings.enable_access_logging);
        // Untouched fields keep their defaults.
        assert_eq!(settings.status_service, "STATUS:4008");
    }

    #[test]
    fn test_unparseable_port_falls_back_to_default() {
        let env = EnvVars::from_pairs([("PORT", "not-a-port")]);
        assert_eq!(Settings::from_env(&env).port, 4005);
    }

    #[test]
    fn test_flag_requires_literal_true() {
        let env = EnvVars::from_pairs([
            ("ENABLE_HTTPS_FOR_DEV", "1"),
            ("ENABLE_STATUS_SERVICE", "yes"),
        ]);
        let settings = Settings::from_env(&env);
        assert!(!settings.enable_https_for_dev);
        assert!(!settings.enable_status_service);
    }
}
