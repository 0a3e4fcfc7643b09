//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use checkout::{CheckoutConfig, ClearScope};

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `CATALOG_PATH`: JSON product feed to load (default: the bundled demo catalog)
/// - `CLEAR_SCOPE`: `entire-cart` or `purchased-items` (default: `entire-cart`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub catalog_path: Option<PathBuf>,
    pub clear_scope: ClearScope,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: std::env::var("CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            clear_scope: std::env::var("CLEAR_SCOPE")
                .ok()
                .and_then(|s| match s.parse() {
                    Ok(scope) => Some(scope),
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring CLEAR_SCOPE");
                        None
                    }
                })
                .unwrap_or_default(),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the checkout policy derived from this configuration.
    pub fn checkout(&self) -> CheckoutConfig {
        CheckoutConfig::default().with_clear_scope(self.clear_scope)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            catalog_path: None,
            clear_scope: ClearScope::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = ["HOST", "PORT", "RUST_LOG", "CATALOG_PATH", "CLEAR_SCOPE"];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env-touching tests are serialized with #[serial].
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(var: &str, value: &str) {
        // SAFETY: env-touching tests are serialized with #[serial].
        unsafe { std::env::set_var(var, value) };
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.clear_scope, ClearScope::EntireCart);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert!(config.catalog_path.is_none());
        assert_eq!(config.clear_scope, ClearScope::EntireCart);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_env("HOST", "127.0.0.1");
        set_env("PORT", "8081");
        set_env("CATALOG_PATH", "/tmp/products.json");
        set_env("CLEAR_SCOPE", "purchased-items");

        let config = Config::from_env();
        assert_eq!(config.addr(), "127.0.0.1:8081");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/products.json")));
        assert_eq!(config.checkout().clear_scope, ClearScope::PurchasedItems);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values_fall_back() {
        clear_env();
        set_env("PORT", "not-a-port");
        set_env("CLEAR_SCOPE", "sometimes");
        set_env("CATALOG_PATH", "  ");

        let config = Config::from_env();
        assert_eq!(config.port, 3000);
        assert_eq!(config.clear_scope, ClearScope::EntireCart);
        assert!(config.catalog_path.is_none());
        clear_env();
    }
}
