//! Configuration module for storefront-server.
//!
//! Handles loading configuration from TOML files, CLI arguments,
//! and environment variables.

pub mod file;

use crate::config::file::{FileConfig, StorefrontConfig as FileStorefrontConfig};
use std::net::SocketAddr;
use std::path::Path;
use storefront_core::config::{IdentityConfig, ServerConfig, SharedConfig, StorefrontConfig};
use storefront_core::pricing::CurrencyFormat;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Loaded configuration result containing all parts.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub storefront: StorefrontConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig::new(self.server, self.identity, self.storefront)
    }
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }

        validate(&file_config)?;

        Ok(build_loaded_config(file_config))
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.identity.secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "identity secret must not be empty".to_string(),
        ));
    }
    let storefront = &config.storefront;
    if storefront.currency_symbol.is_empty() {
        return Err(ConfigError::ValidationError(
            "currency symbol must not be empty".to_string(),
        ));
    }
    if storefront.decimal_separator.is_empty() {
        return Err(ConfigError::ValidationError(
            "decimal separator must not be empty".to_string(),
        ));
    }
    if storefront.group_separator == storefront.decimal_separator {
        return Err(ConfigError::ValidationError(format!(
            "group and decimal separators are both {:?}",
            storefront.decimal_separator
        )));
    }
    Ok(())
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    LoadedConfig {
        server: ServerConfig {
            listen: file_config.server.listen,
        },
        identity: IdentityConfig::new(file_config.identity.secret.into_bytes()),
        storefront: convert_storefront(file_config.storefront),
    }
}

fn convert_storefront(s: FileStorefrontConfig) -> StorefrontConfig {
    StorefrontConfig {
        currency: CurrencyFormat {
            symbol: s.currency_symbol,
            group_separator: s.group_separator,
            decimal_separator: s.decimal_separator,
        },
        telemetry_buffer: s.telemetry_buffer,
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "storefront-config-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_applies_listen_override() {
        let path = write_config(
            "override",
            r#"
[server]
listen = "127.0.0.1:3000"

[identity]
secret = "gateway-secret"
"#,
        );
        let override_addr: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        let loaded = ConfigLoader::new(&path, Some(override_addr)).load().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.server.listen, override_addr);
        assert_eq!(loaded.identity.secret_bytes(), b"gateway-secret");
        assert_eq!(loaded.storefront.currency, CurrencyFormat::default());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let path = write_config(
            "empty-secret",
            r#"
[identity]
secret = ""
"#,
        );
        let result = ConfigLoader::new(&path, None).load();
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_same_separators_rejected() {
        let path = write_config(
            "separators",
            r#"
[identity]
secret = "s"

[storefront]
group_separator = "."
decimal_separator = "."
"#,
        );
        let result = ConfigLoader::new(&path, None).load();
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new("/nonexistent/storefront-config.toml", None).load();
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
