//! TOML file configuration structures.
//!
//! These structs directly map to the `storefront-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Identity configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Secret shared with the authentication gateway that signs the
    /// `Storefront-User` header.
    pub secret: String,
}

/// Storefront display and telemetry section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_group_separator")]
    pub group_separator: String,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
    /// Capacity of the telemetry channel.
    #[serde(default = "default_telemetry_buffer")]
    pub telemetry_buffer: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            group_separator: default_group_separator(),
            decimal_separator: default_decimal_separator(),
            telemetry_buffer: default_telemetry_buffer(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_group_separator() -> String {
    ",".to_string()
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

fn default_telemetry_buffer() -> usize {
    storefront_core::telemetry::DEFAULT_TELEMETRY_BUFFER
}
