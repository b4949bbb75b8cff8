//! Configuration types for the Storefront orders service.
//!
//! These types represent the validated runtime configuration. The actual
//! config loading/parsing is handled by the server crate.

mod identity;
mod server;
mod storefront;

pub use identity::IdentityConfig;
pub use server::ServerConfig;
pub use storefront::StorefrontConfig;

use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared configuration state with separate locks for each section.
///
/// This allows independent access to different configuration sections
/// without blocking other readers/writers.
#[derive(Clone)]
pub struct SharedConfig {
    /// Server configuration (listen address).
    pub server: Arc<RwLock<ServerConfig>>,
    /// Shared secret used to verify identity headers.
    pub identity: Arc<RwLock<IdentityConfig>>,
    /// Display settings.
    pub storefront: Arc<RwLock<StorefrontConfig>>,
}

impl SharedConfig {
    pub fn new(server: ServerConfig, identity: IdentityConfig, storefront: StorefrontConfig) -> Self {
        Self {
            server: Arc::new(RwLock::new(server)),
            identity: Arc::new(RwLock::new(identity)),
            storefront: Arc::new(RwLock::new(storefront)),
        }
    }
}
