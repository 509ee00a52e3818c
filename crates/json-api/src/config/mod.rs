//! Server configuration module

use clap::Parser;

use crate::config::{
    db::StoresConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    purchases::PurchasesConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod purchases;
pub(crate) mod server;

/// Lojal JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "lojal-json", about = "Lojal JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Store and image settings.
    #[command(flatten)]
    pub stores: StoresConfig,

    /// Purchase timing and reconciliation settings.
    #[command(flatten)]
    pub purchases: PurchasesConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for wiring the application services.
    #[must_use]
    pub fn app_settings(&self) -> lojal_app::context::AppSettings {
        lojal_app::context::AppSettings {
            inventory_url: self.stores.inventory_database_url.clone(),
            ledger_url: self.stores.ledger_database_url.clone(),
            images_dir: self.stores.images_dir.clone(),
            purchase_timeout: self.purchases.timeout(),
            reconcile_stale_after: self.purchases.stale_after(),
        }
    }
}
