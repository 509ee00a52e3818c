//! Store Config

use std::path::PathBuf;

use clap::Args;

/// Store and image settings.
#[derive(Debug, Args)]
pub struct StoresConfig {
    /// Inventory `PostgreSQL` connection string
    #[arg(long, env = "INVENTORY_DATABASE_URL", hide_env_values = true)]
    pub inventory_database_url: String,

    /// Ledger `PostgreSQL` connection string
    #[arg(long, env = "LEDGER_DATABASE_URL", hide_env_values = true)]
    pub ledger_database_url: String,

    /// Directory holding the `Offers/` image folder
    #[arg(long, env = "IMAGES_DIR", default_value = "images")]
    pub images_dir: PathBuf,
}
