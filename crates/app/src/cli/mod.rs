use clap::{Args, Parser, Subcommand};
use lojal_app::database::{self, Db, Stores};

mod db;
mod organization;
mod reconcile;
mod session;
mod user;

#[derive(Debug, Parser)]
#[command(name = "lojal-app", about = "Lojal CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Organization(organization::OrganizationCommand),
    User(user::UserCommand),
    Session(session::SessionCommand),
    Reconcile(reconcile::ReconcileArgs),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Organization(command) => organization::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Session(command) => session::run(command).await,
            Commands::Reconcile(args) => reconcile::run(args).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connection strings for both stores.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// Inventory `PostgreSQL` connection string
    #[arg(long, env = "INVENTORY_DATABASE_URL", hide_env_values = true)]
    inventory_database_url: String,

    #[command(flatten)]
    ledger: LedgerArgs,
}

impl StoreArgs {
    pub(crate) async fn connect(&self) -> Result<Stores, String> {
        database::connect_stores(
            &self.inventory_database_url,
            &self.ledger.ledger_database_url,
        )
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

/// Connection string for the ledger store alone.
#[derive(Debug, Args)]
pub(crate) struct LedgerArgs {
    /// Ledger `PostgreSQL` connection string
    #[arg(long, env = "LEDGER_DATABASE_URL", hide_env_values = true)]
    ledger_database_url: String,
}

impl LedgerArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect(&self.ledger_database_url)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
