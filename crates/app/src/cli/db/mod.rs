use clap::{Args, Subcommand};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending migrations to both stores
    Migrate(StoreArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => {
            let stores = args.connect().await?;

            lojal_app::database::migrate(&stores)
                .await
                .map_err(|error| format!("failed to run migrations: {error}"))?;

            println!("migrations applied");

            Ok(())
        }
    }
}
