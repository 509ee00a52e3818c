use clap::{Args, Subcommand};
use lojal_app::domain::organizations::{
    OrganizationsService, PgOrganizationsService, data::NewOrganization,
    records::OrganizationKind,
};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct OrganizationCommand {
    #[command(subcommand)]
    command: OrganizationSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrganizationSubcommand {
    Create(CreateOrganizationArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateOrganizationArgs {
    #[command(flatten)]
    stores: StoreArgs,

    /// Unique organization name
    #[arg(long)]
    name: String,

    /// Organization kind (shop, client)
    #[arg(long)]
    kind: OrganizationKind,
}

pub(crate) async fn run(command: OrganizationCommand) -> Result<(), String> {
    match command.command {
        OrganizationSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateOrganizationArgs) -> Result<(), String> {
    let stores = args.stores.connect().await?;

    let organization = PgOrganizationsService::new(stores)
        .create_organization(NewOrganization {
            name: args.name,
            kind: args.kind,
        })
        .await
        .map_err(|error| format!("failed to create organization: {error}"))?;

    println!("organization: {}", organization.name);
    println!("kind: {}", organization.kind);

    Ok(())
}
