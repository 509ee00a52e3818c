use clap::{Args, Subcommand};
use lojal_app::domain::users::{PgUsersService, UsersService, data::NewUser, records::Role};

use crate::cli::LedgerArgs;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Unique login
    #[arg(long)]
    login: String,

    /// Organization the user belongs to
    #[arg(long)]
    organization: String,

    /// Role (administrator, manager, worker)
    #[arg(long, default_value = "worker")]
    role: Role,

    /// Opening balance; left unset when omitted
    #[arg(long)]
    credits: Option<u64>,
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create(args).await,
    }
}

async fn create(args: CreateUserArgs) -> Result<(), String> {
    let ledger = args.ledger.connect().await?;

    let user = PgUsersService::new(ledger)
        .create_user(NewUser {
            login: args.login,
            organization: args.organization,
            role: args.role,
            credits: args.credits,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("login: {}", user.login);
    println!("organization: {}", user.organization);
    println!("role: {}", user.role);
    println!("balance: {}", user.balance());

    Ok(())
}
