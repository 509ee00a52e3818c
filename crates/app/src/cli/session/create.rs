use clap::Args;
use jiff::Timestamp;
use lojal_app::auth::PgAuthService;

use crate::cli::LedgerArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateSessionArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Login the session authenticates as
    #[arg(long)]
    login: String,

    /// Optional session expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateSessionArgs) -> Result<(), String> {
    if let Some(expires_at) = args.expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let ledger = args.ledger.connect().await?;

    let issued = PgAuthService::new(ledger)
        .issue_session(&args.login, args.expires_at)
        .await
        .map_err(|error| format!("failed to create session: {error}"))?;

    println!("session_uuid: {}", issued.metadata.uuid);
    println!("login: {}", issued.metadata.login);
    println!("session_version: {}", issued.metadata.version.as_i16());
    println!("session_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("session_expires_at: {expires_at}");
    }
    println!("session_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
