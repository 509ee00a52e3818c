use clap::Args;
use lojal_app::auth::PgAuthService;

use crate::cli::LedgerArgs;

#[derive(Debug, Args)]
pub(crate) struct ListSessionsArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Login whose sessions should be listed
    #[arg(long)]
    login: String,
}

pub(crate) async fn run(args: ListSessionsArgs) -> Result<(), String> {
    let ledger = args.ledger.connect().await?;

    let sessions = PgAuthService::new(ledger)
        .list_sessions(&args.login)
        .await
        .map_err(|error| format!("failed to list sessions: {error}"))?;

    if sessions.is_empty() {
        println!("no sessions found for {}", args.login);
        return Ok(());
    }

    for session in sessions {
        println!("session_uuid: {}", session.uuid);
        println!("login: {}", session.login);
        println!("session_version: {}", session.version.as_i16());
        println!("created_at: {}", session.created_at);
        println!(
            "last_used_at: {}",
            session
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "expires_at: {}",
            session
                .expires_at
                .map_or_else(|| "none".to_string(), |value| value.to_string())
        );
        println!(
            "revoked_at: {}",
            session
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
