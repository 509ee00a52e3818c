use clap::Args;
use lojal_app::auth::{PgAuthService, SessionUuid};
use uuid::Uuid;

use crate::cli::LedgerArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeSessionArgs {
    #[command(flatten)]
    ledger: LedgerArgs,

    /// Session to revoke
    #[arg(long)]
    session_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeSessionArgs) -> Result<(), String> {
    let ledger = args.ledger.connect().await?;

    let revoked = PgAuthService::new(ledger)
        .revoke_session(SessionUuid::from_uuid(args.session_uuid))
        .await
        .map_err(|error| format!("failed to revoke session: {error}"))?;

    if revoked {
        println!("session {} revoked", args.session_uuid);
    } else {
        println!("session {} was not active", args.session_uuid);
    }

    Ok(())
}
