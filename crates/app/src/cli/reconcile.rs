use clap::Args;
use jiff::{SignedDuration, Timestamp};
use lojal_app::domain::purchases::{PurchaseReconciler, reconciler::DEFAULT_BATCH};

use crate::cli::StoreArgs;

/// Release codes held by purchases that never completed
#[derive(Debug, Args)]
pub(crate) struct ReconcileArgs {
    #[command(flatten)]
    stores: StoreArgs,

    /// Only purchases older than this are touched
    #[arg(long, env = "RECONCILE_STALE_AFTER_SECONDS", default_value_t = 300)]
    stale_after_seconds: u32,

    /// Most purchases released in one run
    #[arg(long, default_value_t = DEFAULT_BATCH, value_parser = clap::value_parser!(i64).range(1..))]
    batch: i64,
}

pub(crate) async fn run(args: ReconcileArgs) -> Result<(), String> {
    let stores = args.stores.connect().await?;

    let report = PurchaseReconciler::new(
        stores,
        SignedDuration::from_secs(i64::from(args.stale_after_seconds)),
    )
    .with_batch(args.batch)
    .reconcile(Timestamp::now())
    .await
    .map_err(|error| format!("failed to reconcile purchases: {error}"))?;

    println!("claimed: {}", report.claimed);
    println!("compensated: {}", report.compensated);
    println!("released_codes: {}", report.released_codes);

    Ok(())
}
