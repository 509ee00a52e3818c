//! Purchase repositories, one per store concern.

mod codes;
mod intents;
mod receipts;

pub(crate) use codes::PgCodesRepository;
pub(crate) use intents::{NewIntent, PgIntentsRepository};
pub(crate) use receipts::{NewTransaction, PgReceiptsRepository};
