//! Purchases
//!
//! A purchase spans both stores. The buyer's intent is recorded in the ledger first; codes are
//! then redeemed in the inventory under that intent, and the ledger transaction that writes the
//! receipt also completes the intent. Intents that never complete have their codes released,
//! either straight away by the purchase itself or later by the [`reconciler`].

mod allocator;
mod compensation;
pub mod data;
pub mod errors;
pub mod models;
pub mod reconciler;
pub mod records;
mod repositories;
pub mod service;

pub use errors::PurchasesServiceError;
pub use reconciler::PurchaseReconciler;
pub use service::*;
