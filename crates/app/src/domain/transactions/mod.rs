//! Transactions
//!
//! Purchase history as recorded in the ledger. Views are built from the receipt copies, so
//! they show the offer and discount as they were when the code was bought.

pub mod errors;
pub mod models;
pub mod records;
mod repository;
pub mod service;

pub use errors::TransactionsServiceError;
pub use service::*;
