//! Authentication
//!
//! Sessions are opaque bearer tokens issued per user. Only a hash of each token is stored in
//! the ledger; resolving a token yields the user's [`Identity`].

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use token::*;
