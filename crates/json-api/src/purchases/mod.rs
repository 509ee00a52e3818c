//! Purchases

pub(crate) mod errors;
pub(crate) mod handlers;
