//! Loyalty-code commerce backend: domain services and persistence for both stores.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod images;

#[cfg(test)]
mod test;

mod ids;
mod uuids;
