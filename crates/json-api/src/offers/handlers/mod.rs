//! Offer Handlers

pub(crate) mod availability;
pub(crate) mod codes;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
