//! Purchase Handlers

pub(crate) mod create;
