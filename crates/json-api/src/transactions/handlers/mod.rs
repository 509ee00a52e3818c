//! Transaction Handlers

pub(crate) mod index;
pub(crate) mod mine;
