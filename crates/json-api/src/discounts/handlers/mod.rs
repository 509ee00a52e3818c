//! Discount Handlers

pub(crate) mod clear;
pub(crate) mod set;
