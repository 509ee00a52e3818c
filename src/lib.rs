//! Lojal
//!
//! Lojal is the domain core of a loyalty-code commerce backend: discount reductions, offer
//! pricing, code allocation and the purchase lifecycle, independent of any storage.

pub mod codes;
pub mod pricing;
pub mod purchases;
pub mod reductions;

pub mod prelude;
