//! Catalog
//!
//! Read-only offer views: base price, the discount active at the time of reading, the price
//! that discount implies and whether the offer has an image.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
