//! Loyalty domain concerns

pub mod catalog;
pub mod discounts;
pub mod offers;
pub mod organizations;
pub mod purchases;
pub mod transactions;
pub mod users;
