//! Lojal prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    codes::{Allocatable, AllocationError, Quantity, QuantityError, select_for_allocation},
    pricing::{PricingError, Quote, price, quote},
    purchases::{PurchaseOutcome, PurchaseState},
    reductions::{Reduction, ReductionError},
};
