//! Catalog Models

use jiff::Timestamp;
use lojal::{
    pricing::{PricingError, price},
    reductions::Reduction,
};

use crate::domain::{
    discounts::{models::Discount, records::DiscountId},
    offers::records::{Offer, OfferId},
};

/// Offer as shown to buyers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferView {
    pub id: OfferId,
    pub organization: String,
    pub name: String,
    pub category: Option<String>,
    pub active: bool,

    /// Base price before any discount.
    pub price: u64,

    /// Discount active when the view was built.
    pub discount: Option<DiscountView>,

    pub has_image: bool,
}

impl OfferView {
    /// Price a buyer pays for one code right now.
    #[must_use]
    pub fn effective_price(&self) -> u64 {
        self.discount
            .as_ref()
            .map_or(self.price, |discount| discount.price)
    }
}

/// Active discount with the price it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountView {
    pub id: DiscountId,
    pub name: Option<String>,
    pub reduction: Reduction,
    pub expiry: Timestamp,

    /// Discounted price of one code.
    pub price: u64,
}

/// Combine an offer with its active discount and image flag.
///
/// # Errors
///
/// Returns [`PricingError`] when the discounted price cannot be computed.
pub(crate) fn assemble(
    offer: Offer,
    discount: Option<Discount>,
    has_image: bool,
) -> Result<OfferView, PricingError> {
    let discount = discount
        .map(|discount| {
            Ok::<_, PricingError>(DiscountView {
                price: price(offer.price, Some(&discount.reduction))?,
                id: discount.id,
                name: discount.name,
                reduction: discount.reduction,
                expiry: discount.expiry,
            })
        })
        .transpose()?;

    Ok(OfferView {
        id: offer.id,
        organization: offer.organization,
        name: offer.name,
        category: offer.category,
        active: offer.active,
        price: offer.price,
        discount,
        has_image,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn offer(price: u64) -> Offer {
        Offer {
            id: OfferId::from_i64(7),
            organization: "Corner Bakery".to_string(),
            name: "Croissant".to_string(),
            price,
            category: None,
            active: true,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn view_without_discount_keeps_base_price() -> TestResult {
        let view = assemble(offer(500), None, false)?;

        assert_eq!(view.effective_price(), 500);
        assert!(view.discount.is_none());

        Ok(())
    }

    #[test]
    fn view_with_discount_carries_new_price() -> TestResult {
        let discount = Discount {
            id: DiscountId::from_i64(1),
            offer: OfferId::from_i64(7),
            name: Some("Spring".to_string()),
            reduction: Reduction::Percent(20),
            expiry: Timestamp::now(),
        };

        let view = assemble(offer(500), Some(discount), true)?;

        assert_eq!(view.price, 500);
        assert_eq!(view.effective_price(), 400);
        assert!(view.has_image);

        Ok(())
    }
}
