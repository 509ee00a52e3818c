//! Offer Responses

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use lojal_app::domain::{
    catalog::models::{DiscountView, OfferView},
    offers::records::Offer,
};

/// Offer as listed in the catalog
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    pub id: i64,

    /// Shop that publishes the offer
    pub organization: String,

    pub name: String,
    pub category: Option<String>,
    pub active: bool,

    /// Base price in credits
    pub price: u64,

    /// Price of one code after the active discount
    pub effective_price: u64,

    pub discount: Option<OfferDiscountResponse>,

    pub has_image: bool,
}

impl From<OfferView> for OfferResponse {
    fn from(view: OfferView) -> Self {
        Self {
            effective_price: view.effective_price(),
            id: view.id.into_i64(),
            organization: view.organization,
            name: view.name,
            category: view.category,
            active: view.active,
            price: view.price,
            discount: view.discount.map(Into::into),
            has_image: view.has_image,
        }
    }
}

/// Discount active on a listed offer
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferDiscountResponse {
    pub id: i64,
    pub name: Option<String>,

    /// Reduction descriptor, `"N%"` or `"N"`
    pub reduction: String,

    pub expiry: String,

    /// Discounted price of one code
    pub price: u64,
}

impl From<DiscountView> for OfferDiscountResponse {
    fn from(view: DiscountView) -> Self {
        Self {
            id: view.id.into_i64(),
            name: view.name,
            reduction: view.reduction.to_string(),
            expiry: view.expiry.to_string(),
            price: view.price,
        }
    }
}

/// Offer as stored
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferCreatedResponse {
    pub id: i64,
    pub organization: String,
    pub name: String,
    pub price: u64,
    pub category: Option<String>,
    pub active: bool,
    pub created_at: String,
}

impl From<Offer> for OfferCreatedResponse {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id.into_i64(),
            organization: offer.organization,
            name: offer.name,
            price: offer.price,
            category: offer.category,
            active: offer.active,
            created_at: offer.created_at.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use jiff::Timestamp;
    use lojal::reductions::Reduction;

    use lojal_app::domain::{
        catalog::models::{DiscountView, OfferView},
        discounts::records::DiscountId,
        offers::records::{Offer, OfferId},
    };

    pub(crate) fn make_offer(id: i64, organization: &str) -> Offer {
        Offer {
            id: OfferId::from_i64(id),
            organization: organization.to_string(),
            name: "Free croissant".to_string(),
            price: 500,
            category: Some("Food".to_string()),
            active: true,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(crate) fn make_view(id: i64, discounted: bool) -> OfferView {
        OfferView {
            id: OfferId::from_i64(id),
            organization: "Corner Bakery".to_string(),
            name: "Free croissant".to_string(),
            category: Some("Food".to_string()),
            active: true,
            price: 500,
            discount: discounted.then(|| DiscountView {
                id: DiscountId::from_i64(3),
                name: Some("Spring".to_string()),
                reduction: Reduction::Percent(20),
                expiry: Timestamp::UNIX_EPOCH,
                price: 400,
            }),
            has_image: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::make_view, *};

    #[test]
    fn discounted_view_reports_discounted_price() {
        let response = OfferResponse::from(make_view(7, true));

        assert_eq!(response.price, 500);
        assert_eq!(response.effective_price, 400);
        assert_eq!(
            response.discount.map(|discount| discount.reduction),
            Some("20%".to_string())
        );
    }

    #[test]
    fn undiscounted_view_keeps_base_price() {
        let response = OfferResponse::from(make_view(7, false));

        assert_eq!(response.effective_price, 500);
        assert!(response.discount.is_none());
    }
}
