//! Transaction Responses

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use lojal_app::domain::transactions::{
    models::{FrozenDiscount, TransactionView},
    records::OfferCopy,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    /// Newest first
    pub transactions: Vec<TransactionResponse>,
}

impl From<Vec<TransactionView>> for TransactionsResponse {
    fn from(views: Vec<TransactionView>) -> Self {
        Self {
            transactions: views.into_iter().map(Into::into).collect(),
        }
    }
}

/// A purchased code with the offer and discount as they were when it was bought
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    pub id: i64,
    pub login: String,
    pub shop: String,
    pub created_at: String,

    /// Credits paid
    pub price: u64,

    pub offer: OfferCopyResponse,
    pub discount: Option<FrozenDiscountResponse>,
    pub code: i64,
    pub expiry: String,
    pub has_image: bool,
}

impl From<TransactionView> for TransactionResponse {
    fn from(view: TransactionView) -> Self {
        Self {
            id: view.id.into_i64(),
            login: view.login,
            shop: view.shop,
            created_at: view.created_at.to_string(),
            price: view.price,
            offer: view.offer.into(),
            discount: view.discount.map(Into::into),
            code: view.code,
            expiry: view.expiry.to_string(),
            has_image: view.has_image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferCopyResponse {
    pub id: i64,
    pub name: String,
    pub price: u64,
    pub category: Option<String>,
}

impl From<OfferCopy> for OfferCopyResponse {
    fn from(offer: OfferCopy) -> Self {
        Self {
            id: offer.id.into_i64(),
            name: offer.name,
            price: offer.price,
            category: offer.category,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FrozenDiscountResponse {
    pub id: i64,
    pub name: Option<String>,
    pub reduction: String,

    /// Price the discount implies for the copied offer
    pub price: u64,
}

impl From<FrozenDiscount> for FrozenDiscountResponse {
    fn from(discount: FrozenDiscount) -> Self {
        Self {
            id: discount.id.into_i64(),
            name: discount.name,
            reduction: discount.reduction.to_string(),
            price: discount.price,
        }
    }
}
