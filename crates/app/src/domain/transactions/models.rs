//! Transaction Models

use jiff::Timestamp;
use lojal::{pricing::price, reductions::Reduction};

use crate::domain::{
    discounts::records::DiscountId,
    transactions::{
        errors::TransactionsServiceError,
        records::{OfferCopy, TransactionId, TransactionRecord},
    },
};

/// A purchased code as shown in a purchase history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionView {
    pub id: TransactionId,
    pub login: String,
    pub shop: String,
    pub created_at: Timestamp,

    /// Price paid.
    pub price: u64,

    pub offer: OfferCopy,
    pub discount: Option<FrozenDiscount>,
    pub code: i64,
    pub expiry: Timestamp,
    pub has_image: bool,
}

/// Discount a code was bought under, with the price it implies for the copied offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenDiscount {
    pub id: DiscountId,
    pub name: Option<String>,
    pub reduction: Reduction,
    pub price: u64,
}

impl TransactionView {
    pub(crate) fn from_record(
        record: TransactionRecord,
        has_image: bool,
    ) -> Result<Self, TransactionsServiceError> {
        let discount = match record.discount {
            Some(copy) => {
                let reduction: Reduction = copy.reduction.parse()?;

                Some(FrozenDiscount {
                    price: price(record.offer.price, Some(&reduction))?,
                    id: copy.id,
                    name: copy.name,
                    reduction,
                })
            }
            None => None,
        };

        Ok(Self {
            id: record.id,
            login: record.login,
            shop: record.shop,
            created_at: record.created_at,
            price: record.price,
            offer: record.offer,
            discount,
            code: record.code,
            expiry: record.expiry,
            has_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::{offers::records::OfferId, transactions::records::DiscountCopy};

    use super::*;

    fn record(discount: Option<&str>) -> TransactionRecord {
        let now = Timestamp::now();

        TransactionRecord {
            id: TransactionId::from_i64(1),
            login: "alice".to_string(),
            shop: "Corner Bakery".to_string(),
            price: 400,
            created_at: now,
            code: 11,
            expiry: now,
            offer: OfferCopy {
                id: OfferId::from_i64(7),
                name: "Free croissant".to_string(),
                price: 500,
                category: None,
            },
            discount: discount.map(|reduction| DiscountCopy {
                id: DiscountId::from_i64(3),
                name: None,
                reduction: reduction.to_string(),
            }),
        }
    }

    #[test]
    fn frozen_discount_carries_its_implied_price() -> TestResult {
        let view = TransactionView::from_record(record(Some("20%")), false)?;

        let discount = view.discount.ok_or("discount missing")?;

        assert_eq!(discount.reduction, Reduction::Percent(20));
        assert_eq!(discount.price, 400);
        assert_eq!(view.price, 400);

        Ok(())
    }

    #[test]
    fn undiscounted_purchase_has_no_discount() -> TestResult {
        let view = TransactionView::from_record(record(None), true)?;

        assert!(view.discount.is_none());
        assert!(view.has_image);

        Ok(())
    }

    #[test]
    fn malformed_copied_discount_is_an_error() {
        let result = TransactionView::from_record(record(Some("half")), false);

        assert!(
            matches!(result, Err(TransactionsServiceError::InvalidDiscount(_))),
            "expected InvalidDiscount, got {result:?}"
        );
    }
}
