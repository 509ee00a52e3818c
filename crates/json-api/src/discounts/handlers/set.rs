//! Set Discount Handler

use std::sync::Arc;

use jiff::Timestamp;
use lojal::reductions::Reduction;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lojal_app::domain::{
    discounts::{data::NewDiscount, models::Discount},
    offers::records::OfferId,
};

use crate::{
    discounts::errors::into_status_error, extensions::*, offers::managed_offer, state::State,
};

/// Set Discount Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetDiscountRequest {
    #[serde(default)]
    pub name: Option<String>,

    /// `"N%"` for a percentage (0 to 100) or `"N"` for an absolute amount of credits
    pub reduction: String,

    /// RFC 3339 timestamp, must lie in the future
    pub expiry: String,
}

impl SetDiscountRequest {
    fn into_new_discount(self) -> Result<NewDiscount, StatusError> {
        Ok(NewDiscount {
            reduction: self
                .reduction
                .parse::<Reduction>()
                .or_400("invalid reduction descriptor")?,
            expiry: self
                .expiry
                .parse::<Timestamp>()
                .or_400("could not parse discount expiry")?,
            name: self.name,
        })
    }
}

/// Discount Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountResponse {
    pub id: i64,
    pub offer: i64,
    pub name: Option<String>,
    pub reduction: String,
    pub expiry: String,
}

impl From<Discount> for DiscountResponse {
    fn from(discount: Discount) -> Self {
        Self {
            id: discount.id.into_i64(),
            offer: discount.offer.into_i64(),
            name: discount.name,
            reduction: discount.reduction.to_string(),
            expiry: discount.expiry.to_string(),
        }
    }
}

/// Set Discount Handler
///
/// Replaces the offer's active discount.
#[endpoint(
    tags("discounts"),
    summary = "Set Discount",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Discount set"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid discount"),
        (status_code = StatusCode::FORBIDDEN, description = "Offer belongs to another organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<i64>,
    json: JsonBody<SetDiscountRequest>,
    depot: &mut Depot,
) -> Result<Json<DiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let offer = OfferId::from_i64(offer.into_inner());
    let discount = json.into_inner().into_new_discount()?;

    managed_offer(state, identity, offer).await?;

    let discount = state
        .app
        .discounts
        .set_discount(offer, discount)
        .await
        .map_err(into_status_error)?;

    tracing::info!(discount = %discount.id, reduction = %discount.reduction, "set discount");

    Ok(Json(discount.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use lojal_app::domain::{
        discounts::{DiscountsServiceError, MockDiscountsService, records::DiscountId},
        offers::MockOffersService,
    };

    use crate::{
        offers::models::fixtures::make_offer,
        test_helpers::{AppMocks, administrator, manager},
    };

    use super::*;

    fn offers_owned_by(organization: &'static str) -> MockOffersService {
        let mut offers = MockOffersService::new();

        offers
            .expect_get_offer()
            .return_once(move |offer| Ok(make_offer(offer.into_i64(), organization)));

        offers
    }

    fn make_service(offers: MockOffersService, discounts: MockDiscountsService) -> Service {
        AppMocks {
            offers,
            discounts,
            ..AppMocks::default()
        }
        .service(
            manager("bob", "Corner Bakery"),
            Router::with_path("offers/{offer}/discount").put(handler),
        )
    }

    #[tokio::test]
    async fn test_set_discount_parses_descriptor() -> TestResult {
        let expiry: Timestamp = "2030-01-01T00:00:00Z".parse()?;
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_set_discount()
            .once()
            .withf(move |offer, discount| {
                *offer == OfferId::from_i64(7)
                    && discount.reduction == Reduction::Percent(25)
                    && discount.expiry == expiry
            })
            .return_once(move |offer, discount| {
                Ok(Discount {
                    id: DiscountId::from_i64(3),
                    offer,
                    name: discount.name,
                    reduction: discount.reduction,
                    expiry: discount.expiry,
                })
            });

        let response: DiscountResponse = TestClient::put("http://example.com/offers/7/discount")
            .json(&json!({ "reduction": "25%", "expiry": "2030-01-01T00:00:00Z" }))
            .send(&make_service(offers_owned_by("Corner Bakery"), discounts))
            .await
            .take_json()
            .await?;

        assert_eq!(response.id, 3);
        assert_eq!(response.reduction, "25%");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_descriptor_returns_400() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts.expect_set_discount().never();

        let res = TestClient::put("http://example.com/offers/7/discount")
            .json(&json!({ "reduction": "150%", "expiry": "2030-01-01T00:00:00Z" }))
            .send(&make_service(MockOffersService::new(), discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_past_expiry_returns_400() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_set_discount()
            .once()
            .return_once(|_, _| Err(DiscountsServiceError::ExpiryNotInFuture));

        let res = TestClient::put("http://example.com/offers/7/discount")
            .json(&json!({ "reduction": "10", "expiry": "2001-01-01T00:00:00Z" }))
            .send(&make_service(offers_owned_by("Corner Bakery"), discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_manager_of_another_shop_gets_403() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts.expect_set_discount().never();

        let res = TestClient::put("http://example.com/offers/7/discount")
            .json(&json!({ "reduction": "10", "expiry": "2030-01-01T00:00:00Z" }))
            .send(&make_service(offers_owned_by("Cinema"), discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_administrator_may_discount_any_shop() -> TestResult {
        let mut discounts = MockDiscountsService::new();

        discounts
            .expect_set_discount()
            .once()
            .return_once(|offer, discount| {
                Ok(Discount {
                    id: DiscountId::from_i64(4),
                    offer,
                    name: discount.name,
                    reduction: discount.reduction,
                    expiry: discount.expiry,
                })
            });

        let service = AppMocks {
            offers: offers_owned_by("Cinema"),
            discounts,
            ..AppMocks::default()
        }
        .service(
            administrator(),
            Router::with_path("offers/{offer}/discount").put(handler),
        );

        let res = TestClient::put("http://example.com/offers/7/discount")
            .json(&json!({ "reduction": "10", "expiry": "2030-01-01T00:00:00Z" }))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
