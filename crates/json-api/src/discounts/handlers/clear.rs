//! Clear Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lojal_app::domain::offers::records::OfferId;

use crate::{
    discounts::errors::into_status_error, extensions::*, offers::managed_offer, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountClearedResponse {
    pub offer: i64,

    /// Discounts retired; 0 when the offer had none active
    pub retired: u64,
}

/// Clear Discount Handler
#[endpoint(
    tags("discounts"),
    summary = "Clear Discount",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Discount cleared"),
        (status_code = StatusCode::FORBIDDEN, description = "Offer belongs to another organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<DiscountClearedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let offer = OfferId::from_i64(offer.into_inner());

    managed_offer(state, identity, offer).await?;

    let retired = state
        .app
        .discounts
        .clear_discount(offer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountClearedResponse {
        offer: offer.into_i64(),
        retired,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use lojal_app::domain::{
        discounts::MockDiscountsService,
        offers::{MockOffersService, OffersServiceError},
    };

    use crate::{
        offers::models::fixtures::make_offer,
        test_helpers::{AppMocks, manager},
    };

    use super::*;

    fn make_service(offers: MockOffersService, discounts: MockDiscountsService) -> Service {
        AppMocks {
            offers,
            discounts,
            ..AppMocks::default()
        }
        .service(
            manager("bob", "Corner Bakery"),
            Router::with_path("offers/{offer}/discount").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_clear_discount_reports_retired_count() -> TestResult {
        let mut offers = MockOffersService::new();
        let mut discounts = MockDiscountsService::new();

        offers
            .expect_get_offer()
            .once()
            .return_once(|_| Ok(make_offer(7, "Corner Bakery")));

        discounts
            .expect_clear_discount()
            .once()
            .withf(|offer| *offer == OfferId::from_i64(7))
            .return_once(|_| Ok(1));

        let response: DiscountClearedResponse =
            TestClient::delete("http://example.com/offers/7/discount")
                .send(&make_service(offers, discounts))
                .await
                .take_json()
                .await?;

        assert_eq!(response.retired, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_discount_of_unknown_offer_returns_404() -> TestResult {
        let mut offers = MockOffersService::new();
        let mut discounts = MockDiscountsService::new();

        offers
            .expect_get_offer()
            .once()
            .return_once(|_| Err(OffersServiceError::UnknownOffer));

        discounts.expect_clear_discount().never();

        let res = TestClient::delete("http://example.com/offers/404/discount")
            .send(&make_service(offers, discounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
