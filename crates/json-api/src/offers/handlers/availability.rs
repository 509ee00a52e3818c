//! Offer Availability Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lojal_app::domain::offers::records::OfferId;

use crate::{extensions::*, offers::errors::catalog_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityResponse {
    pub offer: i64,

    /// Codes still available and unexpired
    pub available: u64,
}

/// Offer Availability Handler
#[endpoint(
    tags("offers"),
    summary = "Count Available Codes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Codes counted"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<i64>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AvailabilityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;
    let offer = offer.into_inner();

    let available = state
        .app
        .catalog
        .available_codes(OfferId::from_i64(offer), point_in_time)
        .await
        .map_err(catalog_status_error)?;

    Ok(Json(AvailabilityResponse { offer, available }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use lojal_app::domain::catalog::{CatalogServiceError, MockCatalogService};

    use crate::test_helpers::{AppMocks, worker};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        AppMocks {
            catalog,
            ..AppMocks::default()
        }
        .service(
            worker("alice", "Acme"),
            Router::with_path("offers/{offer}/availability").get(handler),
        )
    }

    #[tokio::test]
    async fn test_availability_returns_count() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_available_codes()
            .once()
            .withf(|offer, _| *offer == OfferId::from_i64(7))
            .return_once(|_, _| Ok(3));

        let response: AvailabilityResponse =
            TestClient::get("http://example.com/offers/7/availability")
                .send(&make_service(catalog))
                .await
                .take_json()
                .await?;

        assert_eq!(response.offer, 7);
        assert_eq!(response.available, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_availability_of_unknown_offer_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_available_codes()
            .once()
            .return_once(|_, _| Err(CatalogServiceError::UnknownOffer));

        let res = TestClient::get("http://example.com/offers/404/availability")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_availability_when_store_is_down_returns_503() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_available_codes()
            .once()
            .return_once(|_, _| {
                Err(CatalogServiceError::StoreUnavailable(
                    sqlx::Error::PoolTimedOut,
                ))
            });

        let res = TestClient::get("http://example.com/offers/7/availability")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
