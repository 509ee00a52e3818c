//! Add Codes Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lojal_app::domain::offers::{data::NewCode, records::OfferId};

use crate::{
    extensions::*,
    offers::{errors::offers_status_error, managed_offer},
    state::State,
};

/// Add Codes Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCodesRequest {
    pub codes: Vec<CodeRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CodeRequest {
    /// Code number, unique within the offer
    pub code: i64,

    /// RFC 3339 timestamp after which the code can no longer be bought
    pub expiry: String,
}

impl TryFrom<CodeRequest> for NewCode {
    type Error = jiff::Error;

    fn try_from(request: CodeRequest) -> Result<Self, Self::Error> {
        Ok(NewCode {
            code: request.code,
            expiry: request.expiry.parse::<Timestamp>()?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CodesAddedResponse {
    pub offer: i64,
    pub added: u64,
}

/// Add Codes Handler
///
/// Adds the whole batch or nothing; a code number already present on the offer fails the batch.
#[endpoint(
    tags("offers"),
    summary = "Add Codes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Codes added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Offer belongs to another organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Code already exists"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<i64>,
    json: JsonBody<AddCodesRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CodesAddedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let offer = OfferId::from_i64(offer.into_inner());

    let codes = json
        .into_inner()
        .codes
        .into_iter()
        .map(NewCode::try_from)
        .collect::<Result<Vec<_>, _>>()
        .or_400("could not parse code expiry")?;

    if codes.is_empty() {
        return Err(StatusError::bad_request().brief("No codes given"));
    }

    managed_offer(state, identity, offer).await?;

    let added = state
        .app
        .offers
        .add_codes(offer, codes)
        .await
        .map_err(offers_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CodesAddedResponse {
        offer: offer.into_i64(),
        added,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use lojal_app::domain::offers::{MockOffersService, OffersServiceError};

    use crate::{
        offers::models::fixtures::make_offer,
        test_helpers::{AppMocks, manager},
    };

    use super::*;

    fn make_service(offers: MockOffersService) -> Service {
        AppMocks {
            offers,
            ..AppMocks::default()
        }
        .service(
            manager("bob", "Corner Bakery"),
            Router::with_path("offers/{offer}/codes").post(handler),
        )
    }

    fn body() -> serde_json::Value {
        json!({
            "codes": [
                { "code": 11, "expiry": "2030-01-01T00:00:00Z" },
                { "code": 12, "expiry": "2030-06-01T00:00:00Z" },
            ]
        })
    }

    #[tokio::test]
    async fn test_add_codes_returns_count() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_get_offer()
            .once()
            .return_once(|_| Ok(make_offer(7, "Corner Bakery")));

        offers
            .expect_add_codes()
            .once()
            .withf(|offer, codes| {
                *offer == OfferId::from_i64(7)
                    && codes.iter().map(|code| code.code).collect::<Vec<_>>() == [11, 12]
            })
            .return_once(|_, _| Ok(2));

        let mut res = TestClient::post("http://example.com/offers/7/codes")
            .json(&body())
            .send(&make_service(offers))
            .await;

        let response: CodesAddedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(response.added, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_code_returns_409() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_get_offer()
            .once()
            .return_once(|_| Ok(make_offer(7, "Corner Bakery")));

        offers
            .expect_add_codes()
            .once()
            .return_once(|_, _| Err(OffersServiceError::DuplicateCode));

        let res = TestClient::post("http://example.com/offers/7/codes")
            .json(&body())
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_codes_for_another_shop_return_403() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_get_offer()
            .once()
            .return_once(|_| Ok(make_offer(7, "Cinema")));

        offers.expect_add_codes().never();

        let res = TestClient::post("http://example.com/offers/7/codes")
            .json(&body())
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_expiry_returns_400() -> TestResult {
        let mut offers = MockOffersService::new();

        offers.expect_get_offer().never();
        offers.expect_add_codes().never();

        let res = TestClient::post("http://example.com/offers/7/codes")
            .json(&json!({ "codes": [{ "code": 1, "expiry": "next week" }] }))
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
