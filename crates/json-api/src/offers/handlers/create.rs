//! Create Offer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lojal_app::domain::offers::data::NewOffer;

use crate::{
    extensions::*,
    offers::{errors::offers_status_error, models::OfferCreatedResponse},
    state::State,
};

/// Create Offer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOfferRequest {
    /// Shop publishing the offer
    pub organization: String,

    pub name: String,

    /// Base price in credits
    pub price: u64,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default = "active_by_default")]
    pub active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl From<CreateOfferRequest> for NewOffer {
    fn from(request: CreateOfferRequest) -> Self {
        NewOffer {
            organization: request.organization,
            name: request.name,
            price: request.price,
            category: request.category,
            active: request.active,
        }
    }
}

/// Create Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Create Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Offer created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a manager of the organization"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOfferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let request = json.into_inner();

    if !identity.manages(&request.organization) {
        return Err(StatusError::forbidden().brief("Not a manager of this organization"));
    }

    let offer = state
        .app
        .offers
        .create_offer(request.into())
        .await
        .map_err(offers_status_error)?;

    res.add_header(LOCATION, format!("/offers/{}", offer.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(offer = %offer.id, organization = %offer.organization, "created offer");

    Ok(Json(offer.into()))
}
