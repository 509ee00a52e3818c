//! Offer Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    offers::{errors::catalog_status_error, models::OfferResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersResponse {
    /// The shop's offers
    pub offers: Vec<OfferResponse>,
}

/// Offer Index Handler
///
/// Lists a shop's offers with the discount active at `at` (default: now).
#[endpoint(
    tags("offers"),
    summary = "List Offers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offers listed"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Organization is not a shop"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<String>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let offers = state
        .app
        .catalog
        .list_offers(&organization.into_inner(), point_in_time)
        .await
        .map_err(catalog_status_error)?;

    Ok(Json(OffersResponse {
        offers: offers.into_iter().map(Into::into).collect(),
    }))
}
