//! Get Offer Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use lojal_app::domain::offers::records::OfferId;

use crate::{
    extensions::*,
    offers::{errors::catalog_status_error, models::OfferResponse},
    state::State,
};

/// Get Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Get Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<i64>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let view = state
        .app
        .catalog
        .get_offer(OfferId::from_i64(offer.into_inner()), point_in_time)
        .await
        .map_err(catalog_status_error)?;

    Ok(Json(view.into()))
}
