//! Offers

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod models;

use std::sync::Arc;

use salvo::http::StatusError;

use lojal_app::{
    auth::Identity,
    domain::offers::records::{Offer, OfferId},
};

use crate::{offers::errors::offers_status_error, state::State};

/// Loads the offer and checks that `identity` manages the shop that owns it.
pub(crate) async fn managed_offer(
    state: &Arc<State>,
    identity: &Identity,
    offer: OfferId,
) -> Result<Offer, StatusError> {
    let offer = state
        .app
        .offers
        .get_offer(offer)
        .await
        .map_err(offers_status_error)?;

    if !identity.manages(&offer.organization) {
        return Err(StatusError::forbidden().brief("Offer belongs to another organization"));
    }

    Ok(offer)
}
