//! Purchase Codes Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lojal::purchases::PurchaseOutcome;
use lojal_app::domain::{
    offers::records::OfferId,
    purchases::{
        data::PurchaseRequest,
        models::{Purchase, PurchasedCode},
    },
};

use crate::{
    extensions::*, observability::observe_purchase, purchases::errors::into_status_error,
    state::State,
};

const DEFAULT_QUANTITY: i64 = 1;

/// Purchase Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    pub intent: Uuid,
    pub offer: i64,

    /// Credits charged per code
    pub unit_price: u64,

    pub total: u64,

    /// Balance left after the purchase
    pub balance: u64,

    /// Codes in allocation order, earliest expiry first
    pub codes: Vec<PurchasedCodeResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchasedCodeResponse {
    pub code: i64,
    pub expiry: String,
}

impl From<PurchasedCode> for PurchasedCodeResponse {
    fn from(code: PurchasedCode) -> Self {
        Self {
            code: code.code,
            expiry: code.expiry.to_string(),
        }
    }
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        Self {
            intent: purchase.intent.into_uuid(),
            offer: purchase.offer.into_i64(),
            unit_price: purchase.unit_price,
            total: purchase.total,
            balance: purchase.balance,
            codes: purchase.codes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Purchase Codes Handler
///
/// Buys codes of an offer for the authenticated user. `quantity` defaults to a single code.
#[endpoint(
    tags("purchases"),
    summary = "Purchase Codes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Codes purchased"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::PAYMENT_REQUIRED, description = "Not enough credits"),
        (status_code = StatusCode::NOT_FOUND, description = "User or offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough codes available"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Retry later"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Purchase timed out"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<i64>,
    quantity: QueryParam<i64, false>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PurchaseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let request = PurchaseRequest {
        buyer: identity.login.clone(),
        offer: OfferId::from_i64(offer.into_inner()),
        quantity: quantity.into_inner().unwrap_or(DEFAULT_QUANTITY),
    };

    let purchase = match state.app.purchases.purchase(request).await {
        Ok(purchase) => purchase,
        Err(error) => {
            observe_purchase(error.outcome());

            return Err(into_status_error(error));
        }
    };

    observe_purchase(PurchaseOutcome::Completed);

    res.status_code(StatusCode::CREATED);

    Ok(Json(purchase.into()))
}
