//! Credit Adjustment Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, handlers::BalanceResponse},
};

/// Credit Adjustment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdjustCreditsRequest {
    /// Added to the balance; a negative delta never takes it below 0
    pub delta: i64,
}

/// Credit Adjustment Handler
#[endpoint(
    tags("users"),
    summary = "Adjust Credits",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Balance adjusted"),
        (status_code = StatusCode::FORBIDDEN, description = "Administrator role required"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    login: PathParam<String>,
    json: JsonBody<AdjustCreditsRequest>,
    depot: &mut Depot,
) -> Result<Json<BalanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let administrator = depot.administrator_or_403()?;
    let login = login.into_inner();
    let delta = json.into_inner().delta;

    let user = state
        .app
        .users
        .adjust_credits(&login, delta)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        %login,
        delta,
        balance = user.balance(),
        by = %administrator.login,
        "adjusted credits"
    );

    Ok(Json(BalanceResponse {
        credits: user.balance(),
        login: user.login,
    }))
}
