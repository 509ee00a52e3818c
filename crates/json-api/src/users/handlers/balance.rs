//! Balance Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, handlers::BalanceResponse},
};

/// Balance Handler
#[endpoint(
    tags("users"),
    summary = "Get Own Balance",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BalanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let credits = state
        .app
        .users
        .balance(&identity.login)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BalanceResponse {
        login: identity.login.clone(),
        credits,
    }))
}
