//! Auth middleware.

use std::sync::Arc;

use lojal_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let identity = match state.app.auth.authenticate_bearer(token).await {
        Ok(identity) => identity,
        Err(AuthServiceError::NotFound | AuthServiceError::UnknownUser) => {
            res.render(StatusError::unauthorized().brief("Invalid session token"));

            return;
        }
        Err(AuthServiceError::StoreUnavailable(source)) => {
            error!("store unavailable during session authentication: {source}");

            res.render(StatusError::service_unavailable());

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate session token: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
