//! User Errors

use salvo::http::StatusError;
use tracing::error;

use lojal_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => StatusError::conflict().brief("User already exists"),
        UsersServiceError::UnknownUser => StatusError::not_found().brief("User not found"),
        UsersServiceError::UnknownOrganization => {
            StatusError::not_found().brief("Organization not found")
        }
        UsersServiceError::InvalidData | UsersServiceError::InvalidCredits(_) => {
            StatusError::bad_request().brief("Invalid credit amount")
        }
        UsersServiceError::StoreUnavailable(source) => {
            error!("ledger store unavailable: {source}");

            StatusError::service_unavailable()
        }
        UsersServiceError::Sql(source) => {
            error!("failed to access user: {source}");

            StatusError::internal_server_error()
        }
    }
}
