//! Transaction Errors

use salvo::http::StatusError;
use tracing::error;

use lojal_app::domain::transactions::TransactionsServiceError;

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::UnknownUser => StatusError::not_found().brief("User not found"),
        TransactionsServiceError::UnknownOrganization => {
            StatusError::not_found().brief("Organization not found")
        }
        TransactionsServiceError::NotAShop => {
            StatusError::bad_request().brief("Organization is not a shop")
        }
        TransactionsServiceError::InvalidDiscount(source) => {
            error!("recorded discount is malformed: {source}");

            StatusError::internal_server_error()
        }
        TransactionsServiceError::Pricing(source) => {
            error!("failed to price recorded discount: {source}");

            StatusError::internal_server_error()
        }
        TransactionsServiceError::StoreUnavailable(source) => {
            error!("ledger store unavailable: {source}");

            StatusError::service_unavailable()
        }
        TransactionsServiceError::Sql(source) => {
            error!("failed to list transactions: {source}");

            StatusError::internal_server_error()
        }
    }
}
