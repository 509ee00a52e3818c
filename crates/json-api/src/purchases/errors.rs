//! Purchase Errors

use salvo::http::StatusError;
use tracing::error;

use lojal_app::domain::purchases::PurchasesServiceError;

pub(crate) fn into_status_error(error: PurchasesServiceError) -> StatusError {
    match error {
        PurchasesServiceError::InvalidRequest(source) => {
            StatusError::bad_request().brief(format!("Invalid purchase request: {source}"))
        }
        PurchasesServiceError::UnknownUser => StatusError::not_found().brief("User not found"),
        PurchasesServiceError::UnknownOffer => StatusError::not_found().brief("Offer not found"),
        PurchasesServiceError::InsufficientCodes {
            requested,
            available,
        } => StatusError::conflict().brief(format!(
            "Not enough codes: requested {requested}, {available} available"
        )),
        PurchasesServiceError::InsufficientCredits { required, balance } => {
            StatusError::payment_required().brief(format!(
                "Not enough credits: {required} required, balance is {balance}"
            ))
        }
        PurchasesServiceError::AllocationConflict => {
            StatusError::service_unavailable().brief("Codes changed during the purchase, retry")
        }
        PurchasesServiceError::TimedOut => {
            StatusError::gateway_timeout().brief("Purchase timed out, retry")
        }
        PurchasesServiceError::InvalidDiscount(source) => {
            error!("offer has a malformed discount: {source}");

            StatusError::internal_server_error()
        }
        PurchasesServiceError::StoreUnavailable(source) => {
            error!("store unavailable during purchase: {source}");

            StatusError::service_unavailable()
        }
        PurchasesServiceError::Sql(source) => {
            error!("purchase failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
