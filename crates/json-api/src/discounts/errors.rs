//! Discount Errors

use salvo::http::StatusError;
use tracing::error;

use lojal_app::domain::discounts::DiscountsServiceError;

pub(crate) fn into_status_error(error: DiscountsServiceError) -> StatusError {
    match error {
        DiscountsServiceError::UnknownOffer => StatusError::not_found().brief("Offer not found"),
        DiscountsServiceError::InvalidDiscount(_) => {
            StatusError::bad_request().brief("Invalid discount")
        }
        DiscountsServiceError::ExpiryNotInFuture => {
            StatusError::bad_request().brief("Discount expiry must lie in the future")
        }
        DiscountsServiceError::StoreUnavailable(source) => {
            error!("inventory store unavailable: {source}");

            StatusError::service_unavailable()
        }
        DiscountsServiceError::Sql(source) => {
            error!("failed to change discount: {source}");

            StatusError::internal_server_error()
        }
    }
}
