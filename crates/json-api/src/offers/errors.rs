//! Offer Errors

use salvo::http::StatusError;
use tracing::error;

use lojal_app::domain::{catalog::CatalogServiceError, offers::OffersServiceError};

pub(crate) fn offers_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::UnknownOffer => StatusError::not_found().brief("Offer not found"),
        OffersServiceError::UnknownOrganization => {
            StatusError::bad_request().brief("Unknown organization")
        }
        OffersServiceError::NotAShop => {
            StatusError::bad_request().brief("Organization is not a shop")
        }
        OffersServiceError::DuplicateCode => {
            StatusError::conflict().brief("Code already exists for this offer")
        }
        OffersServiceError::InvalidData | OffersServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid offer payload")
        }
        OffersServiceError::StoreUnavailable(source) => {
            error!("inventory store unavailable: {source}");

            StatusError::service_unavailable()
        }
        OffersServiceError::Sql(source) => {
            error!("failed to write offer: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn catalog_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::UnknownOrganization => {
            StatusError::not_found().brief("Organization not found")
        }
        CatalogServiceError::NotAShop => {
            StatusError::bad_request().brief("Organization is not a shop")
        }
        CatalogServiceError::UnknownOffer => StatusError::not_found().brief("Offer not found"),
        CatalogServiceError::InvalidDiscount(source) => {
            error!("stored discount is malformed: {source}");

            StatusError::internal_server_error()
        }
        CatalogServiceError::Pricing(source) => {
            error!("failed to price offer: {source}");

            StatusError::internal_server_error()
        }
        CatalogServiceError::StoreUnavailable(source) => {
            error!("inventory store unavailable: {source}");

            StatusError::service_unavailable()
        }
        CatalogServiceError::Sql(source) => {
            error!("failed to read catalog: {source}");

            StatusError::internal_server_error()
        }
    }
}
