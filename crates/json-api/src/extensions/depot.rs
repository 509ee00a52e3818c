//! Depot helper extensions.

use std::any::Any;

use lojal_app::auth::Identity;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    fn identity_or_401(&self) -> Result<&Identity, StatusError>;

    /// The caller's identity, if it is an administrator.
    fn administrator_or_403(&self) -> Result<&Identity, StatusError> {
        let identity = self.identity_or_401()?;

        if !identity.is_administrator() {
            return Err(StatusError::forbidden().brief("Administrator role required"));
        }

        Ok(identity)
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<&Identity, StatusError> {
        self.obtain::<Identity>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
