//! Depot helper extensions.

use std::any::Any;

use payrelay_app::auth::CallerIdentity;
use salvo::prelude::Depot;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_caller(&mut self, caller: CallerIdentity);

    fn caller_or_401(&self) -> Result<&CallerIdentity, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_caller(&mut self, caller: CallerIdentity) {
        self.inject(caller);
    }

    fn caller_or_401(&self) -> Result<&CallerIdentity, ApiError> {
        self.obtain::<CallerIdentity>()
            .map_err(|_ignored| ApiError::unauthorized("Unauthenticated"))
    }
}
