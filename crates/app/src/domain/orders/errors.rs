//! Orders repository errors.

use sqlx::Error;
use thiserror::Error;

/// Order store failures.
#[derive(Debug, Error)]
pub enum OrdersRepositoryError {
    /// No order has the requested id.
    #[error("order not found")]
    NotFound,

    /// A conditional update lost against a concurrent writer.
    #[error("order was modified concurrently")]
    Conflict,

    /// The database rejected or failed the query.
    #[error("storage error: {0}")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersRepositoryError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
