//! Auth service errors.

use thiserror::Error;

use crate::auth::IdentityProviderError;

/// Reasons a bearer credential could not be resolved to a caller.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The bearer credential is unknown, expired, or revoked.
    #[error("invalid bearer token")]
    InvalidToken,

    /// The identity provider could not be asked.
    #[error("identity provider error")]
    Provider(#[from] IdentityProviderError),
}
