//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::auth::{
    AuthServiceError, CallerIdentity, IdentityProviderClient, identity::Introspection,
};

/// Verifies bearer tokens by introspecting them at the identity provider.
#[derive(Debug, Clone)]
pub struct IntrospectionAuthService {
    provider: IdentityProviderClient,
}

impl IntrospectionAuthService {
    /// Build the service over an identity provider client.
    #[must_use]
    pub fn new(provider: IdentityProviderClient) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl AuthService for IntrospectionAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CallerIdentity, AuthServiceError> {
        if bearer_token.trim().is_empty() {
            return Err(AuthServiceError::InvalidToken);
        }

        let introspection = self.provider.introspect(bearer_token).await?;

        caller_from(introspection)
    }
}

fn caller_from(introspection: Introspection) -> Result<CallerIdentity, AuthServiceError> {
    if !introspection.active {
        debug!("bearer token is not active");

        return Err(AuthServiceError::InvalidToken);
    }

    let uid = introspection.subject.ok_or_else(|| {
        debug!("active token carries no subject");

        AuthServiceError::InvalidToken
    })?;

    Ok(CallerIdentity {
        uid,
        is_admin: introspection.is_admin,
    })
}

/// Bearer credential verification.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the identity of its holder.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<CallerIdentity, AuthServiceError>;
}
