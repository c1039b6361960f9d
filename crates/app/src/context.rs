//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{
        AuthService, IdentityProviderClient, IdentityProviderConfig, IntrospectionAuthService,
    },
    database,
    domain::{
        orders::PgOrdersRepository,
        payments::{OrderPaymentsService, PaymentsService},
    },
    processor::{StripeClient, StripeConfig, WebhookVerifier},
    secrets::SecretString,
};

/// Start-up failures while wiring the application.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The order store could not be reached.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Everything needed to wire the application's collaborators.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string for the order store.
    pub database_url: String,

    /// Token introspection settings.
    pub identity: IdentityProviderConfig,

    /// Payment intent API settings.
    pub stripe: StripeConfig,

    /// Webhook endpoint signing secret.
    pub webhook_secret: SecretString,

    /// Maximum age of a webhook signature timestamp.
    pub webhook_tolerance: SignedDuration,

    /// Lowercase ISO currency code charged for every order.
    pub currency: String,
}

/// Process-wide collaborators, built once at start-up.
#[derive(Clone)]
pub struct AppContext {
    /// Bearer token verification.
    pub auth: Arc<dyn AuthService>,

    /// Payment initiation and webhook reconciliation.
    pub payments: Arc<dyn PaymentsService>,
}

impl AppContext {
    /// Connect to the order store and build every collaborator once.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let payments = OrderPaymentsService::new(
            Arc::new(PgOrdersRepository::new(pool)),
            Arc::new(StripeClient::new(config.stripe)),
            WebhookVerifier::new(config.webhook_secret, config.webhook_tolerance),
            config.currency,
        );

        Ok(Self {
            auth: Arc::new(IntrospectionAuthService::new(IdentityProviderClient::new(
                config.identity,
            ))),
            payments: Arc::new(payments),
        })
    }
}
