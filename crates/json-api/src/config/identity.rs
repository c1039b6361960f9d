//! Identity Provider Config

use clap::Args;
use payrelay_app::{
    auth::{IdentityProviderConfig, identity::DEFAULT_ADMIN_CLAIM},
    secrets::SecretString,
};

/// Token introspection settings.
#[derive(Debug, Args)]
pub struct IdentityConfig {
    /// OAuth 2.0 token introspection endpoint
    #[arg(long, env = "IDENTITY_INTROSPECTION_URL")]
    pub identity_introspection_url: String,

    /// Client id used against the introspection endpoint
    #[arg(long, env = "IDENTITY_CLIENT_ID")]
    pub identity_client_id: String,

    /// Client secret used against the introspection endpoint
    #[arg(long, env = "IDENTITY_CLIENT_SECRET", hide_env_values = true)]
    pub identity_client_secret: String,

    /// Boolean token claim granting admin access to every order
    #[arg(long, env = "IDENTITY_ADMIN_CLAIM", default_value = DEFAULT_ADMIN_CLAIM)]
    pub identity_admin_claim: String,
}

impl From<IdentityConfig> for IdentityProviderConfig {
    fn from(config: IdentityConfig) -> Self {
        Self {
            introspection_url: config.identity_introspection_url,
            client_id: config.identity_client_id,
            client_secret: SecretString::from(config.identity_client_secret),
            admin_claim: config.identity_admin_claim,
        }
    }
}
