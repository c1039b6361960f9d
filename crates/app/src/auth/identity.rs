//! Identity provider client for OAuth 2.0 token introspection (RFC 7662).

use reqwest::Client;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::secrets::SecretString;

/// Default name of the boolean claim granting the admin capability.
pub const DEFAULT_ADMIN_CLAIM: &str = "admin";

/// Configuration for connecting to the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    /// Introspection endpoint, e.g. `"https://id.example.com/oauth2/introspect"`.
    pub introspection_url: String,

    /// Client id used to authenticate to the introspection endpoint.
    pub client_id: String,

    /// Client secret used to authenticate to the introspection endpoint.
    pub client_secret: SecretString,

    /// Boolean claim marking administrators.
    pub admin_claim: String,
}

/// Token introspection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Introspection {
    /// Whether the token is currently valid.
    pub active: bool,

    /// The `sub` claim, when present and non-empty.
    pub subject: Option<String>,

    /// Value of the configured admin claim.
    pub is_admin: bool,
}

/// HTTP client for the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityProviderClient {
    config: IdentityProviderConfig,
    http: Client,
}

impl IdentityProviderClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Introspect a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn introspect(&self, token: &str) -> Result<Introspection, IdentityProviderError> {
        let response = self
            .http
            .post(&self.config.introspection_url)
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose()),
            )
            .form(&[("token", token), ("token_type_hint", "access_token")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(IdentityProviderError::UnexpectedResponse(format!(
                "introspection request failed with status {status}: {text}"
            )));
        }

        let claims: Map<String, Value> = response.json().await?;

        Ok(read_introspection(&claims, &self.config.admin_claim))
    }
}

fn read_introspection(claims: &Map<String, Value>, admin_claim: &str) -> Introspection {
    Introspection {
        active: claims
            .get("active")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        subject: claims
            .get("sub")
            .and_then(Value::as_str)
            .filter(|sub| !sub.is_empty())
            .map(str::to_owned),
        is_admin: claims
            .get(admin_claim)
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

/// Errors that can occur when communicating with the identity provider.
#[derive(Debug, Error)]
pub enum IdentityProviderError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-2xx response or unexpected body.
    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}
