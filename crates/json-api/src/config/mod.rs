//! Server configuration module

use clap::Parser;
use payrelay_app::context::AppConfig;

use crate::config::{
    db::DatabaseConfig, identity::IdentityConfig, observability::LoggingConfig,
    processor::ProcessorConfig, server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod identity;
pub(crate) mod observability;
pub(crate) mod processor;
pub(crate) mod server;

/// Payrelay JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "payrelay-json", about = "Payrelay JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Order store settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityConfig,

    /// Payment processor settings.
    #[command(flatten)]
    pub processor: ProcessorConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Application wiring settings, consuming the secrets held here.
    pub fn into_app_config(self) -> AppConfig {
        let (stripe, webhook_secret, webhook_tolerance, currency) = self.processor.into_parts();

        AppConfig {
            database_url: self.database.database_url,
            identity: self.identity.into(),
            stripe,
            webhook_secret,
            webhook_tolerance,
            currency,
        }
    }
}
