//! Payment Processor Config

use clap::Args;
use jiff::SignedDuration;
use payrelay_app::{
    processor::{STRIPE_API_BASE, StripeConfig},
    secrets::SecretString,
};

/// Stripe settings.
#[derive(Debug, Args)]
pub struct ProcessorConfig {
    /// Stripe secret API key
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: String,

    /// Webhook endpoint signing secret
    #[arg(long, env = "STRIPE_WEBHOOK_SECRET", hide_env_values = true)]
    pub stripe_webhook_secret: String,

    /// Stripe API base URL
    #[arg(long, env = "STRIPE_API_BASE", default_value = STRIPE_API_BASE)]
    pub stripe_api_base: String,

    /// ISO currency code charged for every order
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "idr")]
    pub payment_currency: String,

    /// Maximum age of a webhook signature timestamp, at least one second
    #[arg(
        long,
        env = "WEBHOOK_TOLERANCE_SECONDS",
        default_value_t = 300_i64,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub webhook_tolerance_seconds: i64,
}

impl ProcessorConfig {
    pub(crate) fn into_parts(self) -> (StripeConfig, SecretString, SignedDuration, String) {
        (
            StripeConfig {
                api_base: self.stripe_api_base,
                secret_key: SecretString::from(self.stripe_secret_key),
            },
            SecretString::from(self.stripe_webhook_secret),
            SignedDuration::from_secs(self.webhook_tolerance_seconds),
            self.payment_currency.to_ascii_lowercase(),
        )
    }
}
