//! Stripe REST client for payment intent creation.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    processor::{NewPaymentIntent, PaymentIntent, ProcessorError},
    secrets::SecretString,
};

/// Default Stripe API base URL.
pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Configuration for connecting to Stripe.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// API base URL, e.g. `"https://api.stripe.com"`.
    pub api_base: String,

    /// Secret API key (`sk_...`).
    pub secret_key: SecretString,
}

/// HTTP client for Stripe payment intents.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: StripeConfig,
    http: Client,
}

impl StripeClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn payment_intents_url(&self) -> String {
        format!(
            "{}/v1/payment_intents",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_payment_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, ProcessorError> {
        let response = self
            .http
            .post(self.payment_intents_url())
            .bearer_auth(self.config.secret_key.expose())
            .header(IDEMPOTENCY_KEY_HEADER, intent.idempotency_key.as_str())
            .form(&intent_form(&intent))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();

            return Err(rejection(status, &text));
        }

        let parsed: PaymentIntentResponse = response.json().await?;

        let client_secret = parsed.client_secret.ok_or_else(|| {
            ProcessorError::UnexpectedResponse(format!(
                "payment intent {} has no client secret",
                parsed.id
            ))
        })?;

        Ok(PaymentIntent {
            id: parsed.id,
            client_secret,
        })
    }
}

/// Payment intent creation against an external processor.
#[automock]
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Create a payment intent. Requests repeating an idempotency key return
    /// the intent created by the first request.
    async fn create_payment_intent(
        &self,
        intent: NewPaymentIntent,
    ) -> Result<PaymentIntent, ProcessorError>;
}

fn intent_form(intent: &NewPaymentIntent) -> Vec<(&'static str, String)> {
    vec![
        ("amount", intent.amount.to_string()),
        ("currency", intent.currency.clone()),
        ("metadata[orderId]", intent.order_id.to_string()),
    ]
}

fn rejection(status: u16, body: &str) -> ProcessorError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|response| response.error.message)
        .unwrap_or_else(|| format!("payment processor returned status {status}: {body}"));

    ProcessorError::Rejected { status, message }
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::orders::records::OrderId, processor::IdempotencyKey};

    use super::*;

    #[test]
    fn test_intent_form_carries_amount_currency_and_order() -> TestResult {
        let order_id = OrderId::parse("ord_1")?;

        let form = intent_form(&NewPaymentIntent {
            amount: 15000,
            currency: "idr".to_string(),
            idempotency_key: IdempotencyKey::for_order_attempt(&order_id, 0),
            order_id,
        });

        assert_eq!(
            form,
            vec![
                ("amount", "15000".to_string()),
                ("currency", "idr".to_string()),
                ("metadata[orderId]", "ord_1".to_string()),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_rejection_surfaces_processor_message() {
        let body = r#"{"error":{"type":"invalid_request_error","message":"Amount must be at least Rp 1.00"}}"#;

        let error = rejection(400, body);

        assert!(matches!(error, ProcessorError::Rejected { status: 400, .. }));
        assert_eq!(error.to_string(), "Amount must be at least Rp 1.00");
    }

    #[test]
    fn test_rejection_falls_back_to_raw_body() {
        let error = rejection(502, "Bad Gateway");

        assert_eq!(
            error.to_string(),
            "payment processor returned status 502: Bad Gateway"
        );
    }

    #[test]
    fn test_payments_url_ignores_trailing_slash() {
        let client = StripeClient::new(StripeConfig {
            api_base: "http://localhost:12111/".to_string(),
            secret_key: SecretString::new("sk_test"),
        });

        assert_eq!(
            client.payment_intents_url(),
            "http://localhost:12111/v1/payment_intents"
        );
    }
}
