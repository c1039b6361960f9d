//! Receive Processor Event Handler

use std::sync::Arc;

use payrelay_app::{
    domain::payments::WebhookError,
    processor::signature::{SIGNATURE_HEADER, SignatureError},
};
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, observability::observe_webhook, state::State};

/// Webhook Acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookReceivedResponse {
    /// Always `true` once the event has been verified
    pub received: bool,
}

/// Receive Processor Event Handler
///
/// Verifies the signature over the raw body before anything else. Rejections
/// are plain text so the processor dashboard shows the reason verbatim.
#[endpoint(
    tags("webhooks"),
    summary = "Receive Processor Event",
    responses(
        (status_code = StatusCode::OK, description = "Event acknowledged", body = WebhookReceivedResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Signature or payload rejected"),
    ),
)]
#[tracing::instrument(name = "webhooks.receive", skip_all)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let Some(signature) = signature else {
        reject(res, &WebhookError::InvalidSignature(SignatureError::MissingHeader));

        return;
    };

    let payload = match req.payload().await {
        Ok(payload) => payload.clone(),
        Err(source) => {
            warn!("failed to read webhook body: {source}");

            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Text::Plain(format!("Webhook Error: {source}")));

            return;
        }
    };

    match state
        .app
        .payments
        .handle_processor_event(&payload, &signature)
        .await
    {
        Ok(ack) => {
            observe_webhook(ack.outcome.as_str());

            res.render(Json(WebhookReceivedResponse { received: true }));
        }
        Err(error) => reject(res, &error),
    }
}

fn reject(res: &mut Response, error: &WebhookError) {
    warn!(reason = error.kind(), "webhook rejected: {error}");

    observe_webhook(error.kind());

    res.status_code(StatusCode::BAD_REQUEST);
    res.render(Text::Plain(format!("Webhook Error: {error}")));
}
