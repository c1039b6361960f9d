//! Create Payment Intent Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{errors::ApiError, extensions::*, observability::observe_initiation, state::State};

/// Create Payment Intent Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentIntentRequest {
    /// Order to pay for
    #[serde(default)]
    pub order_id: Option<String>,
}

/// Create Payment Intent Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePaymentIntentResponse {
    /// Secret for confirming the payment client-side
    pub client_secret: String,
}

/// Create Payment Intent Handler
#[endpoint(
    tags("payments"),
    summary = "Create Payment Intent",
    request_body = CreatePaymentIntentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment intent created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order id or amount"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid bearer token"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is neither owner nor admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment already initiated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "payments.create_intent",
    skip(req, depot),
    fields(
        order_id = tracing::field::Empty,
        caller_uid = tracing::field::Empty,
        payment_intent_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let order_id = requested_order_id(req).await;

    let span = tracing::Span::current();

    span.record("order_id", order_id.as_str());
    span.record("caller_uid", caller.uid.as_str());

    let result = state
        .app
        .payments
        .initiate_payment(caller, &order_id)
        .await;

    observe_initiation(result.as_ref().map_or_else(|error| error.kind(), |_| "created"));

    let initiation = result?;

    span.record("payment_intent_id", initiation.payment_intent_id.as_str());

    Ok(Json(CreatePaymentIntentResponse {
        client_secret: initiation.client_secret,
    }))
}

/// Order id from the JSON body. A body that is not a JSON object with a
/// string `orderId` counts as carrying none.
async fn requested_order_id(req: &mut Request) -> String {
    match req.parse_json::<CreatePaymentIntentRequest>().await {
        Ok(body) => body.order_id.unwrap_or_default(),
        Err(source) => {
            debug!("unreadable create-payment-intent body: {source}");

            String::new()
        }
    }
}
