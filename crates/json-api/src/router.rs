//! App Router

use salvo::Router;

use crate::{auth, healthcheck, observability, payments, webhooks};

/// Routes served by the relay. State injection is left to the caller.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("webhook").post(webhooks::receive::handler))
        .push(
            Router::with_path("api")
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("create-payment-intent")
                        .post(payments::create_intent::handler),
                ),
        )
}
