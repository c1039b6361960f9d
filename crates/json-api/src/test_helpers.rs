//! Test helpers.

use std::sync::Arc;

use payrelay_app::{
    auth::{CallerIdentity, MockAuthService},
    context::AppContext,
    domain::payments::MockPaymentsService,
};
use salvo::{affix_state::inject, prelude::*};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CALLER_UID: &str = "user_1";

#[salvo::handler]
pub(crate) async fn inject_caller(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_caller(CallerIdentity::user(TEST_CALLER_UID));
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_payments_mock() -> MockPaymentsService {
    let mut payments = MockPaymentsService::new();

    payments.expect_initiate_payment().never();
    payments.expect_handle_processor_event().never();

    payments
}

pub(crate) fn state_with(auth: MockAuthService, payments: MockPaymentsService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        payments: Arc::new(payments),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(auth, strict_payments_mock())
}

pub(crate) fn payments_service(payments: MockPaymentsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(strict_auth_mock(), payments)))
            .hoop(inject_caller)
            .push(route),
    )
}

pub(crate) fn webhook_service(payments: MockPaymentsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(strict_auth_mock(), payments)))
            .push(route),
    )
}
