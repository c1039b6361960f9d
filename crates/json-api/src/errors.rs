//! HTTP error responses.

use salvo::{
    Scribe,
    http::StatusCode,
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use payrelay_app::domain::payments::PaymentsServiceError;

/// JSON error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// Human readable reason
    pub error: String,
}

/// An error rendered as `{"error": "..."}` with its status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorResponse {
            error: self.message,
        }));
    }
}

// Status codes are documented per endpoint through `responses(...)`.
impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, _operation: &mut Operation) {}
}

impl From<PaymentsServiceError> for ApiError {
    fn from(error: PaymentsServiceError) -> Self {
        match error {
            PaymentsServiceError::InvalidRequest(source) => Self::bad_request(source.to_string()),
            PaymentsServiceError::InvalidAmount(source) => Self::bad_request(source.to_string()),
            PaymentsServiceError::NotFound => Self::new(StatusCode::NOT_FOUND, "Order not found"),
            PaymentsServiceError::Forbidden => Self::new(StatusCode::FORBIDDEN, "Forbidden"),
            PaymentsServiceError::AlreadyInitiated => Self::new(
                StatusCode::CONFLICT,
                "Payment already initiated for this order",
            ),
            PaymentsServiceError::Processor(source) => {
                error!("payment processor error: {source}");

                Self::new(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
            PaymentsServiceError::Storage(source) => {
                error!("order store error: {source}");

                Self::new(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}
