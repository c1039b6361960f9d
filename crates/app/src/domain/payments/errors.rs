//! Payments service errors.

use thiserror::Error;

use crate::{
    domain::{
        orders::{OrdersRepositoryError, records::InvalidOrderId},
        payments::amount::InvalidAmount,
    },
    processor::{ProcessorError, SignatureError},
};

/// Reasons a payment initiation fails.
#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    /// The order id was missing or blank.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidOrderId),

    /// No order has the requested id.
    #[error("order not found")]
    NotFound,

    /// The caller neither owns the order nor is an admin.
    #[error("caller may not pay for this order")]
    Forbidden,

    /// The order total does not yield a positive amount.
    #[error(transparent)]
    InvalidAmount(#[from] InvalidAmount),

    /// The order is no longer awaiting payment initiation.
    #[error("payment already initiated for this order")]
    AlreadyInitiated,

    /// The processor call failed; nothing was written.
    #[error(transparent)]
    Processor(#[from] ProcessorError),

    /// The order store failed.
    #[error("order store error")]
    Storage(#[source] OrdersRepositoryError),
}

impl PaymentsServiceError {
    /// Metrics label for this failure.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::AlreadyInitiated => "already_initiated",
            Self::Processor(_) => "processor_error",
            Self::Storage(_) => "storage_error",
        }
    }
}

/// Reasons a webhook delivery is refused.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature header does not authenticate the body.
    #[error(transparent)]
    InvalidSignature(#[from] SignatureError),

    /// The body is not a well-formed event envelope.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl WebhookError {
    /// Metrics label for this rejection.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSignature(_) => "invalid_signature",
            Self::InvalidPayload(_) => "invalid_payload",
        }
    }
}
