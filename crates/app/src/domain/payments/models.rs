//! Payments Models

use crate::domain::orders::records::OrderId;

/// Result of a successful payment initiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInitiation {
    /// Intent now recorded on the order.
    pub payment_intent_id: String,

    /// Secret the client uses to confirm the payment with the processor.
    pub client_secret: String,
}

/// Acknowledgement of a verified processor event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookAck {
    /// Processor-assigned event id.
    pub event_id: String,

    /// What reconciliation did.
    pub outcome: WebhookOutcome,
}

/// What reconciling a verified event did to the order store.
///
/// Every variant is acknowledged to the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The order moved to `paid`.
    MarkedPaid {
        /// Order that was paid.
        order_id: OrderId,
    },

    /// Redelivery for an order that is already paid.
    AlreadyPaid {
        /// Order that was already paid.
        order_id: OrderId,
    },

    /// Event type the relay does not consume.
    Ignored {
        /// Processor event type.
        event_type: String,
    },

    /// Payment event without an order back-reference.
    MissingOrderReference,

    /// The referenced order does not exist.
    OrderNotFound {
        /// Referenced order id.
        order_id: OrderId,
    },

    /// The store write failed; logged and not retried.
    StoreFailed {
        /// Order that could not be written.
        order_id: OrderId,
    },
}

impl WebhookOutcome {
    /// Metrics label for this outcome.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MarkedPaid { .. } => "marked_paid",
            Self::AlreadyPaid { .. } => "already_paid",
            Self::Ignored { .. } => "ignored",
            Self::MissingOrderReference => "missing_order_reference",
            Self::OrderNotFound { .. } => "order_not_found",
            Self::StoreFailed { .. } => "store_failed",
        }
    }
}
