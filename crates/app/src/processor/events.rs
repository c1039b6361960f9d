//! Processor event envelopes.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Event type emitted when a payment intent completes successfully.
pub const PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";

/// Metadata key carrying the order back-reference.
pub const ORDER_ID_METADATA_KEY: &str = "orderId";

/// A verified processor event, reduced to what the relay acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorEvent {
    /// Processor-assigned event id.
    pub id: String,

    /// What the event reports.
    pub kind: EventKind,
}

/// Event types the relay distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A payment intent completed.
    PaymentSucceeded {
        /// The intent that succeeded.
        payment_intent_id: String,

        /// Order back-reference from the intent metadata.
        order_id: Option<String>,
    },

    /// Any event type the relay does not consume.
    Other(String),
}

impl ProcessorEvent {
    /// Parse a raw event body.
    ///
    /// # Errors
    ///
    /// Returns an error when the body is not a well-formed event envelope.
    pub fn parse(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let envelope: Envelope = serde_json::from_slice(payload)?;

        let kind = if envelope.event_type == PAYMENT_SUCCEEDED {
            let intent: PaymentIntentObject = serde_json::from_value(envelope.data.object)?;

            EventKind::PaymentSucceeded {
                order_id: intent
                    .metadata
                    .get(ORDER_ID_METADATA_KEY)
                    .filter(|order| !order.trim().is_empty())
                    .cloned(),
                payment_intent_id: intent.id,
            }
        } else {
            EventKind::Other(envelope.event_type)
        };

        Ok(Self {
            id: envelope.id,
            kind,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    object: Value,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentObject {
    id: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}
