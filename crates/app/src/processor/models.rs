//! Payment processor data models.

use std::fmt::{self, Display, Formatter};

use crate::domain::orders::records::OrderId;

/// Deterministic idempotency key for one payment attempt on one order.
///
/// The attempt is identified by the order generation read before the
/// processor call, so retries and concurrent duplicates of the same attempt
/// map to the same key while a later attempt gets a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Key for the attempt made against `order` at `generation`.
    #[must_use]
    pub fn for_order_attempt(order: &OrderId, generation: i64) -> Self {
        Self(format!("order-{order}-attempt-{generation}"))
    }

    /// The header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IdempotencyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payment intent creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentIntent {
    /// Amount in minor currency units.
    pub amount: i64,

    /// Lowercase ISO currency code.
    pub currency: String,

    /// Order the intent pays for, echoed back in event metadata.
    pub order_id: OrderId,

    /// Sent as the `Idempotency-Key` header.
    pub idempotency_key: IdempotencyKey,
}

/// Payment intent as returned by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Processor intent id (`pi_...`).
    pub id: String,

    /// Secret handed to the client-side confirmation step.
    pub client_secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idempotency_key_is_deterministic_per_attempt() -> Result<(), Box<dyn std::error::Error>> {
        let order = OrderId::parse("ord_1")?;

        let first = IdempotencyKey::for_order_attempt(&order, 3);
        let second = IdempotencyKey::for_order_attempt(&order, 3);
        let next = IdempotencyKey::for_order_attempt(&order, 4);

        assert_eq!(first, second, "same attempt must reuse the key");
        assert_ne!(first, next, "a new generation must get a new key");
        assert_eq!(first.as_str(), "order-ord_1-attempt-3");

        Ok(())
    }
}
