//! Order Records

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;
use rust_decimal::Decimal;
use thiserror::Error;

/// Opaque order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

/// The order identifier was missing or blank.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("order id must be a non-empty identifier")]
pub struct InvalidOrderId;

impl OrderId {
    /// Parse a caller-supplied order identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOrderId`] when the value is empty or whitespace only.
    pub fn parse(value: &str) -> Result<Self, InvalidOrderId> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(InvalidOrderId);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap an identifier read back from storage.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// The identifier as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order status.
///
/// States written by systems other than this relay are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    /// Placed, no payment initiated yet.
    Created,

    /// A payment intent exists for the order.
    PaymentPending,

    /// The processor confirmed payment.
    Paid,

    /// Any status this relay does not write.
    Other(String),
}

impl OrderStatus {
    /// Stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::PaymentPending => "payment_pending",
            Self::Paid => "paid",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "created" => Self::Created,
            "payment_pending" => Self::PaymentPending,
            "paid" => Self::Paid,
            _ => Self::Other(value),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    /// Order identifier.
    pub id: OrderId,

    /// Identity that placed the order.
    pub owner_uid: String,

    /// Order total in major currency units.
    pub total: Decimal,

    /// Payment lifecycle state.
    pub status: OrderStatus,

    /// Processor payment intent, set once payment has been initiated.
    pub payment_intent_id: Option<String>,

    /// Generation counter, bumped on every mutation.
    pub version: i64,

    /// When the order was placed.
    pub created_at: Timestamp,

    /// Last mutation.
    pub updated_at: Timestamp,

    /// First transition to `paid`; kept across redeliveries.
    pub paid_at: Option<Timestamp>,
}

/// Outcome of marking an order paid.
#[derive(Debug, Clone, PartialEq)]
pub enum PaidTransition {
    /// The order moved to `paid` with this write.
    Applied(OrderRecord),

    /// The order was already `paid`; nothing changed.
    AlreadyPaid,
}
