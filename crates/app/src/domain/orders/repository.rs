//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::domain::orders::{
    errors::OrdersRepositoryError,
    records::{OrderId, OrderRecord, OrderStatus, PaidTransition},
};

const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const MARK_PAYMENT_PENDING_SQL: &str = include_str!("sql/mark_payment_pending.sql");
const MARK_PAID_SQL: &str = include_str!("sql/mark_paid.sql");

/// PostgreSQL-backed order store.
#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    /// Repository over an established pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_stored(row.try_get("id")?),
            owner_uid: row.try_get("owner_uid")?,
            total: row.try_get("total")?,
            status: OrderStatus::from(row.try_get::<String, _>("status")?),
            payment_intent_id: row.try_get("payment_intent_id")?,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn get_order(&self, order: &OrderId) -> Result<OrderRecord, OrdersRepositoryError> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(OrdersRepositoryError::NotFound)
    }

    async fn mark_payment_pending(
        &self,
        order: &OrderId,
        expected_version: i64,
        payment_intent_id: &str,
    ) -> Result<OrderRecord, OrdersRepositoryError> {
        query_as::<Postgres, OrderRecord>(MARK_PAYMENT_PENDING_SQL)
            .bind(order.as_str())
            .bind(expected_version)
            .bind(payment_intent_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(OrdersRepositoryError::Conflict)
    }

    async fn mark_paid(
        &self,
        order: &OrderId,
        payment_intent_id: &str,
    ) -> Result<PaidTransition, OrdersRepositoryError> {
        let updated = query_as::<Postgres, OrderRecord>(MARK_PAID_SQL)
            .bind(order.as_str())
            .bind(payment_intent_id)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(record) = updated {
            return Ok(PaidTransition::Applied(record));
        }

        // Nothing matched: either the order is missing or it is already paid.
        self.get_order(order).await?;

        Ok(PaidTransition::AlreadyPaid)
    }
}

/// Order persistence operations.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Fetch an order by id.
    async fn get_order(&self, order: &OrderId) -> Result<OrderRecord, OrdersRepositoryError>;

    /// Move an order from `created` to `payment_pending`, recording the intent.
    ///
    /// Only succeeds while the stored version still equals `expected_version`;
    /// otherwise returns [`OrdersRepositoryError::Conflict`].
    async fn mark_payment_pending(
        &self,
        order: &OrderId,
        expected_version: i64,
        payment_intent_id: &str,
    ) -> Result<OrderRecord, OrdersRepositoryError>;

    /// Move an order to `paid`. Repeated calls leave the order untouched.
    async fn mark_paid(
        &self,
        order: &OrderId,
        payment_intent_id: &str,
    ) -> Result<PaidTransition, OrdersRepositoryError>;
}
