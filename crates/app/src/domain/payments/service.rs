//! Payments service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, error, info, warn};

use crate::{
    auth::CallerIdentity,
    domain::{
        orders::{
            OrdersRepository, OrdersRepositoryError,
            records::{OrderId, OrderStatus, PaidTransition},
        },
        payments::{
            amount::to_minor_units,
            errors::{PaymentsServiceError, WebhookError},
            models::{PaymentInitiation, WebhookAck, WebhookOutcome},
        },
    },
    processor::{
        EventKind, IdempotencyKey, NewPaymentIntent, PaymentProcessor, ProcessorEvent,
        WebhookVerifier,
    },
};

/// Order payment workflow and webhook reconciler over an order store and a
/// payment processor.
#[derive(Clone)]
pub struct OrderPaymentsService {
    orders: Arc<dyn OrdersRepository>,
    processor: Arc<dyn PaymentProcessor>,
    verifier: WebhookVerifier,
    currency: String,
}

impl OrderPaymentsService {
    /// Build the service. `currency` is charged for every order.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersRepository>,
        processor: Arc<dyn PaymentProcessor>,
        verifier: WebhookVerifier,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            orders,
            processor,
            verifier,
            currency: currency.into(),
        }
    }

    async fn reconcile_payment(
        &self,
        event_id: &str,
        payment_intent_id: &str,
        order_id: Option<&str>,
    ) -> WebhookOutcome {
        let Some(order_id) = order_id.and_then(|order| OrderId::parse(order).ok()) else {
            error!(
                event_id,
                payment_intent_id, "payment succeeded without an order reference"
            );

            return WebhookOutcome::MissingOrderReference;
        };

        match self.orders.mark_paid(&order_id, payment_intent_id).await {
            Ok(PaidTransition::Applied(order)) => {
                info!(
                    event_id,
                    order_id = %order.id,
                    payment_intent_id,
                    "order marked paid"
                );

                WebhookOutcome::MarkedPaid { order_id }
            }
            Ok(PaidTransition::AlreadyPaid) => {
                debug!(event_id, order_id = %order_id, "order already paid");

                WebhookOutcome::AlreadyPaid { order_id }
            }
            Err(OrdersRepositoryError::NotFound) => {
                error!(
                    event_id,
                    order_id = %order_id,
                    payment_intent_id,
                    "payment succeeded for unknown order"
                );

                WebhookOutcome::OrderNotFound { order_id }
            }
            Err(source) => {
                error!(
                    event_id,
                    order_id = %order_id,
                    payment_intent_id,
                    error = %source,
                    "failed to mark order paid"
                );

                WebhookOutcome::StoreFailed { order_id }
            }
        }
    }
}

#[async_trait]
impl PaymentsService for OrderPaymentsService {
    #[tracing::instrument(
        name = "payments.service.initiate_payment",
        skip(self, caller),
        fields(caller_uid = %caller.uid, is_admin = caller.is_admin),
        err
    )]
    async fn initiate_payment(
        &self,
        caller: &CallerIdentity,
        order_id: &str,
    ) -> Result<PaymentInitiation, PaymentsServiceError> {
        let order_id = OrderId::parse(order_id)?;

        let order = self
            .orders
            .get_order(&order_id)
            .await
            .map_err(|source| match source {
                OrdersRepositoryError::NotFound => PaymentsServiceError::NotFound,
                other => PaymentsServiceError::Storage(other),
            })?;

        if !caller.may_act_for(&order.owner_uid) {
            warn!(
                order_id = %order_id,
                caller_uid = %caller.uid,
                "caller is neither owner nor admin"
            );

            return Err(PaymentsServiceError::Forbidden);
        }

        let amount = to_minor_units(order.total)?;

        if order.status != OrderStatus::Created {
            debug!(order_id = %order_id, status = %order.status, "payment already initiated");

            return Err(PaymentsServiceError::AlreadyInitiated);
        }

        let idempotency_key = IdempotencyKey::for_order_attempt(&order_id, order.version);

        let intent = self
            .processor
            .create_payment_intent(NewPaymentIntent {
                amount,
                currency: self.currency.clone(),
                order_id: order_id.clone(),
                idempotency_key,
            })
            .await
            .inspect_err(|source| {
                error!(order_id = %order_id, error = %source, "payment intent creation failed");
            })?;

        match self
            .orders
            .mark_payment_pending(&order_id, order.version, &intent.id)
            .await
        {
            Ok(_) => {}
            Err(OrdersRepositoryError::Conflict) => {
                debug!(order_id = %order_id, "lost conditional update to a concurrent initiation");

                return Err(PaymentsServiceError::AlreadyInitiated);
            }
            Err(source) => {
                error!(
                    order_id = %order_id,
                    payment_intent_id = %intent.id,
                    error = %source,
                    "payment intent created but order not marked payment_pending; no compensating action taken"
                );

                return Err(PaymentsServiceError::Storage(source));
            }
        }

        info!(
            order_id = %order_id,
            payment_intent_id = %intent.id,
            amount,
            "payment initiated"
        );

        Ok(PaymentInitiation {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
        })
    }

    #[tracing::instrument(
        name = "payments.service.handle_processor_event",
        skip(self, payload, signature),
        fields(payload_bytes = payload.len()),
        err
    )]
    async fn handle_processor_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookAck, WebhookError> {
        self.verifier.verify(payload, signature, Timestamp::now())?;

        let ProcessorEvent { id, kind } = ProcessorEvent::parse(payload)?;

        let outcome = match kind {
            EventKind::PaymentSucceeded {
                payment_intent_id,
                order_id,
            } => {
                self.reconcile_payment(&id, &payment_intent_id, order_id.as_deref())
                    .await
            }
            EventKind::Other(event_type) => {
                debug!(event_id = %id, event_type = %event_type, "ignoring processor event");

                WebhookOutcome::Ignored { event_type }
            }
        };

        Ok(WebhookAck {
            event_id: id,
            outcome,
        })
    }
}

/// Payment initiation and processor event reconciliation.
#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Create a payment intent for an order the caller may pay for and move
    /// the order to `payment_pending`.
    ///
    /// Authorization, amount and status checks all run before the processor
    /// is called. The order is only written if its version is unchanged since
    /// it was read; losing that race yields
    /// [`PaymentsServiceError::AlreadyInitiated`].
    ///
    /// Known gap: if the store write fails after the processor created the
    /// intent, the intent exists while the order stays `created`. No
    /// compensating action is taken and the failure is returned as
    /// [`PaymentsServiceError::Storage`]. A retry reuses the same idempotency
    /// key and receives the same intent.
    async fn initiate_payment(
        &self,
        caller: &CallerIdentity,
        order_id: &str,
    ) -> Result<PaymentInitiation, PaymentsServiceError>;

    /// Verify and reconcile a raw processor event.
    ///
    /// Once the signature verifies, the event is acknowledged whatever
    /// happens to the store write.
    async fn handle_processor_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookAck, WebhookError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::orders::{MockOrdersRepository, records::OrderRecord},
        processor::{
            MockPaymentProcessor, PaymentIntent, ProcessorError, SignatureError,
            signature::DEFAULT_TOLERANCE,
        },
        secrets::SecretString,
        test::fakes::{InMemoryOrders, RecordingProcessor},
    };

    use super::*;

    const WEBHOOK_SECRET: &str = "whsec_test";

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SecretString::new(WEBHOOK_SECRET), DEFAULT_TOLERANCE)
    }

    fn order(id: &str, owner: &str, total: Decimal) -> OrderRecord {
        OrderRecord {
            id: OrderId::from_stored(id.to_string()),
            owner_uid: owner.to_string(),
            total,
            status: OrderStatus::Created,
            payment_intent_id: None,
            version: 0,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            paid_at: None,
        }
    }

    fn service(orders: MockOrdersRepository, processor: MockPaymentProcessor) -> OrderPaymentsService {
        OrderPaymentsService::new(Arc::new(orders), Arc::new(processor), verifier(), "idr")
    }

    fn succeeded_event(order_id: &str) -> Vec<u8> {
        json!({
            "id": "evt_1",
            "type": "payment_intent.succeeded",
            "data": { "object": { "id": "pi_123", "metadata": { "orderId": order_id } } }
        })
        .to_string()
        .into_bytes()
    }

    fn signed(payload: &[u8]) -> Result<String, SignatureError> {
        verifier().sign(payload, Timestamp::now())
    }

    #[tokio::test]
    async fn test_owner_initiates_payment() -> TestResult {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders
            .expect_get_order()
            .once()
            .returning(|_| Ok(order("ord_1", "user_1", Decimal::new(15000, 2))));

        processor
            .expect_create_payment_intent()
            .once()
            .withf(|intent| {
                intent.amount == 15000
                    && intent.currency == "idr"
                    && intent.order_id.as_str() == "ord_1"
                    && intent.idempotency_key.as_str() == "order-ord_1-attempt-0"
            })
            .returning(|_| {
                Ok(PaymentIntent {
                    id: "pi_123".to_string(),
                    client_secret: "pi_123_secret_abc".to_string(),
                })
            });

        orders
            .expect_mark_payment_pending()
            .once()
            .withf(|_, version, intent| *version == 0 && intent == "pi_123")
            .returning(|order, _, intent| {
                let mut record = self::order(order.as_str(), "user_1", Decimal::new(15000, 2));
                record.status = OrderStatus::PaymentPending;
                record.payment_intent_id = Some(intent.to_string());
                record.version = 1;

                Ok(record)
            });

        let initiation = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_1"), "ord_1")
            .await?;

        assert_eq!(initiation.client_secret, "pi_123_secret_abc");
        assert_eq!(initiation.payment_intent_id, "pi_123");

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_initiates_payment_for_other_owner() -> TestResult {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders
            .expect_get_order()
            .returning(|_| Ok(order("ord_1", "user_1", Decimal::ONE)));

        processor.expect_create_payment_intent().returning(|_| {
            Ok(PaymentIntent {
                id: "pi_1".to_string(),
                client_secret: "secret".to_string(),
            })
        });

        orders
            .expect_mark_payment_pending()
            .returning(|_, _, _| Ok(order("ord_1", "user_1", Decimal::ONE)));

        let initiation = service(orders, processor)
            .initiate_payment(&CallerIdentity::admin("ops"), "ord_1")
            .await?;

        assert_eq!(initiation.client_secret, "secret");

        Ok(())
    }

    #[tokio::test]
    async fn test_stranger_is_forbidden_without_side_effects() {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders
            .expect_get_order()
            .once()
            .returning(|_| Ok(order("ord_1", "user_1", Decimal::ONE)));
        orders.expect_mark_payment_pending().never();
        orders.expect_mark_paid().never();
        processor.expect_create_payment_intent().never();

        let result = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_2"), "ord_1")
            .await;

        assert!(matches!(result, Err(PaymentsServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn test_blank_order_id_skips_lookup() {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders.expect_get_order().never();
        processor.expect_create_payment_intent().never();

        let result = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_1"), "   ")
            .await;

        assert!(matches!(result, Err(PaymentsServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders
            .expect_get_order()
            .returning(|_| Err(OrdersRepositoryError::NotFound));
        processor.expect_create_payment_intent().never();

        let result = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_1"), "ord_missing")
            .await;

        assert!(matches!(result, Err(PaymentsServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_non_positive_total_is_invalid_amount() {
        for total in [Decimal::ZERO, Decimal::new(-500, 2)] {
            let mut orders = MockOrdersRepository::new();
            let mut processor = MockPaymentProcessor::new();

            orders
                .expect_get_order()
                .returning(move |_| Ok(order("ord_1", "user_1", total)));
            orders.expect_mark_payment_pending().never();
            processor.expect_create_payment_intent().never();

            let result = service(orders, processor)
                .initiate_payment(&CallerIdentity::user("user_1"), "ord_1")
                .await;

            assert!(
                matches!(result, Err(PaymentsServiceError::InvalidAmount(_))),
                "total {total} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_order_past_created_is_already_initiated() {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders.expect_get_order().returning(|_| {
            let mut record = order("ord_1", "user_1", Decimal::ONE);
            record.status = OrderStatus::PaymentPending;
            record.payment_intent_id = Some("pi_1".to_string());

            Ok(record)
        });
        processor.expect_create_payment_intent().never();

        let result = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_1"), "ord_1")
            .await;

        assert!(matches!(result, Err(PaymentsServiceError::AlreadyInitiated)));
    }

    #[tokio::test]
    async fn test_processor_failure_skips_store_write() {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders
            .expect_get_order()
            .returning(|_| Ok(order("ord_1", "user_1", Decimal::ONE)));
        orders.expect_mark_payment_pending().never();
        processor.expect_create_payment_intent().returning(|_| {
            Err(ProcessorError::Rejected {
                status: 402,
                message: "card declined".to_string(),
            })
        });

        let result = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_1"), "ord_1")
            .await;

        assert!(matches!(result, Err(PaymentsServiceError::Processor(_))));
    }

    #[tokio::test]
    async fn test_store_failure_after_intent_is_storage_error() {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders
            .expect_get_order()
            .returning(|_| Ok(order("ord_1", "user_1", Decimal::ONE)));
        processor.expect_create_payment_intent().returning(|_| {
            Ok(PaymentIntent {
                id: "pi_1".to_string(),
                client_secret: "secret".to_string(),
            })
        });
        orders
            .expect_mark_payment_pending()
            .returning(|_, _, _| Err(OrdersRepositoryError::Sql(sqlx::Error::PoolTimedOut)));

        let result = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_1"), "ord_1")
            .await;

        assert!(matches!(result, Err(PaymentsServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn test_lost_conditional_write_is_already_initiated() {
        let mut orders = MockOrdersRepository::new();
        let mut processor = MockPaymentProcessor::new();

        orders
            .expect_get_order()
            .returning(|_| Ok(order("ord_1", "user_1", Decimal::ONE)));
        processor.expect_create_payment_intent().returning(|_| {
            Ok(PaymentIntent {
                id: "pi_1".to_string(),
                client_secret: "secret".to_string(),
            })
        });
        orders
            .expect_mark_payment_pending()
            .returning(|_, _, _| Err(OrdersRepositoryError::Conflict));

        let result = service(orders, processor)
            .initiate_payment(&CallerIdentity::user("user_1"), "ord_1")
            .await;

        assert!(matches!(result, Err(PaymentsServiceError::AlreadyInitiated)));
    }

    #[tokio::test]
    async fn test_concurrent_initiations_share_one_intent() -> TestResult {
        let orders = Arc::new(InMemoryOrders::with_orders([order(
            "ord_1",
            "user_1",
            Decimal::new(15000, 2),
        )]));
        let processor = Arc::new(RecordingProcessor::default());

        let service = OrderPaymentsService::new(orders.clone(), processor.clone(), verifier(), "idr");
        let caller = CallerIdentity::user("user_1");

        let (first, second) = tokio::join!(
            service.initiate_payment(&caller, "ord_1"),
            service.initiate_payment(&caller, "ord_1"),
        );

        let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
        let conflicted = [&first, &second]
            .iter()
            .filter(|r| matches!(r, Err(PaymentsServiceError::AlreadyInitiated)))
            .count();

        assert_eq!(succeeded, 1, "exactly one initiation should win");
        assert_eq!(conflicted, 1, "the other should see AlreadyInitiated");

        let keys = processor.idempotency_keys();

        assert_eq!(keys.len(), 2, "both attempts reached the processor");
        assert!(keys.iter().all(|key| key == "order-ord_1-attempt-0"));
        assert_eq!(processor.distinct_intents(), 1);

        let stored = orders.get_order(&OrderId::parse("ord_1")?).await?;

        assert_eq!(stored.status, OrderStatus::PaymentPending);
        assert_eq!(stored.version, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_initiation_persists_intent_reference() -> TestResult {
        let orders = Arc::new(InMemoryOrders::with_orders([order(
            "ord_1",
            "user_1",
            Decimal::new(15000, 2),
        )]));
        let processor = Arc::new(RecordingProcessor::default());

        let service = OrderPaymentsService::new(orders.clone(), processor.clone(), verifier(), "idr");

        let initiation = service
            .initiate_payment(&CallerIdentity::user("user_1"), "ord_1")
            .await?;

        let stored = orders.get_order(&OrderId::parse("ord_1")?).await?;

        assert_eq!(stored.status, OrderStatus::PaymentPending);
        assert_eq!(stored.payment_intent_id, Some(initiation.payment_intent_id));
        assert_eq!(processor.amounts(), vec![15000]);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_signature_is_rejected_without_store_write() {
        let mut orders = MockOrdersRepository::new();
        let processor = MockPaymentProcessor::new();

        orders.expect_mark_paid().never();

        let payload = succeeded_event("ord_1");

        let result = service(orders, processor)
            .handle_processor_event(&payload, "t=1,v1=deadbeef")
            .await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature(_))));
    }

    #[tokio::test]
    async fn test_signed_garbage_is_invalid_payload() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders.expect_mark_paid().never();

        let payload = b"not an event".to_vec();
        let header = signed(&payload)?;

        let result = service(orders, MockPaymentProcessor::new())
            .handle_processor_event(&payload, &header)
            .await;

        assert!(matches!(result, Err(WebhookError::InvalidPayload(_))));

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_succeeded_marks_order_paid() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders
            .expect_mark_paid()
            .once()
            .withf(|order, intent| order.as_str() == "X" && intent == "pi_123")
            .returning(|order, intent| {
                let mut record = self::order(order.as_str(), "user_1", Decimal::ONE);
                record.status = OrderStatus::Paid;
                record.payment_intent_id = Some(intent.to_string());
                record.paid_at = Some(Timestamp::UNIX_EPOCH);

                Ok(PaidTransition::Applied(record))
            });

        let payload = succeeded_event("X");
        let header = signed(&payload)?;

        let ack = service(orders, MockPaymentProcessor::new())
            .handle_processor_event(&payload, &header)
            .await?;

        assert_eq!(ack.event_id, "evt_1");
        assert_eq!(
            ack.outcome,
            WebhookOutcome::MarkedPaid {
                order_id: OrderId::parse("X")?
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_redelivery_reports_already_paid() -> TestResult {
        let orders = Arc::new(InMemoryOrders::with_orders([order("X", "user_1", Decimal::ONE)]));
        let service = OrderPaymentsService::new(
            orders.clone(),
            Arc::new(RecordingProcessor::default()),
            verifier(),
            "idr",
        );

        let payload = succeeded_event("X");
        let header = signed(&payload)?;

        let first = service.handle_processor_event(&payload, &header).await?;
        let paid = orders.get_order(&OrderId::parse("X")?).await?;

        let second = service.handle_processor_event(&payload, &header).await?;
        let after = orders.get_order(&OrderId::parse("X")?).await?;

        assert_eq!(first.outcome.as_str(), "marked_paid");
        assert_eq!(second.outcome.as_str(), "already_paid");
        assert_eq!(after, paid, "redelivery must not change the order");
        assert_eq!(after.payment_intent_id.as_deref(), Some("pi_123"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_is_still_acknowledged() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders
            .expect_mark_paid()
            .returning(|_, _| Err(OrdersRepositoryError::NotFound));

        let payload = succeeded_event("ghost");
        let header = signed(&payload)?;

        let ack = service(orders, MockPaymentProcessor::new())
            .handle_processor_event(&payload, &header)
            .await?;

        assert_eq!(ack.outcome.as_str(), "order_not_found");

        Ok(())
    }

    #[tokio::test]
    async fn test_store_failure_is_still_acknowledged() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders
            .expect_mark_paid()
            .once()
            .returning(|_, _| Err(OrdersRepositoryError::Sql(sqlx::Error::PoolTimedOut)));

        let payload = succeeded_event("X");
        let header = signed(&payload)?;

        let ack = service(orders, MockPaymentProcessor::new())
            .handle_processor_event(&payload, &header)
            .await?;

        assert_eq!(ack.outcome.as_str(), "store_failed");

        Ok(())
    }

    #[tokio::test]
    async fn test_event_without_order_reference_is_acknowledged() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders.expect_mark_paid().never();

        let payload = json!({
            "id": "evt_2",
            "type": "payment_intent.succeeded",
            "data": { "object": { "id": "pi_9" } }
        })
        .to_string()
        .into_bytes();
        let header = signed(&payload)?;

        let ack = service(orders, MockPaymentProcessor::new())
            .handle_processor_event(&payload, &header)
            .await?;

        assert_eq!(ack.outcome, WebhookOutcome::MissingOrderReference);

        Ok(())
    }

    #[tokio::test]
    async fn test_other_event_types_are_ignored() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders.expect_mark_paid().never();

        let payload = json!({
            "id": "evt_3",
            "type": "payment_intent.payment_failed",
            "data": { "object": { "id": "pi_9", "metadata": { "orderId": "X" } } }
        })
        .to_string()
        .into_bytes();
        let header = signed(&payload)?;

        let ack = service(orders, MockPaymentProcessor::new())
            .handle_processor_event(&payload, &header)
            .await?;

        assert_eq!(
            ack.outcome,
            WebhookOutcome::Ignored {
                event_type: "payment_intent.payment_failed".to_string()
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_signature_is_rejected() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders.expect_mark_paid().never();

        let payload = succeeded_event("X");
        let header = verifier().sign(&payload, Timestamp::now() - SignedDuration::from_hours(1))?;

        let result = service(orders, MockPaymentProcessor::new())
            .handle_processor_event(&payload, &header)
            .await;

        assert!(matches!(
            result,
            Err(WebhookError::InvalidSignature(
                SignatureError::TimestampOutsideTolerance
            ))
        ));

        Ok(())
    }
}
