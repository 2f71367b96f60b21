use std::sync::Arc;

use uuid::Uuid;

use crate::domain::payment::{PaymentConfirmation, PaymentRequest};
use crate::event_sourcing::{Aggregate, EventEnvelope, EventLog, EventLogError};
use crate::metrics::Metrics;

use super::aggregate::Order;
use super::builder::OrderRecordBuilder;
use super::commands::OrderCommand;
use super::draft::OrderDraft;
use super::errors::OrderError;
use super::events::{OrderEvent, OrderPlaced};
use super::pricing::{PriceQuote, PricingRules};
use super::validation::{ValidationErrors, ValidationRules};
use super::value_objects::OrderId;

// ============================================================================
// Order Book - the in-memory order list and its command handler
// ============================================================================
//
// Orchestrates: Draft → Validate → Price → Confirm payment → Build → Record
//               Command → Aggregate → Events → Event log
//
// Orders are kept newest first. Nothing is persisted.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderBookError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Rule(#[from] OrderError),

    #[error(transparent)]
    Log(#[from] EventLogError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Placed(Order),
    /// The payer said no; the draft is left as it was.
    Declined { quote: PriceQuote },
}

pub struct OrderBook {
    orders: Vec<Order>,
    pricing: PricingRules,
    validation: ValidationRules,
    builder: OrderRecordBuilder,
    events: EventLog<OrderEvent>,
    metrics: Option<Arc<Metrics>>,
}

impl OrderBook {
    pub fn new(pricing: PricingRules, validation: ValidationRules, builder: OrderRecordBuilder) -> Self {
        Self {
            orders: Vec::new(),
            pricing,
            validation,
            builder,
            events: EventLog::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Seed with existing orders (already newest first). Each one gets its
    /// `Placed` event so later commands see a consistent history.
    pub fn with_orders(mut self, orders: Vec<Order>) -> Result<Self, OrderBookError> {
        for order in orders.into_iter().rev() {
            self.place(order, Uuid::new_v4())?;
        }
        Ok(self)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == id)
    }

    pub fn pricing(&self) -> &PricingRules {
        &self.pricing
    }

    pub fn history(&self, id: &OrderId) -> &[EventEnvelope<OrderEvent>] {
        self.events.load_events(id.as_str())
    }

    /// Live quote for the order summary box; no validation involved.
    pub fn quote(&self, draft: &OrderDraft) -> PriceQuote {
        self.pricing.quote(draft.priority, &draft.items)
    }

    /// Submit the creation form.
    ///
    /// Invalid drafts come back as `OrderBookError::Invalid` and produce no
    /// order. A declined payment is not an error. On success the new order
    /// goes to the front of the list and the draft is reset.
    pub fn submit(
        &mut self,
        draft: &mut OrderDraft,
        payment: &dyn PaymentConfirmation,
    ) -> Result<SubmissionOutcome, OrderBookError> {
        if let Err(errors) = self.validation.validate(draft) {
            if let Some(first) = errors.first() {
                tracing::warn!(
                    problems = errors.len(),
                    first = %first,
                    "Order draft rejected"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_order_rejected(first.code());
                }
            }
            return Err(errors.into());
        }

        let quote = self.quote(draft);
        tracing::debug!(
            priority = %quote.priority,
            base_fee = quote.base_fee,
            surcharge = quote.priority_surcharge,
            weight_charge = quote.weight_charge,
            handling_charge = quote.handling_charge,
            total = quote.total,
            "Priced order draft"
        );

        let request = PaymentRequest {
            reference: None,
            payer: draft.customer_name.trim().to_string(),
            amount: quote.total,
            description: format!("Order total ({} delivery)", quote.priority),
        };

        if !payment.confirm(&request) {
            tracing::info!(total = quote.total, "Payment declined, order not created");
            if let Some(metrics) = &self.metrics {
                metrics.record_payment_declined("order");
            }
            return Ok(SubmissionOutcome::Declined { quote });
        }

        let order = self.builder.build(draft, quote.total);
        let order = self.place(order, Uuid::new_v4())?;

        if let Some(metrics) = &self.metrics {
            metrics.record_order_placed(order.estimated_value);
        }
        tracing::info!(
            order_id = %order.id(),
            destination = %order.destination,
            value = order.estimated_value,
            items = order.items.len(),
            "✅ Order placed"
        );

        draft.reset();
        Ok(SubmissionOutcome::Placed(order))
    }

    /// Apply a lifecycle command to a stored order.
    pub fn handle(&mut self, id: &OrderId, command: OrderCommand) -> Result<&Order, OrderBookError> {
        let index = self
            .orders
            .iter()
            .position(|order| order.id() == id)
            .ok_or_else(|| OrderError::NotFound(id.clone()))?;

        let issued = command.at(self.builder.now());
        let domain_events = self.orders[index].handle_command(&issued)?;
        if domain_events.is_empty() {
            return Ok(&self.orders[index]);
        }

        // Work on a copy so a failure leaves the stored order untouched
        let mut updated = self.orders[index].clone();
        let expected_version = updated.version();
        for event in &domain_events {
            updated.apply_event(event)?;
        }

        self.record(id, expected_version, domain_events, Uuid::new_v4())?;

        tracing::info!(
            order_id = %id,
            status = %updated.status,
            version = updated.version(),
            "Order updated"
        );

        self.orders[index] = updated;
        Ok(&self.orders[index])
    }

    /// Rebuild an order purely from its recorded events.
    pub fn replay(&self, id: &OrderId) -> anyhow::Result<Order> {
        self.events.load_aggregate::<Order>(id.as_str())
    }

    fn place(&mut self, order: Order, correlation_id: Uuid) -> Result<Order, OrderBookError> {
        let placed = OrderEvent::Placed(OrderPlaced { order });
        let order = Order::apply_first_event(&placed)?;

        self.record(order.id(), 0, vec![placed], correlation_id)?;
        self.orders.insert(0, order.clone());
        Ok(order)
    }

    fn record(
        &mut self,
        id: &OrderId,
        expected_version: u64,
        domain_events: Vec<OrderEvent>,
        correlation_id: Uuid,
    ) -> Result<u64, EventLogError> {
        let envelopes = domain_events
            .into_iter()
            .zip(expected_version + 1..)
            .map(|(event, seq)| EventEnvelope::new(id.as_str(), seq, event, correlation_id))
            .collect();

        self.events.append_events(id.as_str(), expected_version, envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::builder::FixedClock;
    use crate::domain::order::samples::sample_orders;
    use crate::domain::order::validation::{RequiredFields, Violation};
    use crate::domain::order::value_objects::{OrderItem, OrderStatus, Priority};
    use crate::domain::payment::{AlwaysDecline, AutoApprove};
    use chrono::{TimeZone, Utc};

    fn book() -> OrderBook {
        let clock = FixedClock(Utc.timestamp_millis_opt(1735529825123).unwrap());
        OrderBook::new(
            PricingRules::default(),
            ValidationRules::default(),
            OrderRecordBuilder::new(Arc::new(clock)),
        )
    }

    fn valid_draft() -> OrderDraft {
        let mut draft = OrderDraft {
            customer_name: "John Doe".into(),
            customer_phone: "+94 77 123 4567".into(),
            customer_email: "john@example.com".into(),
            pickup_address: "123 Main Street, Colombo 03".into(),
            delivery_address: "456 Galle Road, Mount Lavinia".into(),
            beneficiary_name: "Jane Doe".into(),
            delivery_phone: "+94 71 765 4321".into(),
            priority: Priority::Express,
            ..OrderDraft::default()
        };
        draft.add_item(OrderItem::new("Electronics Package", 1, 2.5)).unwrap();
        draft.add_item(OrderItem::new("Documents", 1, 0.2)).unwrap();
        draft
    }

    #[test]
    fn test_submit_places_order_and_resets_draft() {
        let mut book = book();
        let mut draft = valid_draft();

        let outcome = book.submit(&mut draft, &AutoApprove).unwrap();
        let SubmissionOutcome::Placed(order) = outcome else {
            panic!("expected a placed order");
        };

        assert_eq!(order.id().as_str(), "ORD-1735529825123");
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.destination, "456 Galle Road");
        assert!((order.estimated_value - 252.0).abs() < 1e-9);
        assert_eq!(book.orders().len(), 1);
        assert!(draft.is_empty());
        assert_eq!(book.history(order.id()).len(), 1);
    }

    #[test]
    fn test_invalid_draft_creates_no_order() {
        let mut book = book();
        let mut draft = valid_draft();
        draft.delivery_phone = "  ".into();
        let before = draft.clone();

        let err = book.submit(&mut draft, &AutoApprove).unwrap_err();
        let OrderBookError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };

        assert_eq!(errors.missing_fields(), vec!["Delivery Phone"]);
        assert!(book.orders().is_empty());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_zero_items_rejected() {
        let mut book = book();
        let mut draft = valid_draft();
        draft.items.clear();

        let err = book.submit(&mut draft, &AutoApprove).unwrap_err();
        assert!(matches!(err, OrderBookError::Invalid(ref e) if e.first() == Some(&Violation::NoItems)));
        assert!(book.orders().is_empty());
    }

    #[test]
    fn test_declined_payment_keeps_draft() {
        let mut book = book();
        let mut draft = valid_draft();
        let before = draft.clone();

        let outcome = book.submit(&mut draft, &AlwaysDecline).unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Declined { ref quote } if quote.total > 0.0));
        assert!(book.orders().is_empty());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_payment_port_receives_quote_total() {
        let mut book = book();
        let mut draft = valid_draft();
        let expected = book.quote(&draft).total;

        let port = |req: &PaymentRequest| {
            assert_eq!(req.amount, expected);
            assert_eq!(req.payer, "John Doe");
            true
        };

        assert!(matches!(book.submit(&mut draft, &port).unwrap(), SubmissionOutcome::Placed(_)));
    }

    #[test]
    fn test_newest_order_first_and_unique_ids() {
        let mut book = book();

        for _ in 0..3 {
            let mut draft = valid_draft();
            book.submit(&mut draft, &AutoApprove).unwrap();
        }

        let ids: Vec<_> = book.orders().iter().map(|o| o.id().as_str().to_string()).collect();
        assert_eq!(ids, vec!["ORD-1735529825125", "ORD-1735529825124", "ORD-1735529825123"]);
    }

    #[test]
    fn test_minimal_rules() {
        let mut book = OrderBook::new(
            PricingRules::default(),
            ValidationRules::new(RequiredFields::Minimal),
            OrderRecordBuilder::default(),
        );
        let mut draft = OrderDraft {
            customer_name: "Fashion Hub".into(),
            delivery_address: "Kandy".into(),
            ..OrderDraft::default()
        };
        draft.add_item(OrderItem::new("Clothing", 5, 1.0)).unwrap();

        assert!(matches!(book.submit(&mut draft, &AutoApprove).unwrap(), SubmissionOutcome::Placed(_)));
    }

    #[test]
    fn test_seeded_orders_keep_their_order() {
        let book = book().with_orders(sample_orders()).unwrap();

        let ids: Vec<_> = book.orders().iter().map(|o| o.id().as_str()).collect();
        assert_eq!(ids, vec!["ORD-2024-001", "ORD-2024-002", "ORD-2024-003"]);
    }

    #[test]
    fn test_handle_lifecycle_and_replay() {
        let mut book = book().with_orders(sample_orders()).unwrap();
        let id = OrderId::new("ORD-2024-002");

        book.handle(&id, OrderCommand::Dispatch).unwrap();
        let order = book.handle(&id, OrderCommand::ReportDelay { reason: None }).unwrap();
        assert_eq!(order.status, OrderStatus::Delayed);
        assert_eq!(order.version(), 3);

        let replayed = book.replay(&id).unwrap();
        assert_eq!(&replayed, book.get(&id).unwrap());
        assert_eq!(book.history(&id).len(), 3);
    }

    #[test]
    fn test_lifecycle_timestamps_come_from_builder_clock() {
        use crate::domain::order::events::OrderDispatched;

        let mut book = book().with_orders(sample_orders()).unwrap();
        let id = OrderId::new("ORD-2024-002");
        book.handle(&id, OrderCommand::Dispatch).unwrap();

        let expected = Utc.timestamp_millis_opt(1735529825123).unwrap();
        let last = &book.history(&id)[1];
        assert!(matches!(
            &last.event_data,
            OrderEvent::Dispatched(OrderDispatched { dispatched_at }) if *dispatched_at == expected
        ));
    }

    #[test]
    fn test_rejected_command_leaves_order_untouched() {
        let mut book = book().with_orders(sample_orders()).unwrap();
        let id = OrderId::new("ORD-2024-003"); // Delivered

        let err = book.handle(&id, OrderCommand::Cancel { reason: None }).unwrap_err();
        assert!(matches!(err, OrderBookError::Rule(OrderError::InvalidStatusTransition { .. })));
        assert_eq!(book.get(&id).unwrap().status, OrderStatus::Delivered);
        assert_eq!(book.history(&id).len(), 1);
    }

    #[test]
    fn test_handle_unknown_order() {
        let mut book = book();
        let id = OrderId::new("ORD-404");

        let err = book.handle(&id, OrderCommand::Dispatch).unwrap_err();
        assert!(matches!(err, OrderBookError::Rule(OrderError::NotFound(_))));
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Arc::new(Metrics::new().unwrap());
        let mut book = book().with_metrics(metrics.clone());

        let mut empty = OrderDraft::new();
        let _ = book.submit(&mut empty, &AutoApprove);
        let _ = book.submit(&mut valid_draft(), &AlwaysDecline);
        book.submit(&mut valid_draft(), &AutoApprove).unwrap();

        assert_eq!(metrics.orders_submitted.get(), 1);
        assert_eq!(metrics.orders_rejected.with_label_values(&["missing_field"]).get(), 1);
        assert_eq!(metrics.payments_declined.with_label_values(&["order"]).get(), 1);
    }
}
