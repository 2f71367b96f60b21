use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::Aggregate;
use super::commands::{IssuedCommand, OrderCommand};
use super::draft::OrderDraft;
use super::errors::OrderError;
use super::events::*;
use super::value_objects::{OrderId, OrderItem, OrderStatus, PaymentStatus, Priority};

// ============================================================================
// Order Aggregate - a finalized order and its lifecycle rules
// ============================================================================
//
// `id` and `created_at` are private and no event touches them: once an order
// is built they never change. Status, value and payment state move only
// through commands → events.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    // Identity
    id: OrderId,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    version: u64,

    // Customer & delivery details, copied from the draft
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub pickup_address: String,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub beneficiary_name: String,
    #[serde(default)]
    pub delivery_phone: String,
    pub priority: Priority,
    #[serde(default)]
    pub special_instructions: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,

    // Current State
    pub status: OrderStatus,
    pub estimated_value: f64,
    pub destination: String,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_reason: Option<String>,
}

impl Order {
    /// A freshly placed order: Processing, payment pending.
    pub(crate) fn place(
        id: OrderId,
        created_at: DateTime<Utc>,
        draft: &OrderDraft,
        estimated_value: f64,
    ) -> Self {
        Self {
            id,
            created_at,
            version: 0,
            customer_name: draft.customer_name.trim().to_string(),
            customer_phone: draft.customer_phone.trim().to_string(),
            customer_email: draft.customer_email.trim().to_string(),
            pickup_address: draft.pickup_address.trim().to_string(),
            delivery_address: draft.delivery_address.trim().to_string(),
            beneficiary_name: draft.beneficiary_name.trim().to_string(),
            delivery_phone: draft.delivery_phone.trim().to_string(),
            priority: draft.priority,
            special_instructions: draft.special_instructions.clone(),
            items: draft.items.clone(),
            status: OrderStatus::Processing,
            estimated_value,
            destination: derive_destination(&draft.delivery_address),
            payment_status: PaymentStatus::Pending,
            cancelled_reason: None,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn transition(&self, next: OrderStatus) -> Result<(), OrderError> {
        if self.status == OrderStatus::Cancelled {
            return Err(OrderError::AlreadyCancelled);
        }
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        Ok(())
    }
}

/// Short display address: text before the first comma, trimmed.
pub fn derive_destination(delivery_address: &str) -> String {
    delivery_address
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for Order {
    type Event = OrderEvent;
    type Command = IssuedCommand;
    type Error = OrderError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            OrderEvent::Placed(e) => {
                let mut order = e.order.clone();
                order.version = 1;
                Ok(order)
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            OrderEvent::Placed(_) => {
                // First event already applied
                return Ok(());
            }
            OrderEvent::Dispatched(_) => {
                self.status = OrderStatus::InTransit;
            }
            OrderEvent::DelayReported(_) => {
                self.status = OrderStatus::Delayed;
            }
            OrderEvent::Delivered(_) => {
                self.status = OrderStatus::Delivered;
            }
            OrderEvent::Cancelled(e) => {
                self.status = OrderStatus::Cancelled;
                self.cancelled_reason = e.reason.clone();
            }
            OrderEvent::Repriced(e) => {
                self.estimated_value = e.new_value;
            }
            OrderEvent::PaymentRecorded(e) => {
                self.payment_status = e.status;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, issued: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let at = issued.issued_at;
        match &issued.command {
            OrderCommand::Dispatch => {
                self.transition(OrderStatus::InTransit)?;
                Ok(vec![OrderEvent::Dispatched(OrderDispatched {
                    dispatched_at: at,
                })])
            }

            OrderCommand::ReportDelay { reason } => {
                self.transition(OrderStatus::Delayed)?;
                Ok(vec![OrderEvent::DelayReported(OrderDelayReported {
                    reason: reason.clone(),
                    reported_at: at,
                })])
            }

            OrderCommand::Deliver => {
                self.transition(OrderStatus::Delivered)?;
                Ok(vec![OrderEvent::Delivered(OrderDelivered {
                    delivered_at: at,
                })])
            }

            OrderCommand::Cancel { reason } => {
                self.transition(OrderStatus::Cancelled)?;
                Ok(vec![OrderEvent::Cancelled(OrderCancelled {
                    reason: reason.clone(),
                    cancelled_at: at,
                })])
            }

            OrderCommand::Reprice { value } => {
                if self.status == OrderStatus::Cancelled {
                    return Err(OrderError::AlreadyCancelled);
                }
                if !value.is_finite() || *value < 0.0 {
                    return Err(OrderError::InvalidValue(*value));
                }
                if *value == self.estimated_value {
                    return Ok(vec![]); // No change
                }

                Ok(vec![OrderEvent::Repriced(OrderRepriced {
                    previous_value: self.estimated_value,
                    new_value: *value,
                })])
            }

            OrderCommand::RecordPayment { status } => {
                if self.status == OrderStatus::Cancelled {
                    return Err(OrderError::AlreadyCancelled);
                }
                if *status == self.payment_status {
                    return Ok(vec![]);
                }

                Ok(vec![OrderEvent::PaymentRecorded(OrderPaymentRecorded {
                    status: *status,
                })])
            }
        }
    }

    fn aggregate_id(&self) -> &str {
        self.id.as_str()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_sourcing::EventEnvelope;
    use uuid::Uuid;

    fn placed_order() -> Order {
        let draft = OrderDraft {
            customer_name: "John Doe".into(),
            delivery_address: "456 Galle Road, Mount Lavinia".into(),
            items: vec![OrderItem::new("Electronics Package", 1, 2.5)],
            ..OrderDraft::default()
        };
        let order = Order::place(OrderId::from_millis(1), Utc::now(), &draft, 175.0);
        Order::apply_first_event(&OrderEvent::Placed(OrderPlaced { order })).unwrap()
    }

    fn at_noon() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-14T12:00:00Z").unwrap().with_timezone(&Utc)
    }

    fn decide(order: &Order, command: OrderCommand) -> Result<Vec<OrderEvent>, OrderError> {
        order.handle_command(&command.at(at_noon()))
    }

    fn run(order: &mut Order, command: OrderCommand) -> Result<(), OrderError> {
        for event in decide(order, command)? {
            order.apply_event(&event)?;
        }
        Ok(())
    }

    #[test]
    fn test_place_derives_destination_and_defaults() {
        let order = placed_order();

        assert_eq!(order.destination, "456 Galle Road");
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.version(), 1);
    }

    #[test]
    fn test_derive_destination() {
        assert_eq!(derive_destination("456 Galle Road, Mount Lavinia"), "456 Galle Road");
        assert_eq!(derive_destination("Kandy"), "Kandy");
        assert_eq!(derive_destination("  Galle ,Fort, Southern"), "Galle");
        assert_eq!(derive_destination(""), "");
    }

    #[test]
    fn test_full_lifecycle() {
        let mut order = placed_order();

        run(&mut order, OrderCommand::Dispatch).unwrap();
        assert_eq!(order.status, OrderStatus::InTransit);

        run(&mut order, OrderCommand::ReportDelay { reason: Some("Flooding".into()) }).unwrap();
        assert_eq!(order.status, OrderStatus::Delayed);

        run(&mut order, OrderCommand::Dispatch).unwrap();
        run(&mut order, OrderCommand::Deliver).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.version(), 5);
    }

    #[test]
    fn test_lifecycle_events_carry_issue_time() {
        let order = placed_order();

        let events = decide(&order, OrderCommand::Dispatch).unwrap();
        assert!(matches!(
            events.as_slice(),
            [OrderEvent::Dispatched(OrderDispatched { dispatched_at })] if *dispatched_at == at_noon()
        ));

        let events = decide(&order, OrderCommand::Cancel { reason: None }).unwrap();
        assert!(matches!(
            events.as_slice(),
            [OrderEvent::Cancelled(OrderCancelled { cancelled_at, .. })] if *cancelled_at == at_noon()
        ));
    }

    #[test]
    fn test_cannot_deliver_before_dispatch() {
        let order = placed_order();
        let result = decide(&order, OrderCommand::Deliver);

        assert_eq!(
            result.unwrap_err(),
            OrderError::InvalidStatusTransition {
                from: OrderStatus::Processing,
                to: OrderStatus::Delivered,
            }
        );
    }

    #[test]
    fn test_cancelled_order_rejects_everything() {
        let mut order = placed_order();
        run(&mut order, OrderCommand::Cancel { reason: Some("Customer request".into()) }).unwrap();
        assert_eq!(order.cancelled_reason.as_deref(), Some("Customer request"));

        for command in [
            OrderCommand::Dispatch,
            OrderCommand::Cancel { reason: None },
            OrderCommand::Reprice { value: 10.0 },
            OrderCommand::RecordPayment { status: PaymentStatus::Paid },
        ] {
            assert_eq!(decide(&order, command).unwrap_err(), OrderError::AlreadyCancelled);
        }
    }

    #[test]
    fn test_delivered_order_cannot_be_cancelled() {
        let mut order = placed_order();
        run(&mut order, OrderCommand::Dispatch).unwrap();
        run(&mut order, OrderCommand::Deliver).unwrap();

        let result = decide(&order, OrderCommand::Cancel { reason: None });
        assert!(matches!(result, Err(OrderError::InvalidStatusTransition { .. })));
    }

    #[test]
    fn test_reprice_rules() {
        let mut order = placed_order();

        assert!(decide(&order, OrderCommand::Reprice { value: 175.0 }).unwrap().is_empty());
        assert_eq!(
            decide(&order, OrderCommand::Reprice { value: -1.0 }).unwrap_err(),
            OrderError::InvalidValue(-1.0)
        );

        run(&mut order, OrderCommand::Reprice { value: 210.0 }).unwrap();
        assert_eq!(order.estimated_value, 210.0);
    }

    #[test]
    fn test_record_payment() {
        let mut order = placed_order();
        run(&mut order, OrderCommand::RecordPayment { status: PaymentStatus::Paid }).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);

        let again = decide(&order, OrderCommand::RecordPayment { status: PaymentStatus::Paid });
        assert!(again.unwrap().is_empty());
    }

    #[test]
    fn test_identity_survives_every_event() {
        let mut order = placed_order();
        let id = order.id().clone();
        let created_at = order.created_at();

        run(&mut order, OrderCommand::Dispatch).unwrap();
        run(&mut order, OrderCommand::Reprice { value: 999.0 }).unwrap();
        run(&mut order, OrderCommand::Cancel { reason: None }).unwrap();

        assert_eq!(order.id(), &id);
        assert_eq!(order.created_at(), created_at);
    }

    #[test]
    fn test_apply_first_event_requires_placed() {
        let event = OrderEvent::Delivered(OrderDelivered { delivered_at: Utc::now() });
        assert_eq!(Order::apply_first_event(&event).unwrap_err(), OrderError::NotInitialized);
    }

    #[test]
    fn test_load_from_events() {
        let order = placed_order();
        let id = order.id().to_string();

        let events = vec![
            EventEnvelope::new(id.clone(), 1, OrderEvent::Placed(OrderPlaced { order: order.clone() }), Uuid::new_v4()),
            EventEnvelope::new(id.clone(), 2, OrderEvent::Dispatched(OrderDispatched { dispatched_at: Utc::now() }), Uuid::new_v4()),
        ];

        let rebuilt = Order::load_from_events(&events).unwrap();
        assert_eq!(rebuilt.status, OrderStatus::InTransit);
        assert_eq!(rebuilt.version(), 2);
        assert_eq!(rebuilt.id(), order.id());
    }

    #[test]
    fn test_order_wire_shape() {
        let order = placed_order();
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["id"], "ORD-1");
        assert_eq!(json["status"], "Processing");
        assert_eq!(json["customerName"], "John Doe");
        assert_eq!(json["estimatedValue"], 175.0);
        assert!(json["createdAt"].as_str().unwrap().contains('T'));
        assert!(json.get("version").is_none());
    }
}
