use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::event_sourcing::DomainEvent;
use super::aggregate::Order;
use super::value_objects::PaymentStatus;

// ============================================================================
// Order Events - Facts recorded against an order
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    Dispatched(OrderDispatched),
    DelayReported(OrderDelayReported),
    Delivered(OrderDelivered),
    Cancelled(OrderCancelled),
    Repriced(OrderRepriced),
    PaymentRecorded(OrderPaymentRecorded),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::Dispatched(_) => "OrderDispatched",
            OrderEvent::DelayReported(_) => "OrderDelayReported",
            OrderEvent::Delivered(_) => "OrderDelivered",
            OrderEvent::Cancelled(_) => "OrderCancelled",
            OrderEvent::Repriced(_) => "OrderRepriced",
            OrderEvent::PaymentRecorded(_) => "OrderPaymentRecorded",
        }
    }
}

/// Order Placed - carries the full record as built at submission
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPlaced {
    pub order: Order,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderDispatched {
    pub dispatched_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderDelayReported {
    pub reason: Option<String>,
    pub reported_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderDelivered {
    pub delivered_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderCancelled {
    pub reason: Option<String>,
    pub cancelled_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderRepriced {
    pub previous_value: f64,
    pub new_value: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrderPaymentRecorded {
    pub status: PaymentStatus,
}
