use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::aggregate::Order;
use super::draft::OrderDraft;
use super::value_objects::OrderId;

// ============================================================================
// Order Record Builder
// ============================================================================
//
// Turns a validated draft plus its computed price into a finalized Order.
// Identifiers are `ORD-<epoch-ms>` and strictly increasing per builder: when
// the clock has not moved past the last issued value, the next integer is
// used instead, so orders built within one millisecond stay distinct.
//
// ============================================================================

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    last_issued: Option<i64>,
}

impl OrderIdGenerator {
    pub fn next_id(&mut self, now: DateTime<Utc>) -> OrderId {
        let millis = now.timestamp_millis();
        let issued = match self.last_issued {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };

        self.last_issued = Some(issued);
        OrderId::from_millis(issued)
    }
}

pub struct OrderRecordBuilder {
    clock: Arc<dyn Clock>,
    ids: OrderIdGenerator,
}

impl Default for OrderRecordBuilder {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl OrderRecordBuilder {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            ids: OrderIdGenerator::default(),
        }
    }

    /// Current reading of the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Caller is responsible for validating the draft first.
    pub fn build(&mut self, draft: &OrderDraft, estimated_value: f64) -> Order {
        let now = self.clock.now();
        let id = self.ids.next_id(now);

        tracing::debug!(
            order_id = %id,
            created_at = %now.to_rfc3339(),
            estimated_value,
            "Built order record"
        );

        Order::place(id, now, draft, estimated_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::value_objects::{OrderItem, OrderStatus};
    use chrono::TimeZone;

    fn draft() -> OrderDraft {
        OrderDraft {
            customer_name: "John Doe".into(),
            delivery_address: "456 Galle Road, Mount Lavinia".into(),
            items: vec![OrderItem::new("Documents", 1, 0.2)],
            ..OrderDraft::default()
        }
    }

    fn fixed_at(millis: i64) -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.timestamp_millis_opt(millis).unwrap()))
    }

    #[test]
    fn test_build_sets_identity_and_status() {
        let mut builder = OrderRecordBuilder::new(fixed_at(1735529825123));
        let order = builder.build(&draft(), 152.0);

        assert_eq!(order.id().as_str(), "ORD-1735529825123");
        assert_eq!(order.created_at().timestamp_millis(), 1735529825123);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.estimated_value, 152.0);
        assert_eq!(order.destination, "456 Galle Road");
    }

    #[test]
    fn test_same_millisecond_ids_do_not_collide() {
        let mut builder = OrderRecordBuilder::new(fixed_at(1_000));

        let ids: Vec<_> = (0..3).map(|_| builder.build(&draft(), 150.0).id().clone()).collect();
        assert_eq!(ids, vec![OrderId::new("ORD-1000"), OrderId::new("ORD-1001"), OrderId::new("ORD-1002")]);
    }

    #[test]
    fn test_generator_follows_clock_when_it_advances() {
        let mut ids = OrderIdGenerator::default();
        let at = |ms| Utc.timestamp_millis_opt(ms).unwrap();

        assert_eq!(ids.next_id(at(500)).as_str(), "ORD-500");
        assert_eq!(ids.next_id(at(500)).as_str(), "ORD-501");
        assert_eq!(ids.next_id(at(400)).as_str(), "ORD-502");
        assert_eq!(ids.next_id(at(900)).as_str(), "ORD-900");
    }
}
