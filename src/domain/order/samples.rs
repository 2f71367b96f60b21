use chrono::{DateTime, Utc};

use super::aggregate::Order;
use super::draft::OrderDraft;
use super::value_objects::{OrderId, OrderItem, OrderStatus, PaymentStatus, Priority};

// Dashboard seed data

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    customer: &str,
    destination: &str,
    status: OrderStatus,
    value: f64,
    created_at: &str,
    priority: Priority,
    item: (&str, u32),
) -> Order {
    let draft = OrderDraft {
        customer_name: customer.to_string(),
        delivery_address: destination.to_string(),
        priority,
        items: vec![OrderItem::new(item.0, item.1, 1.0)],
        ..OrderDraft::default()
    };
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default();

    let mut order = Order::place(OrderId::new(id), created_at, &draft, value);
    order.status = status;
    order.payment_status = match status {
        OrderStatus::Delivered => PaymentStatus::Paid,
        _ => PaymentStatus::Pending,
    };
    order
}

/// The three orders the dashboard starts with, newest first.
pub fn sample_orders() -> Vec<Order> {
    vec![
        seed(
            "ORD-2024-001",
            "TechStore Ltd",
            "Colombo",
            OrderStatus::InTransit,
            1250.0,
            "2024-01-15T10:30:00Z",
            Priority::Express,
            ("Electronics", 2),
        ),
        seed(
            "ORD-2024-002",
            "Fashion Hub",
            "Kandy",
            OrderStatus::Processing,
            890.0,
            "2024-01-15T14:20:00Z",
            Priority::Standard,
            ("Clothing", 5),
        ),
        seed(
            "ORD-2024-003",
            "Digital World",
            "Galle",
            OrderStatus::Delivered,
            2100.0,
            "2024-01-14T09:15:00Z",
            Priority::Urgent,
            ("Gadgets", 3),
        ),
    ]
}
