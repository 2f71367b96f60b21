use serde::Serialize;

use crate::domain::order::{Order, OrderStatus};

/// One line of the dashboard's "Recent Orders" card, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentOrderRow {
    pub id: String,
    pub customer: String,
    pub status: OrderStatus,
    pub destination: String,
    pub value: String,
    pub date: String,
}

impl From<&Order> for RecentOrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            customer: order.customer_name.clone(),
            status: order.status,
            destination: order.destination.clone(),
            value: format!("${:.2}", order.estimated_value),
            date: order.created_at().format("%Y-%m-%d").to_string(),
        }
    }
}

/// The first `n` orders of a newest-first list.
pub fn recent_orders(orders: &[Order], n: usize) -> Vec<RecentOrderRow> {
    orders.iter().take(n).map(RecentOrderRow::from).collect()
}
