use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderId, OrderStatus, Priority};

// ============================================================================
// Tracking Record - a shipment and its milestone timeline
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEvent {
    pub id: String,
    pub timestamp: NaiveDateTime,
    /// Milestone label such as "Picked Up" or "Out for Delivery".
    pub status: String,
    pub location: String,
    pub description: String,
    #[serde(rename = "isCompleted")]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub name: String,
    pub quantity: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub estimated_delivery: NaiveDateTime,
    pub current_location: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub priority: Priority,
    pub items: Vec<ItemSummary>,
    pub events: Vec<TrackingEvent>,
}

impl TrackingRecord {
    pub fn completed_events(&self) -> impl Iterator<Item = &TrackingEvent> {
        self.events.iter().filter(|event| event.completed)
    }

    pub fn last_completed(&self) -> Option<&TrackingEvent> {
        self.completed_events().last()
    }

    pub fn next_pending(&self) -> Option<&TrackingEvent> {
        self.events.iter().find(|event| !event.completed)
    }

    /// Share of milestones reached, 0.0 for an empty timeline.
    pub fn progress(&self) -> f64 {
        if self.events.is_empty() {
            return 0.0;
        }
        self.completed_events().count() as f64 / self.events.len() as f64
    }

    /// Timestamps never go backwards and no completed milestone follows a
    /// pending one.
    pub fn is_consistent(&self) -> bool {
        let chronological = self
            .events
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp);

        let completed_prefix = self
            .events
            .iter()
            .skip_while(|event| event.completed)
            .all(|event| !event.completed);

        chronological && completed_prefix
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

fn milestone(
    id: &str,
    timestamp: NaiveDateTime,
    status: &str,
    location: &str,
    description: &str,
    completed: bool,
) -> TrackingEvent {
    TrackingEvent {
        id: id.to_string(),
        timestamp,
        status: status.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        completed,
    }
}

/// The one shipment the sample lookup knows about.
pub fn sample_tracking_record() -> TrackingRecord {
    TrackingRecord {
        order_id: OrderId::new("ORD-1735529825123"),
        status: OrderStatus::InTransit,
        estimated_delivery: at(2024, 1, 15, 14, 30),
        current_location: "Colombo Distribution Center".into(),
        customer_name: "John Doe".into(),
        customer_phone: "+94 77 123 4567".into(),
        customer_email: "john@example.com".into(),
        pickup_address: "123 Main Street, Colombo 03".into(),
        delivery_address: "456 Galle Road, Mount Lavinia".into(),
        priority: Priority::Express,
        items: vec![
            ItemSummary { name: "Electronics Package".into(), quantity: 1, weight: 2.5 },
            ItemSummary { name: "Documents".into(), quantity: 1, weight: 0.2 },
        ],
        events: vec![
            milestone(
                "1",
                at(2024, 1, 14, 9, 0),
                "Order Created",
                "Online Portal",
                "Order has been created and is being processed",
                true,
            ),
            milestone(
                "2",
                at(2024, 1, 14, 10, 30),
                "Picked Up",
                "Colombo 03",
                "Package collected from sender",
                true,
            ),
            milestone(
                "3",
                at(2024, 1, 14, 15, 45),
                "In Transit",
                "Colombo Distribution Center",
                "Package is being sorted for delivery",
                true,
            ),
            milestone(
                "4",
                at(2024, 1, 15, 8, 0),
                "Out for Delivery",
                "Mount Lavinia Hub",
                "Package is out for final delivery",
                false,
            ),
            milestone(
                "5",
                at(2024, 1, 15, 14, 30),
                "Delivered",
                "Mount Lavinia",
                "Package delivered to recipient",
                false,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_timeline() {
        let record = sample_tracking_record();

        assert_eq!(record.events.len(), 5);
        assert_eq!(record.completed_events().count(), 3);
        assert_eq!(record.last_completed().unwrap().status, "In Transit");
        assert_eq!(record.next_pending().unwrap().status, "Out for Delivery");
        assert!((record.progress() - 0.6).abs() < 1e-9);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_completed_after_pending_is_inconsistent() {
        let mut record = sample_tracking_record();
        record.events[4].completed = true;

        assert!(!record.is_consistent());
    }

    #[test]
    fn test_out_of_order_timestamps_are_inconsistent() {
        let mut record = sample_tracking_record();
        record.events.swap(0, 1);

        assert!(!record.is_consistent());
    }

    #[test]
    fn test_empty_timeline() {
        let mut record = sample_tracking_record();
        record.events.clear();

        assert_eq!(record.progress(), 0.0);
        assert!(record.last_completed().is_none());
        assert!(record.next_pending().is_none());
        assert!(record.is_consistent());
    }

    #[test]
    fn test_serializes_portal_shape() {
        let json = serde_json::to_value(sample_tracking_record()).unwrap();

        assert_eq!(json["orderId"], "ORD-1735529825123");
        assert_eq!(json["status"], "In Transit");
        assert_eq!(json["priority"], "express");
        assert_eq!(json["events"][0]["isCompleted"], true);
        assert_eq!(json["estimatedDelivery"], "2024-01-15T14:30:00");
    }
}
