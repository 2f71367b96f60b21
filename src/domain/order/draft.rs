use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::OrderError;
use super::value_objects::{OrderItem, Priority};

// ============================================================================
// Order Draft - the in-progress order owned by the creation form
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub beneficiary_name: String,
    pub delivery_phone: String,
    pub priority: Priority,
    #[serde(default)]
    pub special_instructions: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Items without a name are refused, like the form's
    /// "Add" button.
    pub fn add_item(&mut self, item: OrderItem) -> Result<Uuid, OrderError> {
        if item.name.trim().is_empty() {
            return Err(OrderError::EmptyItemName);
        }

        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    pub fn remove_item(&mut self, id: Uuid) -> Result<OrderItem, OrderError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(OrderError::ItemNotFound(id))?;

        Ok(self.items.remove(index))
    }

    /// Back to an empty form (standard priority, no items).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(OrderItem::total_weight).sum()
    }
}

/// Raw text from the "add item" row.
///
/// Numbers are coerced the same way the form does it: a quantity that does not
/// parse becomes 1 and a weight that does not parse becomes 0, which the
/// validator later rejects.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub name: String,
    pub quantity: String,
    pub weight: String,
    pub dimensions: String,
}

impl ItemForm {
    pub fn into_item(self) -> OrderItem {
        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .unwrap_or(1);
        let weight = self.weight.trim().parse::<f64>().unwrap_or(0.0);

        OrderItem::new(self.name.trim(), quantity, weight).with_dimensions(self.dimensions)
    }
}
