use serde::{Deserialize, Serialize};

use crate::domain::invoice::InvoiceLineItem;
use super::value_objects::{OrderItem, Priority};

// ============================================================================
// Pricing Calculator
// ============================================================================
//
// total = base_fee × priority multiplier
//       + Σ(quantity × unit weight) × per_kg_rate
//       + Σ quantity × per_item_rate        (only when a handling rate is set)
//
// Pure: no clock, no state. Inputs are assumed to have passed validation.
//
// ============================================================================

pub const BASE_FEE: f64 = 150.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    pub base_fee: f64,
    pub express_multiplier: f64,
    pub urgent_multiplier: f64,
    pub per_kg_rate: f64,
    /// Per-unit handling charge; `None` disables it.
    pub per_item_rate: Option<f64>,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self::canonical()
    }
}

impl PricingRules {
    /// The rule set the order form quotes with.
    pub fn canonical() -> Self {
        Self {
            base_fee: BASE_FEE,
            express_multiplier: 1.5,
            urgent_multiplier: 2.0,
            per_kg_rate: 10.0,
            per_item_rate: None,
        }
    }

    /// Smaller priority surcharges, cheaper weight, plus a per-item handling fee.
    pub fn reduced_surcharge() -> Self {
        Self {
            base_fee: BASE_FEE,
            express_multiplier: 1.05,
            urgent_multiplier: 1.15,
            per_kg_rate: 8.0,
            per_item_rate: Some(3.0),
        }
    }

    pub fn multiplier(&self, priority: Priority) -> f64 {
        match priority {
            Priority::Standard => 1.0,
            Priority::Express => self.express_multiplier,
            Priority::Urgent => self.urgent_multiplier,
        }
    }

    pub fn quote(&self, priority: Priority, items: &[OrderItem]) -> PriceQuote {
        let priority_fee = self.base_fee * self.multiplier(priority);
        let total_weight: f64 = items.iter().map(OrderItem::total_weight).sum();
        let total_quantity: f64 = items.iter().map(|item| f64::from(item.quantity)).sum();

        let weight_charge = total_weight * self.per_kg_rate;
        let handling_charge = self
            .per_item_rate
            .map(|rate| total_quantity * rate)
            .unwrap_or(0.0);

        PriceQuote {
            priority,
            base_fee: self.base_fee,
            priority_surcharge: priority_fee - self.base_fee,
            weight_charge,
            handling_charge,
            total_weight,
            total: priority_fee + weight_charge + handling_charge,
        }
    }

    pub fn price(&self, priority: Priority, items: &[OrderItem]) -> f64 {
        self.quote(priority, items).total
    }
}

/// Breakdown of a price, as shown in the order summary box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub priority: Priority,
    pub base_fee: f64,
    pub priority_surcharge: f64,
    pub weight_charge: f64,
    pub handling_charge: f64,
    pub total_weight: f64,
    pub total: f64,
}

impl PriceQuote {
    /// Invoice-style lines; zero-valued charges are left out.
    pub fn line_items(&self) -> Vec<InvoiceLineItem> {
        let surcharge_label = match self.priority {
            Priority::Standard => "Priority surcharge",
            Priority::Express => "Express surcharge",
            Priority::Urgent => "Urgent surcharge",
        };

        [
            ("Base delivery fee", self.base_fee),
            (surcharge_label, self.priority_surcharge),
            ("Weight charge", self.weight_charge),
            ("Handling", self.handling_charge),
        ]
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(description, amount)| InvoiceLineItem::single(description, amount))
        .collect()
    }
}
