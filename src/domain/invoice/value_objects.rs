use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::BillingError;

// ============================================================================
// Invoice Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Paid,
        InvoiceStatus::Pending,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Only outstanding invoices offer a "Pay" action.
    pub fn is_payable(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::Overdue)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BillingError::UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: u32,
    pub rate: f64,
    pub amount: f64,
}

impl InvoiceLineItem {
    pub fn new(description: impl Into<String>, quantity: u32, rate: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
            amount: f64::from(quantity) * rate,
        }
    }

    /// One unit at `amount`.
    pub fn single(description: impl Into<String>, amount: f64) -> Self {
        Self::new(description, 1, amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub order_id: String,
    pub customer_name: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    pub created_date: NaiveDate,
    pub description: String,
    pub items: Vec<InvoiceLineItem>,
}

const CENT: f64 = 0.005;

impl Invoice {
    pub fn line_total(&self) -> f64 {
        self.items.iter().map(|line| line.amount).sum()
    }

    /// Every line's quantity × rate matches its amount and the lines add up
    /// to the invoice amount, to the cent.
    pub fn line_items_consistent(&self) -> bool {
        let lines_ok = self
            .items
            .iter()
            .all(|line| (f64::from(line.quantity) * line.rate - line.amount).abs() < CENT);

        lines_ok && (self.line_total() - self.amount).abs() < CENT
    }

    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.status.is_payable() && today > self.due_date
    }
}
