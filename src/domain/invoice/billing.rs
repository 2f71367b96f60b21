use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::payment::{PaymentConfirmation, PaymentRequest};
use crate::metrics::Metrics;
use super::errors::BillingError;
use super::value_objects::{Invoice, InvoiceLineItem, InvoiceStatus};

// ============================================================================
// Billing - summary cards and the pay-invoice flow
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingSummary {
    pub total: f64,
    pub paid: f64,
    pub pending: f64,
    pub overdue: f64,
}

impl BillingSummary {
    pub fn from_invoices(invoices: &[Invoice]) -> Self {
        invoices.iter().fold(Self::default(), |mut acc, invoice| {
            acc.total += invoice.amount;
            match invoice.status {
                InvoiceStatus::Paid => acc.paid += invoice.amount,
                InvoiceStatus::Pending => acc.pending += invoice.amount,
                InvoiceStatus::Overdue => acc.overdue += invoice.amount,
                InvoiceStatus::Cancelled => {}
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Confirmed,
    Declined,
}

/// Ask the payment port to settle an outstanding invoice. The invoice itself
/// is sample data and stays unchanged either way.
pub fn pay_invoice(
    invoice: &Invoice,
    payment: &dyn PaymentConfirmation,
    metrics: Option<&Metrics>,
) -> Result<PaymentOutcome, BillingError> {
    if !invoice.status.is_payable() {
        tracing::warn!(invoice_id = %invoice.id, status = %invoice.status, "Invoice is not payable");
        return Err(BillingError::NotPayable {
            id: invoice.id.clone(),
            status: invoice.status,
        });
    }

    let request = PaymentRequest {
        reference: Some(invoice.id.clone()),
        payer: invoice.customer_name.clone(),
        amount: invoice.amount,
        description: invoice.description.clone(),
    };

    if payment.confirm(&request) {
        tracing::info!(invoice_id = %invoice.id, amount = invoice.amount, "Invoice payment confirmed");
        Ok(PaymentOutcome::Confirmed)
    } else {
        tracing::info!(invoice_id = %invoice.id, "Invoice payment declined");
        if let Some(metrics) = metrics {
            metrics.record_payment_declined("invoice");
        }
        Ok(PaymentOutcome::Declined)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The billing page's sample invoices.
pub fn sample_invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: "INV-001".into(),
            order_id: "ORD-1735529825123".into(),
            customer_name: "John Doe".into(),
            amount: 299.99,
            status: InvoiceStatus::Paid,
            due_date: date(2024, 1, 15),
            paid_date: Some(date(2024, 1, 10)),
            created_date: date(2024, 1, 5),
            description: "Express delivery service".into(),
            items: vec![
                InvoiceLineItem::single("Base delivery fee", 150.00),
                InvoiceLineItem::single("Express surcharge", 99.99),
                InvoiceLineItem::single("Insurance", 50.00),
            ],
        },
        Invoice {
            id: "INV-002".into(),
            order_id: "ORD-1735529825124".into(),
            customer_name: "Jane Smith".into(),
            amount: 175.50,
            status: InvoiceStatus::Pending,
            due_date: date(2024, 1, 20),
            paid_date: None,
            created_date: date(2024, 1, 10),
            description: "Standard delivery service".into(),
            items: vec![
                InvoiceLineItem::single("Base delivery fee", 125.50),
                InvoiceLineItem::single("Additional weight", 50.00),
            ],
        },
        Invoice {
            id: "INV-003".into(),
            order_id: "ORD-1735529825125".into(),
            customer_name: "Bob Wilson".into(),
            amount: 450.00,
            status: InvoiceStatus::Overdue,
            due_date: date(2024, 1, 12),
            paid_date: None,
            created_date: date(2024, 1, 1),
            description: "Urgent delivery with special handling".into(),
            items: vec![
                InvoiceLineItem::single("Base delivery fee", 200.00),
                InvoiceLineItem::single("Urgent surcharge", 150.00),
                InvoiceLineItem::single("Special handling", 100.00),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{AlwaysDecline, AutoApprove};

    #[test]
    fn test_sample_invoices_are_consistent() {
        for invoice in sample_invoices() {
            assert!(invoice.line_items_consistent(), "{} lines do not add up", invoice.id);
        }
    }

    #[test]
    fn test_billing_summary() {
        let summary = BillingSummary::from_invoices(&sample_invoices());

        assert!((summary.total - 925.49).abs() < 1e-9);
        assert!((summary.paid - 299.99).abs() < 1e-9);
        assert!((summary.pending - 175.50).abs() < 1e-9);
        assert!((summary.overdue - 450.00).abs() < 1e-9);
    }

    #[test]
    fn test_pay_outstanding_invoice() {
        let invoices = sample_invoices();

        assert_eq!(pay_invoice(&invoices[1], &AutoApprove, None), Ok(PaymentOutcome::Confirmed));
        assert_eq!(pay_invoice(&invoices[2], &AlwaysDecline, None), Ok(PaymentOutcome::Declined));
    }

    #[test]
    fn test_paid_invoice_cannot_be_paid_again() {
        let invoices = sample_invoices();
        let result = pay_invoice(&invoices[0], &AutoApprove, None);

        assert_eq!(
            result,
            Err(BillingError::NotPayable { id: "INV-001".into(), status: InvoiceStatus::Paid })
        );
    }

    #[test]
    fn test_payment_prompt_names_the_invoice() {
        let invoices = sample_invoices();
        let port = |req: &PaymentRequest| req.prompt() == "Process payment of $450.00 for INV-003?";

        assert_eq!(pay_invoice(&invoices[2], &port, None), Ok(PaymentOutcome::Confirmed));
    }

    #[test]
    fn test_declined_invoice_payment_is_counted() {
        let metrics = Metrics::new().unwrap();
        let invoices = sample_invoices();

        pay_invoice(&invoices[1], &AlwaysDecline, Some(&metrics)).unwrap();
        assert_eq!(metrics.payments_declined.with_label_values(&["invoice"]).get(), 1);
    }

    #[test]
    fn test_overdue_check() {
        let invoices = sample_invoices();
        let today = date(2024, 1, 18);

        assert!(!invoices[0].is_overdue_on(today));
        assert!(!invoices[1].is_overdue_on(today));
        assert!(invoices[2].is_overdue_on(today));
    }
}
