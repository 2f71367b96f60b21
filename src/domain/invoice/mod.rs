// ============================================================================
// Invoice Domain - read-only billing data
// ============================================================================
//
// - Value objects (Invoice, InvoiceLineItem, InvoiceStatus)
// - Billing (summary totals, pay-invoice flow, sample invoices)
// - Errors (BillingError)
//
// Invoices are never created or updated here.
//
// ============================================================================

pub mod value_objects;
pub mod billing;
pub mod errors;

pub use value_objects::*;
pub use billing::*;
pub use errors::*;
