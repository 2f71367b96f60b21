use super::value_objects::InvoiceStatus;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BillingError {
    #[error("Invoice {id} is {status} and cannot be paid")]
    NotPayable { id: String, status: InvoiceStatus },

    #[error("Unknown invoice status: {0}")]
    UnknownStatus(String),
}
