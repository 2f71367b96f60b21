use serde::{Deserialize, Serialize};

use crate::domain::contact::{is_blank, is_plausible_email};
use super::draft::OrderDraft;

// ============================================================================
// Order Validator
// ============================================================================
//
// Pure check over a draft. Every violation is collected so the form can show
// either the first one or the whole list.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DraftField {
    CustomerName,
    CustomerPhone,
    PickupAddress,
    DeliveryAddress,
    BeneficiaryName,
    DeliveryPhone,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::CustomerName => "Customer Name",
            DraftField::CustomerPhone => "Customer Phone",
            DraftField::PickupAddress => "Pickup Address",
            DraftField::DeliveryAddress => "Delivery Address",
            DraftField::BeneficiaryName => "Beneficiary Name",
            DraftField::DeliveryPhone => "Delivery Phone",
        }
    }

    fn value<'a>(&self, draft: &'a OrderDraft) -> &'a str {
        match self {
            DraftField::CustomerName => &draft.customer_name,
            DraftField::CustomerPhone => &draft.customer_phone,
            DraftField::PickupAddress => &draft.pickup_address,
            DraftField::DeliveryAddress => &draft.delivery_address,
            DraftField::BeneficiaryName => &draft.beneficiary_name,
            DraftField::DeliveryPhone => &draft.delivery_phone,
        }
    }
}

/// Which fields must be filled before an order can be submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredFields {
    /// Sender, pickup and beneficiary details all required.
    #[default]
    Full,
    /// Only the customer name and delivery address.
    Minimal,
}

impl RequiredFields {
    pub fn fields(&self) -> &'static [DraftField] {
        match self {
            RequiredFields::Full => &[
                DraftField::CustomerName,
                DraftField::CustomerPhone,
                DraftField::PickupAddress,
                DraftField::DeliveryAddress,
                DraftField::BeneficiaryName,
                DraftField::DeliveryPhone,
            ],
            RequiredFields::Minimal => &[DraftField::CustomerName, DraftField::DeliveryAddress],
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("{} is required", .0.label())]
    MissingField(DraftField),

    #[error("Add at least one item to the order")]
    NoItems,

    #[error("Item \"{name}\" must have a quantity of at least 1")]
    InvalidQuantity { name: String, quantity: u32 },

    #[error("Item \"{name}\" must have a positive weight, got {weight}")]
    InvalidWeight { name: String, weight: f64 },

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
}

impl Violation {
    /// Short machine-friendly reason, used as a metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::MissingField(_) => "missing_field",
            Violation::NoItems => "no_items",
            Violation::InvalidQuantity { .. } => "invalid_quantity",
            Violation::InvalidWeight { .. } => "invalid_weight",
            Violation::InvalidEmail(_) => "invalid_email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Order draft is invalid: {}", join_messages(.0))]
pub struct ValidationErrors(Vec<Violation>);

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// The first problem, for forms that surface one alert at a time.
    pub fn first(&self) -> Option<&Violation> {
        self.0.first()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.0
            .iter()
            .filter_map(|v| match v {
                Violation::MissingField(field) => Some(field.label()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub required: RequiredFields,
}

impl ValidationRules {
    pub fn new(required: RequiredFields) -> Self {
        Self { required }
    }

    pub fn validate(&self, draft: &OrderDraft) -> Result<(), ValidationErrors> {
        let mut violations: Vec<Violation> = self
            .required
            .fields()
            .iter()
            .filter(|field| is_blank(field.value(draft)))
            .map(|field| Violation::MissingField(*field))
            .collect();

        if !is_blank(&draft.customer_email) && !is_plausible_email(&draft.customer_email) {
            violations.push(Violation::InvalidEmail(draft.customer_email.clone()));
        }

        if draft.items.is_empty() {
            violations.push(Violation::NoItems);
        }

        for item in &draft.items {
            if item.quantity == 0 {
                violations.push(Violation::InvalidQuantity {
                    name: item.name.clone(),
                    quantity: item.quantity,
                });
            }
            if !(item.weight_kg.is_finite() && item.weight_kg > 0.0) {
                violations.push(Violation::InvalidWeight {
                    name: item.name.clone(),
                    weight: item.weight_kg,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }
}
