use chrono::{DateTime, Utc};

use super::value_objects::PaymentStatus;

// ============================================================================
// Order Commands - Lifecycle changes requested against a placed order
// ============================================================================

#[derive(Debug, Clone)]
pub enum OrderCommand {
    Dispatch,
    ReportDelay {
        reason: Option<String>,
    },
    Deliver,
    Cancel {
        reason: Option<String>,
    },
    Reprice {
        value: f64,
    },
    RecordPayment {
        status: PaymentStatus,
    },
}

impl OrderCommand {
    /// Stamp the command with the moment it was issued.
    pub fn at(self, issued_at: DateTime<Utc>) -> IssuedCommand {
        IssuedCommand { command: self, issued_at }
    }
}

/// What the aggregate actually handles: lifecycle events take their
/// timestamps from `issued_at`, never from the wall clock.
#[derive(Debug, Clone)]
pub struct IssuedCommand {
    pub command: OrderCommand,
    pub issued_at: DateTime<Utc>,
}
