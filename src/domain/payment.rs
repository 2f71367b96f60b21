use serde::{Deserialize, Serialize};

// ============================================================================
// Payment Confirmation Port
// ============================================================================
//
// The portal never moves money. Anything that needs a "proceed to payment?"
// answer asks an injected PaymentConfirmation; a real gateway can replace the
// stubs below without touching pricing or validation.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Order or invoice the charge belongs to, when one already exists.
    pub reference: Option<String>,
    pub payer: String,
    pub amount: f64,
    pub description: String,
}

impl PaymentRequest {
    /// Text a confirmation dialog would show.
    pub fn prompt(&self) -> String {
        match &self.reference {
            Some(reference) => format!(
                "Process payment of ${:.2} for {}?",
                self.amount, reference
            ),
            None => format!("{}: ${:.2}. Proceed to payment?", self.description, self.amount),
        }
    }
}

pub trait PaymentConfirmation {
    fn confirm(&self, request: &PaymentRequest) -> bool;
}

/// Any `Fn(&PaymentRequest) -> bool` callback works as a port.
impl<F> PaymentConfirmation for F
where
    F: Fn(&PaymentRequest) -> bool,
{
    fn confirm(&self, request: &PaymentRequest) -> bool {
        self(request)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl PaymentConfirmation for AutoApprove {
    fn confirm(&self, _request: &PaymentRequest) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDecline;

impl PaymentConfirmation for AlwaysDecline {
    fn confirm(&self, _request: &PaymentRequest) -> bool {
        false
    }
}

/// Logs the prompt and answers with a fixed decision.
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfirmation {
    pub approve: bool,
}

impl PaymentConfirmation for LoggingConfirmation {
    fn confirm(&self, request: &PaymentRequest) -> bool {
        tracing::info!(
            payer = %request.payer,
            amount = request.amount,
            approved = self.approve,
            "💳 {}",
            request.prompt()
        );
        self.approve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn request(reference: Option<&str>) -> PaymentRequest {
        PaymentRequest {
            reference: reference.map(str::to_string),
            payer: "John Doe".into(),
            amount: 299.99,
            description: "Order total".into(),
        }
    }

    #[test]
    fn test_prompt_text() {
        assert_eq!(request(Some("INV-001")).prompt(), "Process payment of $299.99 for INV-001?");
        assert_eq!(request(None).prompt(), "Order total: $299.99. Proceed to payment?");
    }

    #[test]
    fn test_stub_ports() {
        assert!(AutoApprove.confirm(&request(None)));
        assert!(!AlwaysDecline.confirm(&request(None)));
        assert!(LoggingConfirmation { approve: true }.confirm(&request(None)));
    }

    #[test]
    fn test_closure_port_sees_the_request() {
        let seen = Cell::new(0.0);
        let port = |req: &PaymentRequest| {
            seen.set(req.amount);
            req.amount < 500.0
        };

        assert!(port.confirm(&request(None)));
        assert_eq!(seen.get(), 299.99);
    }
}
