use std::time::Duration;

use async_trait::async_trait;

use crate::domain::contact::{is_blank, is_plausible_email};
use super::errors::AccountError;
use super::forms::check_new_password;

// ============================================================================
// Password Reset - two-step flow backed by a ResetService port
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    Email,
    Reset,
    Completed,
}

impl ResetStep {
    fn as_str(&self) -> &'static str {
        match self {
            ResetStep::Email => "email",
            ResetStep::Reset => "reset",
            ResetStep::Completed => "completed",
        }
    }
}

#[async_trait]
pub trait ResetService: Send + Sync {
    async fn verify_email(&self, email: &str) -> Result<(), AccountError>;
    async fn reset_password(&self, email: &str, new_password: &str) -> Result<(), AccountError>;
}

/// Accepts every request after a fixed delay, or rejects every request when
/// built with [`SimulatedResetService::failing`].
#[derive(Debug, Clone)]
pub struct SimulatedResetService {
    email_latency: Duration,
    reset_latency: Duration,
    fail: bool,
}

impl SimulatedResetService {
    pub fn new(email_latency: Duration, reset_latency: Duration) -> Self {
        Self { email_latency, reset_latency, fail: false }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Default for SimulatedResetService {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(1500))
    }
}

#[async_trait]
impl ResetService for SimulatedResetService {
    async fn verify_email(&self, email: &str) -> Result<(), AccountError> {
        tokio::time::sleep(self.email_latency).await;
        if self.fail {
            return Err(AccountError::Backend(
                "Email not found. Please check your email address.".into(),
            ));
        }
        tracing::debug!(email, "Email verified");
        Ok(())
    }

    async fn reset_password(&self, email: &str, _new_password: &str) -> Result<(), AccountError> {
        tokio::time::sleep(self.reset_latency).await;
        if self.fail {
            return Err(AccountError::Backend("Failed to reset password. Please try again.".into()));
        }
        tracing::debug!(email, "Password reset accepted");
        Ok(())
    }
}

pub struct PasswordReset<S> {
    service: S,
    step: ResetStep,
    email: String,
}

impl<S: ResetService> PasswordReset<S> {
    pub fn new(service: S) -> Self {
        Self { service, step: ResetStep::Email, email: String::new() }
    }

    pub fn step(&self) -> ResetStep {
        self.step
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn expect_step(&self, expected: ResetStep) -> Result<(), AccountError> {
        if self.step != expected {
            return Err(AccountError::WrongStep(expected.as_str()));
        }
        Ok(())
    }

    pub async fn submit_email(&mut self, email: &str) -> Result<(), AccountError> {
        self.expect_step(ResetStep::Email)?;
        if is_blank(email) {
            return Err(AccountError::EmailRequired);
        }
        if !is_plausible_email(email) {
            return Err(AccountError::InvalidEmail);
        }

        let email = email.trim();
        self.service.verify_email(email).await?;

        self.email = email.to_string();
        self.step = ResetStep::Reset;
        Ok(())
    }

    pub async fn submit_new_password(&mut self, password: &str, confirmation: &str) -> Result<(), AccountError> {
        self.expect_step(ResetStep::Reset)?;
        check_new_password(password, confirmation)?;

        self.service.reset_password(&self.email, password).await?;

        tracing::info!(email = %self.email, "🔑 Password reset completed");
        self.step = ResetStep::Completed;
        Ok(())
    }

    /// Leaves the reset step; the verified email is kept for editing.
    pub fn back_to_email(&mut self) {
        self.step = ResetStep::Email;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> SimulatedResetService {
        SimulatedResetService::new(Duration::ZERO, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_full_reset_flow() {
        let mut flow = PasswordReset::new(instant());

        flow.submit_email(" john@example.com ").await.unwrap();
        assert_eq!(flow.step(), ResetStep::Reset);
        assert_eq!(flow.email(), "john@example.com");

        flow.submit_new_password("hunter22", "hunter22").await.unwrap();
        assert_eq!(flow.step(), ResetStep::Completed);
    }

    #[tokio::test]
    async fn test_email_step_rejections() {
        let mut flow = PasswordReset::new(instant());

        let blank = flow.submit_email("").await.unwrap_err();
        assert_eq!(blank.to_string(), "Please enter your email address");

        let malformed = flow.submit_email("john@example").await.unwrap_err();
        assert_eq!(malformed.to_string(), "Please enter a valid email address");

        assert_eq!(flow.step(), ResetStep::Email);
    }

    #[tokio::test]
    async fn test_password_step_rejections_keep_step() {
        let mut flow = PasswordReset::new(instant());
        flow.submit_email("john@example.com").await.unwrap();

        assert_eq!(flow.submit_new_password("", "").await, Err(AccountError::PasswordRequired));
        assert_eq!(
            flow.submit_new_password("abc", "abc").await,
            Err(AccountError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            flow.submit_new_password("abcdef", "abcdeg").await,
            Err(AccountError::PasswordMismatch)
        );
        assert_eq!(flow.step(), ResetStep::Reset);
    }

    #[tokio::test]
    async fn test_backend_failure_stays_on_step() {
        let mut flow = PasswordReset::new(instant().failing());

        let error = flow.submit_email("john@example.com").await.unwrap_err();
        assert_eq!(error.to_string(), "Email not found. Please check your email address.");
        assert_eq!(flow.step(), ResetStep::Email);
    }

    #[tokio::test]
    async fn test_back_to_email() {
        let mut flow = PasswordReset::new(instant());
        flow.submit_email("john@example.com").await.unwrap();

        flow.back_to_email();
        assert_eq!(flow.step(), ResetStep::Email);
        assert_eq!(
            flow.submit_new_password("abcdef", "abcdef").await,
            Err(AccountError::WrongStep("reset"))
        );
    }
}
