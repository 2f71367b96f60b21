use serde::{Deserialize, Serialize};

use crate::domain::contact::{is_blank, is_plausible_email};
use super::errors::AccountError;

// ============================================================================
// Account Forms - client-side checks only, nothing is authenticated
// ============================================================================

pub const MIN_PASSWORD_LEN: usize = 6;

fn require(value: &str, label: &'static str) -> Result<(), AccountError> {
    if is_blank(value) {
        return Err(AccountError::MissingField(label));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), AccountError> {
    if is_blank(email) {
        return Err(AccountError::EmailRequired);
    }
    if !is_plausible_email(email) {
        return Err(AccountError::InvalidEmail);
    }
    Ok(())
}

/// Shared by signup and the password reset step.
pub(crate) fn check_new_password(password: &str, confirmation: &str) -> Result<(), AccountError> {
    if is_blank(password) {
        return Err(AccountError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    if password != confirmation {
        return Err(AccountError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
    pub marketing_emails: bool,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), AccountError> {
        require(&self.business_name, "Business Name")?;
        require_email(&self.email)?;
        if self.password != self.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        if !self.agree_to_terms {
            return Err(AccountError::TermsNotAccepted);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), AccountError> {
        require(&self.email, "Email")?;
        require(&self.password, "Password")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Editable copy of a [`Profile`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub business_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            business_name: profile.business_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            address: profile.address.clone(),
        }
    }

    pub fn apply(self) -> Result<Profile, AccountError> {
        require(&self.business_name, "Business Name")?;
        require_email(&self.email)?;

        Ok(Profile {
            business_name: self.business_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}
