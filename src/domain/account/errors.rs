#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Please enter your email address")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a new password")]
    PasswordRequired,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,

    #[error("{0}")]
    Backend(String),

    #[error("Password reset is not at the {0} step")]
    WrongStep(&'static str),
}
