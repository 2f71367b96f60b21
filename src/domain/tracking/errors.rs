#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TrackingError {
    #[error("Please enter a tracking number")]
    EmptyTrackingNumber,

    #[error("Tracking number not found. Please check and try again.")]
    NotFound(String),

    #[error("Failed to fetch tracking information. Please try again.")]
    Unavailable,
}

impl TrackingError {
    /// Label used for the `tracking_lookups_total` outcome.
    pub fn outcome(&self) -> &'static str {
        match self {
            TrackingError::EmptyTrackingNumber => "blank",
            TrackingError::NotFound(_) => "not_found",
            TrackingError::Unavailable => "unavailable",
        }
    }
}
