/// Main error type surfaced to callers of the Platinum client
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A provider call failed. Carries only the classified, human-readable
    /// message; status codes and payloads go to the log and the alert email.
    #[error("{0}")]
    Platinum(String),

    #[error("Email delivery failed: {0}")]
    Email(String),

    #[error("Access token unavailable: {0}")]
    TokenUnavailable(String),
}

impl AppError {
    /// True when this error came out of a failed provider call
    pub fn is_platinum(&self) -> bool {
        matches!(self, Self::Platinum(_))
    }
}

/// Custom result type for the crate
pub type AppResult<T> = Result<T, AppError>;
