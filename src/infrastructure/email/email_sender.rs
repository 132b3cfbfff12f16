use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    pub name: String,
}

/// A plain-text email ready for delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub from: EmailAddress,
    pub subject: String,
    pub text: String,
}

/// Delivers email through a transactional email provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a single message
    ///
    /// # Errors
    /// Returns `AppError::Email` if the provider is unreachable or rejects the message
    async fn send(&self, message: &EmailMessage) -> AppResult<()>;
}
