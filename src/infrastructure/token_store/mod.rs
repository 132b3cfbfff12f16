use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Source of the bearer token used for core API calls.
///
/// The client only reads from it; refreshing the token is the job of
/// whoever owns the store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Return the current access token
    ///
    /// # Errors
    /// Returns `AppError::TokenUnavailable` if no token is held
    async fn access_token(&self) -> AppResult<String>;
}

/// Process-local token store shared between the token refresher and the client
#[derive(Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write() = None;
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn access_token(&self) -> AppResult<String> {
        self.token
            .read()
            .clone()
            .ok_or_else(|| AppError::TokenUnavailable("no platinum access token stored".to_string()))
    }
}
