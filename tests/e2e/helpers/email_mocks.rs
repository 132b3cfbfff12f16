use async_trait::async_trait;
use parking_lot::Mutex;
use platinum_client::infrastructure::email::{EmailMessage, EmailSender};
use platinum_client::{AppError, AppResult};
use std::sync::atomic::{AtomicBool, Ordering};

/// Email sender that keeps every message instead of delivering it
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    failing: AtomicBool,
}

impl RecordingEmailSender {
    /// Make every following send attempt fail after being recorded
    pub fn fail_sends(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }

    pub fn only_message(&self) -> EmailMessage {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one alert email, got {}", sent.len());
        sent.into_iter().next().unwrap()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        self.sent.lock().push(message.clone());
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Email("SendGrid returned 503 Service Unavailable".to_string()));
        }
        Ok(())
    }
}
