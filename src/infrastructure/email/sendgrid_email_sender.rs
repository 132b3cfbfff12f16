use super::email_sender::{EmailAddress, EmailMessage, EmailSender};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Serialize;

const SENDGRID_SEND_PATH: &str = "/v3/mail/send";

#[derive(Debug, Serialize)]
struct SendGridMail<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: &'a EmailAddress,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Recipient<'a>>,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

impl<'a> From<&'a EmailMessage> for SendGridMail<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: message
                    .to
                    .iter()
                    .map(|email| Recipient { email: email.as_str() })
                    .collect(),
            }],
            from: &message.from,
            subject: &message.subject,
            content: vec![Content {
                content_type: "text/plain",
                value: &message.text,
            }],
        }
    }
}

/// SendGrid v3 implementation of the email sender
pub struct SendGridEmailSender {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl SendGridEmailSender {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailSender for SendGridEmailSender {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), SENDGRID_SEND_PATH);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SendGridMail::from(message))
            .send()
            .await
            .map_err(|e| AppError::Email(format!("SendGrid request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Email(format!(
                "SendGrid returned {}: {}",
                status, error_text
            )));
        }

        tracing::debug!(
            recipients = message.to.len(),
            subject = %message.subject,
            "Email accepted by SendGrid"
        );

        Ok(())
    }
}
