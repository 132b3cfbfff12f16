use super::model::ErrorReport;
use crate::infrastructure::config::{Config, Environment};
use crate::infrastructure::email::{EmailAddress, EmailMessage, EmailSender};
use serde::Serialize;
use std::sync::Arc;

const STAGING_SUBJECT: &str = "STAGING Platinum API Error Notification";
const PRODUCTION_SUBJECT: &str = "Platinum API Error Notification";

/// Sends the operator alert for a failed provider call
pub struct EmailNotifier {
    sender: Arc<dyn EmailSender>,
    recipients: Vec<String>,
    from: EmailAddress,
    environment: Environment,
}

impl EmailNotifier {
    pub fn new(
        sender: Arc<dyn EmailSender>,
        recipients: Vec<String>,
        from: EmailAddress,
        environment: Environment,
    ) -> Self {
        Self {
            sender,
            recipients,
            from,
            environment,
        }
    }

    pub fn from_config(config: &Config, sender: Arc<dyn EmailSender>) -> Self {
        Self::new(
            sender,
            config.alert_recipients.clone(),
            EmailAddress {
                email: config.alert_from_email.clone(),
                name: config.alert_from_name.clone(),
            },
            config.environment,
        )
    }

    pub fn subject(&self) -> &'static str {
        match self.environment {
            Environment::Development => STAGING_SUBJECT,
            Environment::Production => PRODUCTION_SUBJECT,
        }
    }

    pub fn compose(&self, report: &ErrorReport) -> EmailMessage {
        EmailMessage {
            to: self.recipients.clone(),
            from: self.from.clone(),
            subject: self.subject().to_string(),
            text: render_body(report),
        }
    }

    /// Best effort: delivery failures are logged and never returned.
    pub async fn notify(&self, report: &ErrorReport) {
        let message = self.compose(report);

        match self.sender.send(&message).await {
            Ok(()) => tracing::info!(api = %report.name, "Error email sent successfully."),
            Err(e) => tracing::error!(
                error = %e,
                api = %report.name,
                "Failed to send error email"
            ),
        }
    }
}

/// Plain-text alert body for operators
pub fn render_body(report: &ErrorReport) -> String {
    let status = report
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "An error occurred while accessing the Platinum API.\n\
         \n\
         API Name: {name}\n\
         Status: {status}\n\
         Error Message: {message}\n\
         \n\
         Request Details:\n\
         Method: {method}\n\
         URL: {url}\n\
         Headers: {headers}\n\
         Request Data: {request_data}\n\
         \n\
         Response Data: {response_data}\n",
        name = report.name,
        status = status,
        message = report.message,
        method = report.request_method.as_deref().unwrap_or("null"),
        url = report.request_url.as_deref().unwrap_or("null"),
        headers = pretty_json(&report.request_headers),
        request_data = pretty_json(&report.request_data),
        response_data = pretty_json(&report.response_data),
    )
}

fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}
