use super::failure::Failure;
use super::model::{ErrorReport, NO_RESPONSE_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
use super::notifier::EmailNotifier;
use crate::error::AppError;
use serde_json::Value;

/// Turns failed provider calls into error reports, alerts operators and
/// hands back the simplified error for the caller.
pub struct ErrorReporter {
    notifier: EmailNotifier,
}

impl ErrorReporter {
    pub fn new(notifier: EmailNotifier) -> Self {
        Self { notifier }
    }

    /// Build the report for a failure without any side effects
    pub fn classify(failure: Failure, name: &str, request_data: Option<Value>) -> ErrorReport {
        let mut report = ErrorReport::new(name, String::new());
        report.request_data = request_data.filter(|data| !is_falsy(data));

        match failure {
            Failure::Response {
                status,
                status_text,
                body,
                request,
            } => {
                report.status = Some(status);
                report.message = format!("HTTP {}: {}", status, status_text);
                report.response_data = Some(body);
                report.request_headers = Some(request.headers);
                report.request_method = Some(request.method);
                report.request_url = Some(request.url);
            }
            Failure::NoResponse { request } => {
                report.message = NO_RESPONSE_MESSAGE.to_string();
                report.request_headers = Some(request.headers);
                report.request_method = Some(request.method);
                report.request_url = Some(request.url);
            }
            Failure::Request { message } => {
                report.message = format!("Request error: {}", message);
            }
            Failure::Unexpected { message } => {
                report.message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string());
            }
        }

        report
    }

    /// Log the failure, attempt the alert email, and return the error to raise.
    ///
    /// The returned error carries only the classified message, whether or not
    /// the email went out.
    pub async fn report(&self, failure: Failure, name: &str, request_data: Option<Value>) -> AppError {
        let report = Self::classify(failure, name, request_data);

        tracing::error!(
            api = %report.name,
            status = ?report.status,
            message = %report.message,
            method = ?report.request_method,
            url = ?report.request_url,
            report = ?report,
            "Platinum API error"
        );

        self.notifier.notify(&report).await;

        AppError::Platinum(report.message)
    }
}

/// Request data that carries nothing is reported as absent
fn is_falsy(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
