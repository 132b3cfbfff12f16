use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const NO_RESPONSE_MESSAGE: &str =
    "No response received from the server. Possible server down or network issue.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error occurred";

/// Normalized record of one failed provider call.
///
/// Every field is always serialized; unknown values come out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub name: String,
    pub status: Option<u16>,
    pub message: String,
    pub response_data: Option<Value>,
    pub request_data: Option<Value>,
    pub request_headers: Option<BTreeMap<String, String>>,
    pub request_method: Option<String>,
    pub request_url: Option<String>,
}

impl ErrorReport {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: None,
            message: message.into(),
            response_data: None,
            request_data: None,
            request_headers: None,
            request_method: None,
            request_url: None,
        }
    }
}
