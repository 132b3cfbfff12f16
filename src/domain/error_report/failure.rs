use crate::error::AppError;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// What was sent (or about to be sent) when a provider call failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDetails {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl RequestDetails {
    pub fn new(method: &Method, url: impl Into<String>, headers: BTreeMap<String, String>) -> Self {
        Self {
            method: method.as_str().to_uppercase(),
            url: url.into(),
            headers,
        }
    }
}

/// A failed provider call, classified once at the HTTP boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The server answered with a non-2xx status
    Response {
        status: u16,
        status_text: String,
        body: Value,
        request: RequestDetails,
    },
    /// The request went out but nothing came back (timeout, DNS, refused connection)
    NoResponse { request: RequestDetails },
    /// The request could not be built, so it never left the client
    Request { message: String },
    /// Anything that is not an HTTP client failure
    Unexpected { message: Option<String> },
}

impl Failure {
    /// Failure for a response that arrived with an error status
    pub fn from_status(status: StatusCode, body: Value, request: RequestDetails) -> Self {
        Failure::Response {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
            request,
        }
    }

    /// Classify a `reqwest` error raised while sending a request
    pub fn from_transport(err: &reqwest::Error, request: RequestDetails) -> Self {
        if err.is_builder() {
            Failure::Request {
                message: err.to_string(),
            }
        } else {
            Failure::NoResponse { request }
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Failure::Request {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Failure::Unexpected {
            message: Some(message.into()),
        }
    }
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Failure::unexpected(err.to_string())
    }
}
