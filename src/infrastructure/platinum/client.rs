use crate::domain::error_report::{EmailNotifier, ErrorReporter, Failure, RequestDetails};
use crate::error::AppResult;
use crate::infrastructure::config::Config;
use crate::infrastructure::email::SendGridEmailSender;
use crate::infrastructure::token_store::TokenStore;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

const GATEWAY_API_VERSION: &str = "1.0";

/// Which provider API a request targets; decides the auth scheme
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Api {
    /// Bearer token from the token store
    Core,
    /// Subscription key plus `api-version` query parameter
    Gateway,
}

/// One outbound provider request, relative to the API's base URL
pub(super) struct ApiRequest<'a> {
    api: Api,
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<&'a Value>,
    if_match: Option<String>,
}

impl<'a> ApiRequest<'a> {
    pub(super) fn core(method: Method, path: impl Into<String>) -> Self {
        Self {
            api: Api::Core,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            if_match: None,
        }
    }

    pub(super) fn gateway(method: Method, path: impl Into<String>) -> Self {
        Self {
            api: Api::Gateway,
            method,
            path: path.into(),
            query: vec![("api-version", GATEWAY_API_VERSION.to_string())],
            body: None,
            if_match: None,
        }
    }

    pub(super) fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub(super) fn json(mut self, body: &'a Value) -> Self {
        self.body = Some(body);
        self
    }

    pub(super) fn if_match(mut self, token: Option<String>) -> Self {
        self.if_match = token;
        self
    }
}

/// Client for the provider's core and gateway APIs.
///
/// Every failed call is reported through the shared `ErrorReporter` before
/// the simplified error is returned.
pub struct PlatinumClient {
    core_base_url: String,
    gateway_base_url: String,
    subscription_key: String,
    http_client: reqwest::Client,
    token_store: Arc<dyn TokenStore>,
    reporter: Arc<ErrorReporter>,
}

impl PlatinumClient {
    pub fn new(config: &Config, token_store: Arc<dyn TokenStore>, reporter: Arc<ErrorReporter>) -> Self {
        Self {
            core_base_url: config.core_base_url.clone(),
            gateway_base_url: config.gateway_base_url.clone(),
            subscription_key: config.subscription_key.clone(),
            http_client: reqwest::Client::new(),
            token_store,
            reporter,
        }
    }

    /// Wire the client with SendGrid alerting as configured
    pub fn from_config(config: &Config, token_store: Arc<dyn TokenStore>) -> Self {
        let sender = Arc::new(SendGridEmailSender::new(
            config.sendgrid_api_key.clone(),
            config.sendgrid_base_url.clone(),
        ));
        let reporter = Arc::new(ErrorReporter::new(EmailNotifier::from_config(config, sender)));

        Self::new(config, token_store, reporter)
    }

    /// Replace the underlying HTTP client, e.g. to set timeouts
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Perform a request and report any failure under `name`
    pub(super) async fn call(
        &self,
        request: ApiRequest<'_>,
        name: &str,
        request_data: Option<Value>,
    ) -> AppResult<Value> {
        match self.execute(request).await {
            Ok(body) => Ok(body),
            Err(failure) => Err(self.reporter.report(failure, name, request_data).await),
        }
    }

    /// Report a failure that was classified outside `call`
    pub(super) async fn report<T>(
        &self,
        failure: Failure,
        name: &str,
        request_data: Option<Value>,
    ) -> AppResult<T> {
        Err(self.reporter.report(failure, name, request_data).await)
    }

    /// Perform a request without reporting, classifying any failure
    pub(super) async fn execute(&self, request: ApiRequest<'_>) -> Result<Value, Failure> {
        let base_url = match request.api {
            Api::Core => &self.core_base_url,
            Api::Gateway => &self.gateway_base_url,
        };
        let url = build_url(base_url, &request.path, &request.query)?;

        let mut headers = BTreeMap::new();
        match request.api {
            Api::Core => {
                let token = self.token_store.access_token().await?;
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
            Api::Gateway => {
                headers.insert(
                    "Ocp-Apim-Subscription-Key".to_string(),
                    self.subscription_key.clone(),
                );
            }
        }
        if let Some(token) = request.if_match {
            headers.insert("If-Match".to_string(), token);
        }
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let details = RequestDetails::new(&request.method, url.as_str(), headers.clone());
        let header_map = to_header_map(&headers)?;

        tracing::debug!(
            method = %details.method,
            url = %details.url,
            "Calling Platinum API"
        );

        let mut builder = self
            .http_client
            .request(request.method, url)
            .headers(header_map);
        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Failure::from_transport(&e, details.clone()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, url = %details.url, "Response body could not be read");
            Failure::NoResponse {
                request: details.clone(),
            }
        })?;
        let body = parse_body(&text);

        if !status.is_success() {
            return Err(Failure::from_status(status, body, details));
        }

        Ok(body)
    }
}

fn build_url(base_url: &str, path: &str, query: &[(&'static str, String)]) -> Result<Url, Failure> {
    let raw = format!("{}{}", base_url.trim_end_matches('/'), path);
    let mut url = Url::parse(&raw).map_err(|e| Failure::request(e.to_string()))?;

    if !query.is_empty() {
        let encoded = query
            .iter()
            .map(|(key, value)| format!("{}={}", query_component(key), query_component(value)))
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&encoded));
    }

    Ok(url)
}

/// Percent-encode a query key or value the way JavaScript HTTP clients do:
/// `$`, `:` and friends stay readable and spaces become `+`. For http(s) URLs
/// the URL parser still escapes `'` as `%27`.
fn query_component(raw: &str) -> String {
    const KEPT: [(&str, &str); 10] = [
        ("%20", "+"),
        ("%24", "$"),
        ("%27", "'"),
        ("%3A", ":"),
        ("%2C", ","),
        ("%5B", "["),
        ("%5D", "]"),
        ("%21", "!"),
        ("%28", "("),
        ("%29", ")"),
    ];

    KEPT.iter()
        .fold(urlencoding::encode(raw).into_owned(), |encoded, (escaped, kept)| {
            encoded.replace(escaped, kept)
        })
}

fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, Failure> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Failure::request(format!("invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Failure::request(format!("invalid value for header {}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// JSON when possible, a JSON string otherwise, `null` for an empty body
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Percent-encode an identifier for use as a path segment
pub(super) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
