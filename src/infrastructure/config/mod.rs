use serde::Deserialize;
use std::env;

const DEFAULT_SENDGRID_API_URL: &str = "https://api.sendgrid.com";
const DEFAULT_ALERT_FROM_NAME: &str = "MES Pensions";

/// Keys holding the operator addresses that receive failure alerts
const ALERT_RECIPIENT_KEYS: [&str; 3] = [
    "PLATINUM_API_ERROR_EMAIL_1",
    "PLATINUM_API_ERROR_EMAIL_2",
    "PLATINUM_API_ERROR_EMAIL_3",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Provider APIs
    pub core_base_url: String,
    pub gateway_base_url: String,
    pub subscription_key: String,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Alert email
    pub sendgrid_api_key: String,
    pub sendgrid_base_url: String,
    pub alert_recipients: Vec<String>,
    pub alert_from_email: String,
    pub alert_from_name: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Missing keys fall back to
    /// their defaults; empty base URLs surface later as request errors.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Config {
            core_base_url: get("PLATINUM_API_ENDPOINT", ""),
            gateway_base_url: get("PLATINUM_API_GATEWAY_BASE_URL", ""),
            subscription_key: get("OCP_APIM_SUBSCRIPTION_KEY", ""),
            environment: match get("NODE_ENV", "").as_str() {
                "development" => Environment::Development,
                _ => Environment::Production,
            },
            log_format: match get("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            sendgrid_api_key: get("SENDGRID_API_KEY2", ""),
            sendgrid_base_url: get("SENDGRID_API_URL", DEFAULT_SENDGRID_API_URL),
            alert_recipients: ALERT_RECIPIENT_KEYS
                .iter()
                .filter_map(|key| lookup(*key))
                .filter(|address| !address.trim().is_empty())
                .collect(),
            alert_from_email: get("FROM_MAIL2", ""),
            alert_from_name: get("ALERT_FROM_NAME", DEFAULT_ALERT_FROM_NAME),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
