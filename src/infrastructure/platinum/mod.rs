mod client;
mod gateway;
mod members;
mod organisations;

pub use client::PlatinumClient;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of `PlatinumClient::fetch_contributions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributions {
    pub contributions: Value,
    pub contributions_profile: Value,
}
