use super::client::{ApiRequest, PlatinumClient};
use crate::error::AppResult;
use reqwest::Method;
use serde_json::{json, Value};

const ORGANISATIONS_PATH: &str = "/relationshipmanagement/organisations";

impl PlatinumClient {
    /// POST /relationshipmanagement/organisations
    pub async fn create_organisation(&self, data: &Value) -> AppResult<Value> {
        self.call(
            ApiRequest::core(Method::POST, ORGANISATIONS_PATH).json(data),
            "Create Organisation  /relationshipmanagement/organisations",
            Some(data.clone()),
        )
        .await
    }

    /// GET /relationshipmanagement/organisations/{id}/roles
    pub async fn get_organisation_information(&self, organisation_id: i64) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::GET,
                format!("{}/{}/roles", ORGANISATIONS_PATH, organisation_id),
            ),
            "Get Organization Information  /relationshipmanagement/organisations/organisationId/roles",
            Some(json!({ "organisationId": organisation_id })),
        )
        .await
    }

    /// Whether no organisation is registered under `name`.
    ///
    /// Looks up at most one organisation with that exact name.
    pub async fn is_organisation_name_available(&self, name: &str) -> AppResult<bool> {
        let filter = format!("Name eq '{}'", name.replace('\'', "''"));

        let body = self
            .call(
                ApiRequest::core(Method::GET, ORGANISATIONS_PATH)
                    .query("$filter", filter)
                    .query("$top", "1"),
                "Is Organization Name Available  /relationshipmanagement/organisations",
                Some(json!({ "orgName": name })),
            )
            .await?;

        Ok(result_count(&body) == 0)
    }
}

/// Number of records in a list response, bare array or OData `value` envelope
fn result_count(body: &Value) -> usize {
    match body {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .get("value")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        _ => 0,
    }
}
