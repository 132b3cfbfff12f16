use super::client::{segment, ApiRequest, PlatinumClient};
use super::Contributions;
use crate::domain::error_report::Failure;
use crate::error::AppResult;
use reqwest::Method;
use serde_json::{json, Value};

impl PlatinumClient {
    /// POST /members
    pub async fn create_member(&self, data: &Value) -> AppResult<Value> {
        self.call(
            ApiRequest::core(Method::POST, "/members").json(data),
            "Create Member  /members",
            Some(data.clone()),
        )
        .await
    }

    /// GET /Members/{id} - member record, including its product status
    pub async fn fetch_member_status(&self, member_id: &str) -> AppResult<Value> {
        self.call(
            ApiRequest::core(Method::GET, format!("/Members/{}", segment(member_id))),
            "Fetch Member Status  /Members/plataniumMemberId",
            Some(json!({ "plataniumMemberId": member_id })),
        )
        .await
    }

    /// GET /Members/{id}/Transfers/In
    pub async fn fetch_transfers(&self, member_id: &str) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::GET,
                format!("/Members/{}/Transfers/In", segment(member_id)),
            ),
            "Fetch Transfers  /Transfers/In",
            Some(json!({ "memberId": member_id })),
        )
        .await
    }

    /// GET /Members/{id}/Transfers/In/{inId}/Transactions
    pub async fn fetch_transfers_in_transactions(
        &self,
        member_id: &str,
        in_id: &str,
    ) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::GET,
                format!(
                    "/Members/{}/Transfers/In/{}/Transactions",
                    segment(member_id),
                    segment(in_id)
                ),
            ),
            "fetch Transfers In Transactions  /Transfers/In/inId/Transactions",
            Some(json!({ "memberId": member_id, "inId": in_id })),
        )
        .await
    }

    /// GET /Members/{id}/Transfers/In/{inId}
    ///
    /// Returns `None` without calling the provider when `in_id` is empty.
    pub async fn fetch_single_transfer_in(
        &self,
        member_id: &str,
        in_id: &str,
    ) -> AppResult<Option<Value>> {
        if in_id.is_empty() {
            return Ok(None);
        }

        self.call(
            ApiRequest::core(
                Method::GET,
                format!(
                    "/Members/{}/Transfers/In/{}",
                    segment(member_id),
                    segment(in_id)
                ),
            ),
            "fetch Single Transactions In  /Transfers/In/inId",
            Some(json!({ "memberId": member_id, "inId": in_id })),
        )
        .await
        .map(Some)
    }

    /// GET /Members/{id}/Transfers/Out
    pub async fn fetch_transfer_out(&self, member_id: &str) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::GET,
                format!("/Members/{}/Transfers/Out", segment(member_id)),
            ),
            "Fetch Transfer Out  /Members/plataniumMemberId/Transfers/Out",
            Some(json!({ "plataniumMemberId": member_id })),
        )
        .await
    }

    /// Contributions and regular contribution profiles, fetched one after the other
    pub async fn fetch_contributions(&self, member_id: &str) -> AppResult<Contributions> {
        match self.fetch_contribution_parts(member_id).await {
            Ok(contributions) => Ok(contributions),
            Err(failure) => {
                self.report(
                    failure,
                    "Fetch Contributions  /Contributions",
                    Some(json!({ "memberId": member_id })),
                )
                .await
            }
        }
    }

    async fn fetch_contribution_parts(&self, member_id: &str) -> Result<Contributions, Failure> {
        let member = segment(member_id);

        let contributions = self
            .execute(ApiRequest::core(
                Method::GET,
                format!("/Members/{}/Contributions", member),
            ))
            .await?;
        let contributions_profile = self
            .execute(ApiRequest::core(
                Method::GET,
                format!("/Members/{}/RegularContributionProfiles", member),
            ))
            .await?;

        Ok(Contributions {
            contributions,
            contributions_profile,
        })
    }

    /// GET /Members/{id}/Detail/Personal
    ///
    /// Failures are logged and yield `None`; no alert is sent.
    pub async fn get_profile_info(&self, platinum_id: &str) -> Option<Value> {
        let request = ApiRequest::core(
            Method::GET,
            format!("/Members/{}/Detail/Personal", segment(platinum_id)),
        );

        match self.execute(request).await {
            Ok(profile) => Some(profile),
            Err(failure) => {
                tracing::warn!(
                    platinum_id = %platinum_id,
                    failure = ?failure,
                    "Failed to fetch Platinum profile info"
                );
                None
            }
        }
    }

    /// PATCH /Members/{id}/Detail/Personal
    ///
    /// Sends `data.ConcurrencyToken` as `If-Match` when present.
    pub async fn update_profile_info(&self, platinum_id: &str, data: &Value) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::PATCH,
                format!("/Members/{}/Detail/Personal", segment(platinum_id)),
            )
            .json(data)
            .if_match(concurrency_token(data)),
            "update Profile Info  /Detail/Personal",
            Some(json!({ "platinumId": platinum_id, "data": data })),
        )
        .await
    }

    /// GET /Members/{id}/NominatedBeneficiaries
    pub async fn get_beneficiaries(&self, platinum_id: &str) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::GET,
                format!("/Members/{}/NominatedBeneficiaries", segment(platinum_id)),
            ),
            "Beneficiaries  /NominatedBeneficiaries",
            Some(json!({ "platinumId": platinum_id })),
        )
        .await
    }

    /// POST /members/{id}/contributions/cash
    pub async fn add_new_contribution(&self, platinum_id: &str, data: &Value) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::POST,
                format!("/members/{}/contributions/cash", segment(platinum_id)),
            )
            .json(data),
            "Add New Contribution  /contributions/cash",
            Some(json!({ "platinumId": platinum_id, "data": data })),
        )
        .await
    }

    /// GET /members/{id}/plans
    pub async fn get_member_plans(&self, platinum_id: &str) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::GET,
                format!("/members/{}/plans", segment(platinum_id)),
            ),
            "Get Member Plan FK  /members/platinumID/plans",
            Some(json!({ "platinumId": platinum_id })),
        )
        .await
    }

    /// GET /members/{id}/KeyContacts
    pub async fn get_key_contacts(&self, member_id: &str) -> AppResult<Value> {
        self.call(
            ApiRequest::core(
                Method::GET,
                format!("/members/{}/KeyContacts", segment(member_id)),
            ),
            "Get Key Contacts  /members/platinumID/KeyContacts",
            Some(json!({ "memberId": member_id })),
        )
        .await
    }
}

/// Optimistic-concurrency token carried in an update payload
fn concurrency_token(data: &Value) -> Option<String> {
    match data.get("ConcurrencyToken")? {
        Value::Null => None,
        Value::String(token) => Some(token.clone()),
        other => Some(other.to_string()),
    }
}
