use super::client::{segment, ApiRequest, PlatinumClient};
use crate::error::AppResult;
use reqwest::Method;
use serde_json::{json, Value};

const DATAQUERY_MEMBERS_PATH: &str = "/external/dataquery/odata/Members";
const INVESTMENT_PORTFOLIO_PATH: &str = "/external/datacommand/Investment/Type/3/Portfolio";

impl PlatinumClient {
    /// POST investment type 3 portfolio through the gateway data command API
    pub async fn post_investment_type_portfolio(&self, data: &Value) -> AppResult<Value> {
        self.call(
            ApiRequest::gateway(Method::POST, INVESTMENT_PORTFOLIO_PATH).json(data),
            "POST investment type 3 porfolio /external/datacommand/Investment/Type/3/Portfolio",
            None,
        )
        .await
    }

    pub async fn get_member_adviser_relations(&self, member_id: &str) -> AppResult<Value> {
        self.member_query(
            member_id,
            "Relations",
            "Get Member Adviser Relation /external/dataquery/odata/Members/{key}/Relations",
            json!({ "memberId": member_id }),
        )
        .await
        .map(odata_value)
    }

    pub async fn get_member_fund_split(&self, member_id: &str) -> AppResult<Value> {
        self.member_query(
            member_id,
            "FundSplit",
            "Get Member Fund Split  /external/dataquery/odata/Members/memberId/FundSplit",
            json!({ "memberId": member_id }),
        )
        .await
    }

    pub async fn get_crystallisation_history(&self, member_id: &str) -> AppResult<Value> {
        self.member_query(
            member_id,
            "CrystallisationEvents",
            "Get Crystallisation History  /external/dataquery/odata/Members/memberId/CrystallisationEvents",
            json!({ "memberId": member_id }),
        )
        .await
    }

    /// GET Members({id})/Valuation, addressed by OData key syntax
    pub async fn fetch_valuation(&self, member_id: &str) -> AppResult<Value> {
        self.call(
            ApiRequest::gateway(
                Method::GET,
                format!("{}({})/Valuation", DATAQUERY_MEMBERS_PATH, segment(member_id)),
            ),
            "Fetch Valuation  /external/dataquery/odata/Members(memberId)/Valuation",
            Some(json!({ "memberId": member_id })),
        )
        .await
    }

    pub async fn get_money_in_money_out(&self, member_id: &str) -> AppResult<Value> {
        self.member_query(
            member_id,
            "MoneyInOut",
            "Get Money In Money Out  /external/dataquery/odata/Members/plataniumMemberId/MoneyInOut",
            json!({ "plataniumMemberId": member_id }),
        )
        .await
    }

    pub async fn get_bank_accounts(&self, member_id: &str) -> AppResult<Value> {
        self.member_query(
            member_id,
            "BankAccounts",
            "get Bank Accounts  /external/dataquery/odata/Members/plataniumMemberId/BankAccounts",
            json!({ "plataniumMemberId": member_id }),
        )
        .await
        .map(odata_value)
    }

    /// Current holdings of the member's portfolio
    pub async fn get_portfolio_data(&self, member_id: &str) -> AppResult<Value> {
        self.member_query(
            member_id,
            "Holdings",
            "Get Portfolio Data  /external/dataquery/odata/Members/plataniumMemberId/Holdings",
            json!({ "plataniumMemberId": member_id }),
        )
        .await
        .map(odata_value)
    }

    pub async fn fetch_plans_withdrawals(&self, member_id: &str) -> AppResult<Value> {
        self.member_query(
            member_id,
            "Plans",
            "Fetch Plans Withdrawals  /external/dataquery/odata/Members/memeberId/Plans",
            json!({ "plataniumMemberId": member_id }),
        )
        .await
        .map(odata_value)
    }

    /// GET /external/dataquery/odata/Members/{id}/{resource}
    async fn member_query(
        &self,
        member_id: &str,
        resource: &str,
        name: &str,
        request_data: Value,
    ) -> AppResult<Value> {
        self.call(
            ApiRequest::gateway(
                Method::GET,
                format!("{}/{}/{}", DATAQUERY_MEMBERS_PATH, segment(member_id), resource),
            ),
            name,
            Some(request_data),
        )
        .await
    }
}

/// Unwrap the `value` array of an OData list response
fn odata_value(body: Value) -> Value {
    match body {
        Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
