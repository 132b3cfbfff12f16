use crate::helpers::{TestContext, TEST_TOKEN};

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

#[tokio::test]
async fn it_should_create_member_with_bearer_token() {
    let ctx = TestContext::new().await;
    let member = json!({"FirstName": "Ada", "LastName": "Lovelace"});

    Mock::given(method("POST"))
        .and(path("/members"))
        .and(header("authorization", bearer().as_str()))
        .and(body_json(&member))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"Id": 1001})))
        .expect(1)
        .mount(&ctx.core)
        .await;

    let created = ctx.client.create_member(&member).await.unwrap();

    assert_eq!(created, json!({"Id": 1001}));
    assert!(ctx.emails.sent().is_empty());
}

#[tokio::test]
async fn it_should_report_missing_member() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/Members/404404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"title": "Not Found"})))
        .expect(1)
        .mount(&ctx.core)
        .await;

    let err = ctx.client.fetch_member_status("404404").await.unwrap_err();

    assert!(err.is_platinum());
    assert_eq!(err.to_string(), "HTTP 404: Not Found");

    let email = ctx.emails.only_message();
    assert!(email.text.contains("API Name: Fetch Member Status  /Members/plataniumMemberId"));
    assert!(email.text.contains("Status: 404\n"));
    assert!(email.text.contains("Error Message: HTTP 404: Not Found"));
    assert!(email.text.contains("Method: GET"));
    assert!(email
        .text
        .contains(&format!("URL: {}/Members/404404", ctx.core.uri())));
    assert!(email.text.contains("\"plataniumMemberId\": \"404404\""));
    assert!(email.text.contains("\"title\": \"Not Found\""));
}

#[tokio::test]
async fn it_should_fetch_transfers_in() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/Members/7/Transfers/In"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"Id": 3}])))
        .mount(&ctx.core)
        .await;
    Mock::given(method("GET"))
        .and(path("/Members/7/Transfers/In/3/Transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"Amount": 250.0}])))
        .mount(&ctx.core)
        .await;

    assert_eq!(ctx.client.fetch_transfers("7").await.unwrap(), json!([{"Id": 3}]));
    assert_eq!(
        ctx.client.fetch_transfers_in_transactions("7", "3").await.unwrap(),
        json!([{"Amount": 250.0}])
    );
}

#[tokio::test]
async fn it_should_fetch_contributions_and_profiles() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/Members/7/Contributions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"Amount": 100}])))
        .expect(1)
        .mount(&ctx.core)
        .await;
    Mock::given(method("GET"))
        .and(path("/Members/7/RegularContributionProfiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"Frequency": "Monthly"}])))
        .expect(1)
        .mount(&ctx.core)
        .await;

    let result = ctx.client.fetch_contributions("7").await.unwrap();

    assert_eq!(result.contributions, json!([{"Amount": 100}]));
    assert_eq!(result.contributions_profile, json!([{"Frequency": "Monthly"}]));
}

#[tokio::test]
async fn it_should_report_second_contribution_call_failure() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/Members/7/Contributions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.core)
        .await;
    Mock::given(method("GET"))
        .and(path("/Members/7/RegularContributionProfiles"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ctx.core)
        .await;

    let err = ctx.client.fetch_contributions("7").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    let email = ctx.emails.only_message();
    assert!(email.text.contains("API Name: Fetch Contributions  /Contributions"));
    assert!(email.text.contains("/Members/7/RegularContributionProfiles"));
    assert!(email.text.contains("Response Data: null"));
}

#[tokio::test]
async fn it_should_skip_single_transfer_without_id() {
    let ctx = TestContext::new().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.core)
        .await;

    let result = ctx.client.fetch_single_transfer_in("7", "").await.unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn it_should_fetch_single_transfer() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/Members/7/Transfers/In/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": 3})))
        .mount(&ctx.core)
        .await;

    let result = ctx.client.fetch_single_transfer_in("7", "3").await.unwrap();

    assert_eq!(result, Some(json!({"Id": 3})));
}

#[tokio::test]
async fn it_should_swallow_profile_info_failure() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/Members/7/Detail/Personal"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&ctx.core)
        .await;

    assert_eq!(ctx.client.get_profile_info("7").await, None);
    assert!(ctx.emails.sent().is_empty());
}

#[tokio::test]
async fn it_should_update_profile_with_concurrency_token() {
    let ctx = TestContext::new().await;
    let update = json!({"ConcurrencyToken": "abc123", "Email": "ada@example.com"});

    Mock::given(method("PATCH"))
        .and(path("/Members/7/Detail/Personal"))
        .and(header("if-match", "abc123"))
        .and(header("authorization", bearer().as_str()))
        .and(body_json(&update))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ConcurrencyToken": "abc124"})))
        .expect(1)
        .mount(&ctx.core)
        .await;

    let updated = ctx.client.update_profile_info("7", &update).await.unwrap();

    assert_eq!(updated, json!({"ConcurrencyToken": "abc124"}));
}

#[tokio::test]
async fn it_should_report_stale_concurrency_token() {
    let ctx = TestContext::new().await;
    let update = json!({"ConcurrencyToken": "stale"});

    Mock::given(method("PATCH"))
        .and(path("/Members/7/Detail/Personal"))
        .respond_with(ResponseTemplate::new(412))
        .mount(&ctx.core)
        .await;

    let err = ctx.client.update_profile_info("7", &update).await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 412: Precondition Failed");
    let email = ctx.emails.only_message();
    assert!(email.text.contains("Method: PATCH"));
    assert!(email.text.contains("\"If-Match\": \"stale\""));
    assert!(email.text.contains("\"platinumId\": \"7\""));
}

#[tokio::test]
async fn it_should_call_remaining_member_endpoints() {
    let ctx = TestContext::new().await;

    for (route, body) in [
        ("/Members/7/NominatedBeneficiaries", json!([{"Name": "Charles"}])),
        ("/members/7/plans", json!([{"PlanId": 11}])),
        ("/members/7/KeyContacts", json!([{"Role": "Adviser"}])),
        ("/Members/7/Transfers/Out", json!([{"Id": 9}])),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", bearer().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&ctx.core)
            .await;
    }

    assert_eq!(
        ctx.client.get_beneficiaries("7").await.unwrap(),
        json!([{"Name": "Charles"}])
    );
    assert_eq!(ctx.client.get_member_plans("7").await.unwrap(), json!([{"PlanId": 11}]));
    assert_eq!(
        ctx.client.get_key_contacts("7").await.unwrap(),
        json!([{"Role": "Adviser"}])
    );
    assert_eq!(ctx.client.fetch_transfer_out("7").await.unwrap(), json!([{"Id": 9}]));
}

#[tokio::test]
async fn it_should_add_cash_contribution() {
    let ctx = TestContext::new().await;
    let contribution = json!({"Amount": 500, "Source": "Personal"});

    Mock::given(method("POST"))
        .and(path("/members/7/contributions/cash"))
        .and(body_json(&contribution))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"Id": 55})))
        .expect(1)
        .mount(&ctx.core)
        .await;

    let created = ctx.client.add_new_contribution("7", &contribution).await.unwrap();

    assert_eq!(created, json!({"Id": 55}));
}

#[tokio::test]
async fn it_should_label_transfer_out_failures_without_placeholders() {
    let ctx = TestContext::new().await;

    Mock::given(method("GET"))
        .and(path("/Members/7/Transfers/Out"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&ctx.core)
        .await;

    let err = ctx.client.fetch_transfer_out("7").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    let email = ctx.emails.only_message();
    assert!(email
        .text
        .contains("API Name: Fetch Transfer Out  /Members/plataniumMemberId/Transfers/Out"));
    assert!(!email.text.contains("${"));
}
