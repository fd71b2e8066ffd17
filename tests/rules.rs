//! Rule browsing tests against the mock controller.

use serde_json::{json, Value};

use clash_dash::rules::RuleListItem;
use clash_dash::{ControllerClient, RuleBrowser};

mod common;
use common::{sample_config, MockController};

fn rules() -> Value {
    json!([
        { "type": "DomainSuffix", "payload": "google.com", "proxy": "Proxy", "size": -1 },
        { "type": "RuleSet", "payload": "ads/cn", "proxy": "REJECT", "size": 2 },
        { "type": "RuleSet", "payload": "unknown", "proxy": "DIRECT" },
        { "type": "Match", "payload": "", "proxy": "DIRECT" }
    ])
}

fn providers() -> Value {
    json!({
        "ads/cn": {
            "name": "ads/cn",
            "type": "Rule",
            "behavior": "Domain",
            "ruleCount": 2,
            "updatedAt": "2024-12-19T10:00:00Z",
            "vehicleType": "HTTP"
        }
    })
}

#[tokio::test]
async fn test_fetch_data_joins_providers() {
    let mock = MockController::start(sample_config()).await;
    mock.set_rules(rules(), providers());
    let browser = RuleBrowser::new(ControllerClient::new());

    browser.fetch_data(&mock.server()).await;

    let book = browser.book();
    let items = book.items();
    assert_eq!(items.len(), 4);
    assert!(matches!(items[0], RuleListItem::Plain(_)));
    assert_eq!(items[1].provider().unwrap().rule_count, 2);
    assert!(items[2].provider().is_none());
    assert_eq!(items[3].rule().display_payload(), "-");
}

#[tokio::test]
async fn test_refresh_provider_refetches() {
    let mock = MockController::start(sample_config()).await;
    mock.set_rules(rules(), providers());
    let browser = RuleBrowser::new(ControllerClient::new());
    let mut rx = browser.subscribe();

    browser.refresh_provider("ads/cn", &mock.server()).await;

    assert!(rx.has_changed().unwrap());
    let book = rx.borrow_and_update().clone();
    assert_eq!(book.providers["ads/cn"].updated_at.as_deref(), Some("refreshed"));

    let requests = mock.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/providers/rules/ads%2Fcn");
    assert_eq!(requests[0].body, json!({}));
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_unknown_provider_does_not_refetch() {
    let mock = MockController::start(sample_config()).await;
    mock.set_rules(rules(), providers());
    let browser = RuleBrowser::new(ControllerClient::new());

    let err = browser
        .try_refresh_provider("missing", &mock.server())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_book() {
    let mock = MockController::start(sample_config()).await;
    mock.set_rules(rules(), providers());
    let browser = RuleBrowser::new(ControllerClient::new());
    browser.fetch_data(&mock.server()).await;

    mock.fail_with(503);
    browser.fetch_data(&mock.server()).await;

    assert_eq!(browser.book().rules.len(), 4);
}
