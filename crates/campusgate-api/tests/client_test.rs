#![allow(clippy::unwrap_used)]

// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campusgate_api::types::{
    AlertSeverity, DeviceStatus, DeviceType, PolicyAction, PolicyCategory, PolicyCreate,
    PolicyUpdate,
};
use campusgate_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn policy_json(id: &str, name: &str, enabled: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "Blocks social platforms during class hours",
        "category": "social_media",
        "action": "block",
        "domains": ["facebook.com", "tiktok.com"],
        "keywords": ["feed"],
        "enabled": enabled,
        "priority": 1,
        "created_at": "2024-03-01T08:00:00Z",
        "updated_at": "2024-03-01T08:00:00Z"
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_stats() {
    let (server, client) = setup().await;

    let body = json!({
        "total_policies": 5,
        "active_policies": 4,
        "total_devices": 7,
        "active_devices": 6,
        "total_alerts": 12,
        "unresolved_alerts": 3,
        "blocked_requests_today": 1523,
        "allowed_requests_today": 45231
    });

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let stats = client.dashboard_stats().await.unwrap();

    assert_eq!(stats.total_policies, 5);
    assert_eq!(stats.active_policies, 4);
    assert_eq!(stats.unresolved_alerts, 3);
    assert_eq!(stats.blocked_requests_today, 1523);
}

#[tokio::test]
async fn test_list_policies() {
    let (server, client) = setup().await;

    let body = json!([
        policy_json("p1", "Block Social Media", true),
        policy_json("p2", "Block Streaming", false),
    ]);

    Mock::given(method("GET"))
        .and(path("/api/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let policies = client.list_policies().await.unwrap();

    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0].name, "Block Social Media");
    assert_eq!(policies[0].category, PolicyCategory::SocialMedia);
    assert_eq!(policies[0].action, PolicyAction::Block);
    assert!(policies[0].enabled);
    assert!(!policies[1].enabled);
}

#[tokio::test]
async fn test_get_policy() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/policies/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_json(
            "p1",
            "Block Social Media",
            true,
        )))
        .mount(&server)
        .await;

    let policy = client.get_policy("p1").await.unwrap();

    assert_eq!(policy.id, "p1");
    assert_eq!(policy.keywords, vec!["feed"]);
}

#[tokio::test]
async fn test_create_policy() {
    let (server, client) = setup().await;

    let id = Uuid::new_v4().to_string();

    Mock::given(method("POST"))
        .and(path("/api/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_json(
            &id,
            "Block Social Media",
            true,
        )))
        .mount(&server)
        .await;

    let req = PolicyCreate {
        name: "Block Social Media".into(),
        description: "Blocks social platforms during class hours".into(),
        category: PolicyCategory::SocialMedia,
        action: PolicyAction::Block,
        domains: vec!["facebook.com".into(), "tiktok.com".into()],
        keywords: vec!["feed".into()],
        enabled: true,
        priority: 1,
    };

    let policy = client.create_policy(&req).await.unwrap();

    assert_eq!(policy.id, id);
    assert_eq!(policy.domains.len(), 2);
    assert_eq!(policy.priority, 1);
}

#[tokio::test]
async fn test_update_policy_sends_only_enabled() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/policies/p1"))
        .and(body_json(json!({ "enabled": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_json(
            "p1",
            "Block Social Media",
            false,
        )))
        .mount(&server)
        .await;

    let policy = client
        .update_policy("p1", &PolicyUpdate::enabled(false))
        .await
        .unwrap();

    assert!(!policy.enabled);
}

#[tokio::test]
async fn test_delete_policy() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/policies/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Policy deleted successfully"
        })))
        .mount(&server)
        .await;

    client.delete_policy("p1").await.unwrap();
}

#[tokio::test]
async fn test_list_devices() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "d1",
            "name": "Main Gateway",
            "device_type": "firewall",
            "ip_address": "10.0.0.1",
            "location": "Server Room A",
            "description": "Primary campus firewall",
            "status": "active",
            "position": { "x": 400.0, "y": 100.0 },
            "connections": ["d2", "core-switch"],
            "created_at": "2024-01-15T09:00:00Z"
        },
        {
            "id": "d2",
            "name": "Core Switch",
            "device_type": "switch",
            "ip_address": "10.0.0.2",
            "location": "Server Room A",
            "description": "",
            "status": "warning",
            "created_at": "2024-01-15T09:05:00Z"
        },
    ]);

    Mock::given(method("GET"))
        .and(path("/api/network/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].device_type, DeviceType::Firewall);
    assert_eq!(devices[0].position.x, 400.0);
    assert_eq!(devices[0].connections, vec!["d2", "core-switch"]);
    assert_eq!(devices[1].status, DeviceStatus::Warning);
    assert!(devices[1].connections.is_empty());
}

#[tokio::test]
async fn test_list_alerts() {
    let (server, client) = setup().await;

    let body = json!([{
        "id": "a1",
        "title": "Blocked keyword hit",
        "description": "Repeated requests matching 'torrent'",
        "severity": "medium",
        "source_ip": "10.0.14.7",
        "destination": "tracker.example.net",
        "resolved": false,
        "created_at": "2024-03-02T09:00:00Z"
    }]);

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let alerts = client.list_alerts().await.unwrap();

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, AlertSeverity::Medium);
    assert!(alerts[0].policy_triggered.is_none());
    assert!(!alerts[0].resolved);
}

#[tokio::test]
async fn test_resolve_alert() {
    let (server, client) = setup().await;

    let body = json!({
        "id": "a1",
        "title": "Malware domain contacted",
        "description": "Endpoint attempted to reach a known C2 host",
        "severity": "critical",
        "source_ip": "10.0.12.44",
        "destination": "evil.example.com",
        "policy_triggered": "Malware Protection",
        "device_id": "d1",
        "resolved": true,
        "created_at": "2024-03-02T10:15:00Z",
        "resolved_at": "2024-03-02T10:30:00Z"
    });

    Mock::given(method("PUT"))
        .and(path("/api/alerts/a1/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let alert = client.resolve_alert("a1").await.unwrap();

    assert!(alert.resolved);
    assert!(alert.resolved_at.is_some());
    assert_eq!(alert.severity, AlertSeverity::Critical);
    assert_eq!(alert.policy_triggered.as_deref(), Some("Malware Protection"));
}

#[tokio::test]
async fn test_initialize_demo_data() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/demo/initialize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Demo data initialized"
        })))
        .mount(&server)
        .await;

    let resp = client.initialize_demo_data().await.unwrap();
    assert_eq!(resp["message"], "Demo data initialized");
}

// ── Error-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_surfaces_detail_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/policies/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "Policy not found" })),
        )
        .mount(&server)
        .await;

    let err = client.get_policy("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_transient());
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Policy not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_body_uses_status_line() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.list_alerts().await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_malformed_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client.dashboard_stats().await.unwrap_err();

    match err {
        Error::Deserialization { body, .. } => assert_eq!(body, "not json at all"),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_enum_value_is_rejected() {
    let (server, client) = setup().await;

    let mut bad = policy_json("p1", "Weird", true);
    bad["category"] = json!("cryptomining");

    Mock::given(method("GET"))
        .and(path("/api/policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([bad])))
        .mount(&server)
        .await;

    let err = client.list_policies().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}
