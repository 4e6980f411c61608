//! End-to-end tests for the status and whoami endpoints.

use std::net::SocketAddr;

use gateway_status::config::{GatewayConfig, NodeConfig};
use reqwest::StatusCode;
use serde_json::Value;

mod common;

fn config(media: &[SocketAddr]) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.nodes = vec![
        NodeConfig { name: "n1".into(), address: "http://n1:5279".into() },
        NodeConfig { name: "n2".into(), address: "http://n2:5279".into() },
    ];
    config.status.media_servers = media.iter().map(|a| format!("http://{}", a)).collect();
    config.status.probe_timeout_ms = 500;
    config
}

async fn get_status(gateway: &common::TestGateway) -> (StatusCode, Value) {
    let res = common::client()
        .get(gateway.url("/status"))
        .send()
        .await
        .expect("gateway unreachable");
    let status = res.status();
    assert_eq!(
        res.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    (status, res.json().await.unwrap())
}

fn statuses(body: &Value, group: &str) -> Vec<String> {
    body["services"][group]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["status"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_all_media_servers_idle() {
    let p1 = common::start_media_server(404).await;
    let p2 = common::start_media_server(404).await;
    let gateway = common::start_gateway(config(&[p1, p2])).await;

    let (status, body) = get_status(&gateway).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["general_state"], "ok");
    assert_eq!(statuses(&body, "lbrynet"), vec!["ok", "ok"]);
    assert_eq!(statuses(&body, "player"), vec!["ok", "ok"]);
    assert!(body["services"]["player"][0].get("error").is_none());
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_silent_media_server_is_offline() {
    let p1 = common::start_media_server(404).await;
    let p2 = common::start_silent_server().await;
    let p3 = common::start_media_server(404).await;
    let gateway = common::start_gateway(config(&[p1, p2, p3])).await;

    let (status, body) = get_status(&gateway).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["general_state"], "failing");
    assert_eq!(statuses(&body, "player"), vec!["ok", "offline", "ok"]);
    assert_eq!(statuses(&body, "lbrynet"), vec!["ok", "ok"]);

    let offline = &body["services"]["player"][1];
    assert_eq!(offline["address"], format!("http://{}", p2));
    assert!(!offline["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unexpected_success_is_not_ready() {
    let p1 = common::start_media_server(200).await;
    let p2 = common::start_media_server(404).await;
    let gateway = common::start_gateway(config(&[p1, p2])).await;

    let (status, body) = get_status(&gateway).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["general_state"], "failing");
    assert_eq!(statuses(&body, "player"), vec!["not_ready", "ok"]);
    assert!(body["services"]["player"][0]["error"]
        .as_str()
        .unwrap()
        .contains("200"));
}

#[tokio::test]
async fn test_refused_connection_is_offline() {
    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let gateway = common::start_gateway(config(&[closed])).await;

    let (status, body) = get_status(&gateway).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(statuses(&body, "player"), vec!["offline"]);
}

#[tokio::test]
async fn test_concurrent_requests_get_consistent_snapshots() {
    let p1 = common::start_media_server(404).await;
    let p2 = common::start_media_server(500).await;
    let gateway = common::start_gateway(config(&[p1, p2])).await;

    let (a, b) = tokio::join!(get_status(&gateway), get_status(&gateway));

    for (status, body) in [&a, &b] {
        assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["general_state"], "failing");
        assert_eq!(statuses(body, "lbrynet"), vec!["ok", "ok"]);
        assert_eq!(statuses(body, "player"), vec!["ok", "not_ready"]);
    }
    // Both were served from the same cycle.
    assert_eq!(a.1["timestamp"], b.1["timestamp"]);
}

#[tokio::test]
async fn test_snapshot_is_cached_between_requests() {
    let p1 = common::start_media_server(404).await;
    let gateway = common::start_gateway(config(&[p1])).await;

    let (_, first) = get_status(&gateway).await;
    let (_, second) = get_status(&gateway).await;
    assert_eq!(first["timestamp"], second["timestamp"]);
}

#[tokio::test]
async fn test_whoami_echoes_forwarding_headers() {
    let gateway = common::start_gateway(config(&[])).await;

    let res = common::client()
        .get(gateway.url("/whoami"))
        .header("X-Forwarded-For", "1.2.3.4")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["X-Forwarded-For"], "1.2.3.4");
    assert_eq!(body["X-Real-Ip"], "");
    assert!(body["ip"].as_str().unwrap().starts_with("127.0.0.1:"));
}

#[tokio::test]
async fn test_membership_change_visible_after_window() {
    let mut config = config(&[]);
    config.status.cache_validity_secs = 1;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = gateway_status::HttpServer::new(config);
    let nodes = server.nodes();
    let shutdown = gateway_status::Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    let gateway = common::TestGateway { addr, shutdown };

    let (_, before) = get_status(&gateway).await;
    assert_eq!(statuses(&before, "lbrynet").len(), 2);

    nodes.replace(vec![gateway_status::nodes::Node::new("n3", "http://n3:5279")]);

    // Still inside the window: old membership.
    let (_, cached) = get_status(&gateway).await;
    assert_eq!(cached["timestamp"], before["timestamp"]);
    assert_eq!(statuses(&cached, "lbrynet").len(), 2);

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let (_, after) = get_status(&gateway).await;
    assert_ne!(after["timestamp"], before["timestamp"]);
    assert_eq!(after["services"]["lbrynet"][0]["address"], "http://n3:5279");
}
