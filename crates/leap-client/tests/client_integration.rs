//! End-to-end tests of the request pipeline against a mock node.
//!
//! These tests verify:
//! - Both endpoints decode into typed models
//! - The `Host` header never carries the port, and an override always wins
//! - Error responses are classified as structured or generic
//! - Cancellation and timeouts resolve promptly even if the server stalls

use std::time::{Duration, Instant};

use chrono::{TimeZone, Utc};
use leap_client::{CancellationToken, Error, LeapClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INFO_BODY: &str = r#"{
    "server_version": "d1bc8d3",
    "server_version_string": "v3.2.4",
    "server_full_version_string": "v3.2.4-d1bc8d3c6d1cf3ca1e4a7d7b0e4c9e1b2f7a0c11",
    "chain_id": "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906",
    "head_block_id": "000022b8d3e4c6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1",
    "head_block_num": 8888,
    "head_block_time": "2018-01-01T13:37:01",
    "head_block_producer": "eosproducer1",
    "last_irreversible_block_num": 8560,
    "last_irreversible_block_id": "00002170d3e4c6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1",
    "virtual_block_cpu_limit": 200000000,
    "virtual_block_net_limit": 1048576000,
    "block_cpu_limit": 199900,
    "block_net_limit": 1048576,
    "fork_db_head_block_id": "000022b8d3e4c6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1",
    "fork_db_head_block_num": 8888
}"#;

const HEALTH_BODY: &str = r#"{
    "version": "1.0",
    "version_hash": "028d5a34463884fcbe2ecfd3c0fcb3b5d4d538f4fd64803c1ef7209c85f2f266",
    "host": "api.test.com:443",
    "health": [
        {
            "service": "Service1",
            "status": "OK",
            "time": 1642174781678
        },
        {
            "service": "Service2",
            "status": "DOWN",
            "service_data": {
                "key1": 1234,
                "key2": "some_string"
            },
            "time": 1642174781736
        }
    ]
}"#;

const STRUCTURED_ERROR: &str = r#"{
    "code": 500,
    "message": "Internal Server Error",
    "error": {
        "code": 3010004,
        "name": "unknown_block_exception",
        "what": "Unknown block",
        "details": [
            {
                "message": "Could not find block: 999999999",
                "file": "chain_plugin.cpp",
                "line_number": 1852,
                "method": "get_block"
            }
        ]
    }
}"#;

/// Host the mock server listens on, without port.
fn mock_host(server: &MockServer) -> String {
    server.address().ip().to_string()
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

// ─────────────────────────────────────────────────────────────────────────────
// Endpoint decoding
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_info() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v1/chain/get_info",
        ResponseTemplate::new(200).set_body_string(INFO_BODY),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let info = client.get_info(&CancellationToken::new()).await.unwrap();

    assert_eq!(info.server_version, "d1bc8d3");
    assert_eq!(info.head_block_num, 8888);
    assert_eq!(
        info.head_block_time,
        Utc.timestamp_opt(1514813821, 0).unwrap()
    );
    assert_eq!(info.irreversible_lag(), 328);
    assert_eq!(info.http_status, 200);
}

#[tokio::test]
async fn test_get_health() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v2/health",
        ResponseTemplate::new(200).set_body_string(HEALTH_BODY),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let health = client.get_health(&CancellationToken::new()).await.unwrap();

    assert_eq!(
        health.version_hash,
        "028d5a34463884fcbe2ecfd3c0fcb3b5d4d538f4fd64803c1ef7209c85f2f266"
    );
    assert_eq!(health.health.len(), 2);
    assert_eq!(health.http_status, 200);
    assert!(health.features.is_empty());

    let first = &health.health[0];
    assert_eq!(first.name, "Service1");
    assert_eq!(first.status, "OK");
    assert!(first.data.is_empty());
    assert_eq!(
        first.time,
        Utc.with_ymd_and_hms(2022, 1, 14, 15, 39, 41).unwrap()
            + chrono::Duration::milliseconds(678)
    );

    let second = &health.health[1];
    assert_eq!(second.name, "Service2");
    assert_eq!(second.status, "DOWN");
    assert_eq!(second.time.timestamp_millis(), 1642174781736);
    assert_eq!(second.data.len(), 2);
    assert_eq!(second.data["key1"], serde_json::json!(1234));
    assert_eq!(second.data["key2"], serde_json::json!("some_string"));
}

#[tokio::test]
async fn test_health_api_reachability() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v2/health",
        ResponseTemplate::new(200).set_body_string(HEALTH_BODY),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    assert!(client.health().is_reachable(&CancellationToken::new()).await);

    let unreachable = LeapClient::new(&format!("{}/missing", server.uri())).unwrap();
    assert!(!unreachable.health().is_reachable(&CancellationToken::new()).await);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/node/v1/chain/get_info",
        ResponseTemplate::new(200).set_body_string(INFO_BODY),
    )
    .await;

    let client = LeapClient::new(&format!("{}/node", server.uri())).unwrap();
    let info = client.chain().get_info(&CancellationToken::new()).await.unwrap();
    assert_eq!(info.head_block_num, 8888);
}

#[tokio::test]
async fn test_get_info_minimal_payload() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v1/chain/get_info",
        ResponseTemplate::new(200).set_body_string(
            r#"{
                "server_version": "d1bc8d3",
                "head_block_num": 8888,
                "head_block_time": "2018-01-01T13:37:01"
            }"#,
        ),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let info = client.get_info(&CancellationToken::new()).await.unwrap();
    assert_eq!(info.server_version, "d1bc8d3");
    assert_eq!(info.head_block_num, 8888);
    assert_eq!(
        info.head_block_time,
        Utc.with_ymd_and_hms(2018, 1, 1, 13, 37, 1).unwrap()
    );
    assert_eq!(info.chain_id, "");
    assert_eq!(info.http_status, 200);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v1/chain/get_info",
        ResponseTemplate::new(200).set_body_string(r#"{"server_version": 42}"#),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let err = client.get_info(&CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, Error::Json(_)), "unexpected error: {err}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Host header
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_host_header_has_no_port() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/health"))
        .and(header("host", mock_host(&server).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(HEALTH_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    assert!(server.uri().contains(':'));
    client.get_health(&CancellationToken::new()).await.unwrap();
}

#[tokio::test]
async fn test_host_header_override_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/chain/get_info"))
        .and(header("host", "api.example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INFO_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = LeapClient::builder()
        .base_url(server.uri())
        .host("api.example.com")
        .build()
        .unwrap();
    client.get_info(&CancellationToken::new()).await.unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// Error classification
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_structured_error() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v1/chain/get_info",
        ResponseTemplate::new(500).set_body_string(STRUCTURED_ERROR),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let err = client.get_info(&CancellationToken::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "500 Internal Server Error");
    assert!(err.is_server_error());
    let api = err.api_error().expect("structured error");
    assert_eq!(api.error.code, 3010004);
    assert_eq!(api.error.name, "unknown_block_exception");
    assert_eq!(api.error.details[0].file, "chain_plugin.cpp");
}

#[tokio::test]
async fn test_inner_only_error_uses_response_status() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v1/chain/get_info",
        ResponseTemplate::new(500).set_body_string(
            r#"{"error":{"code":3010004,"name":"unknown_block_exception","what":"Unknown block","details":[]}}"#,
        ),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let err = client.get_info(&CancellationToken::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "500 Internal Server Error");
    assert_eq!(err.status(), Some(500));
    assert!(err.is_server_error());
    let api = err.api_error().expect("structured error");
    assert_eq!(api.code, 0);
    assert_eq!(api.error.what, "Unknown block");
}

#[tokio::test]
async fn test_empty_error_body_is_generic() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v2/health",
        ResponseTemplate::new(500).set_body_string("{}"),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let err = client.get_health(&CancellationToken::new()).await.unwrap_err();

    match &err {
        Error::Status(status) => {
            assert_eq!(status.code, 500);
            assert_eq!(status.display_message(), "Internal Server Error");
        }
        other => panic!("expected generic error, got {other:?}"),
    }
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn test_unmatched_route_is_not_found() {
    let server = MockServer::start().await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let err = client.get_info(&CancellationToken::new()).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "404 Not Found");
}

// ─────────────────────────────────────────────────────────────────────────────
// Deadlines
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_cancellation_resolves_promptly() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v1/chain/get_info",
        ResponseTemplate::new(200)
            .set_body_string(INFO_BODY)
            .set_delay(Duration::from_secs(30)),
    )
    .await;

    let client = LeapClient::builder()
        .base_url(server.uri())
        .timeout(None)
        .build()
        .unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = client.get_info(&cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(err.is_deadline());
    assert!(err.to_string().contains("deadline exceeded"));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_timeout_is_deadline() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v2/health",
        ResponseTemplate::new(200)
            .set_body_string(HEALTH_BODY)
            .set_delay(Duration::from_secs(30)),
    )
    .await;

    let client = LeapClient::builder()
        .base_url(server.uri())
        .timeout(Some(Duration::from_millis(200)))
        .build()
        .unwrap();

    let started = Instant::now();
    let err = client.get_health(&CancellationToken::new()).await.unwrap_err();

    assert!(err.is_timeout(), "unexpected error: {err}");
    assert!(err.is_deadline());
    assert!(!err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = LeapClient::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let err = client.get_info(&CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, Error::Http(_)), "unexpected error: {err}");
    assert!(err.is_transport());
    assert!(!err.is_deadline());
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v1/chain/get_info",
        ResponseTemplate::new(200).set_body_string(INFO_BODY),
    )
    .await;
    mount(
        &server,
        "/v2/health",
        ResponseTemplate::new(200).set_body_string(HEALTH_BODY),
    )
    .await;

    let client = LeapClient::new(&server.uri()).unwrap();
    let cancel = CancellationToken::new();
    let (info, health) = tokio::join!(client.get_info(&cancel), client.get_health(&cancel));

    assert_eq!(info.unwrap().head_block_num, 8888);
    assert_eq!(health.unwrap().health.len(), 2);
}
