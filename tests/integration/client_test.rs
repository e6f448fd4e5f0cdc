//! Tests for the census HTTP client against a local one-shot server

use census_vuln::{CensusClient, CensusConfig, CensusError, VulnerabilityAnalysis};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one canned response and hand back the request head
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{addr}/api/UScensus"), handle)
}

fn client_for(url: String, key: &str) -> CensusClient {
    // Bypass any proxy configured in the environment
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    CensusClient::with_http_client(http, url, key.to_string())
}

fn county_json(county: i64, label: &str, poverty: i64) -> serde_json::Value {
    json!({
        "county": county,
        "state": 48,
        "county_state": label,
        "population": 20000,
        "total_pop_male": 10000,
        "employed_male": 4500,
        "employed_total": 9000,
        "male_pop_under_5": 700,
        "female_pop_under_5": 650,
        "male_pop_over_75": 400,
        "female_pop_over_75": 600,
        "poverty_count": poverty,
        "poverty_count_male_under_5": poverty / 20,
        "poverty_count_female_under_5": poverty / 25,
        "poverty_count_male_over_75": 40,
        "poverty_count_female_over_75": 70
    })
}

#[test]
fn test_client_uses_configured_url() {
    let config = CensusConfig {
        api_url: "http://localhost:1/api".to_string(),
        api_key: "abc".to_string(),
        ..CensusConfig::default()
    };
    let client = CensusClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "http://localhost:1/api");
}

#[tokio::test]
async fn test_fetch_sends_key_and_decodes_rows() {
    let body = json!({
        "data": [
            county_json(1, "Anderson County, Texas", 3000),
            county_json(3, "Andrews County, Texas", 2000),
        ]
    })
    .to_string();
    let (url, server) = serve_once("200 OK", body).await;

    let response = client_for(url, "test-key").fetch().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/UScensus?api_key=test-key HTTP/1.1"));
    assert_eq!(response.status, 200);
    assert_eq!(response.rows.len(), 2);
    assert_eq!(
        response.rows[1].county_state.as_deref(),
        Some("Andrews County, Texas")
    );
    assert!(response.preview.starts_with("{\"data\""));
    assert!(response.preview.chars().count() <= 200);
}

#[tokio::test]
async fn test_empty_key_is_still_sent() {
    let (url, server) = serve_once("200 OK", json!({ "data": [] }).to_string()).await;

    let response = client_for(url, "").fetch().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /api/UScensus?api_key= HTTP/1.1"));
    assert!(response.rows.is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let (url, server) = serve_once(
        "403 Forbidden",
        json!({ "error": "invalid api key" }).to_string(),
    )
    .await;

    let err = client_for(url, "wrong").fetch().await.unwrap_err();
    server.await.unwrap();

    match err {
        CensusError::Status { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_body_without_data_is_a_decode_error() {
    let (url, server) = serve_once("200 OK", json!({ "rows": [] }).to_string()).await;

    let err = client_for(url, "test-key").fetch().await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, CensusError::Json(_)));
}

#[tokio::test]
async fn test_fetched_rows_feed_the_analysis() {
    let rows: Vec<_> = (0..10)
        .map(|i| county_json(i + 1, &format!("County {i}, Texas"), 1000 + 250 * i))
        .collect();
    let (url, server) = serve_once("200 OK", json!({ "data": rows }).to_string()).await;

    let response = client_for(url, "test-key").fetch().await.unwrap();
    server.await.unwrap();

    let result = VulnerabilityAnalysis::default().run(&response.rows).unwrap();
    assert_eq!(result.len(), 10);
    assert_eq!(result.top_vulnerable(1)[0].county_state(), "County 9, Texas");
}
