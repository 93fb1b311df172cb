// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - API Client Tests
 * Wire-level tests for the auth and scan endpoints
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use url::Url;
use vulnscan_client::api::ApiClient;
use vulnscan_client::errors::ClientError;
use vulnscan_client::types::{RegisterRequest, ScanStatus, Severity};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let base = Url::parse(&server.uri()).unwrap();
    ApiClient::new(base, 5).unwrap()
}

#[tokio::test]
async fn register_posts_json_and_ignores_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_string_contains("\"email\":\"a@b.com\""))
        .and(body_string_contains("\"full_name\":\"A B\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "User created successfully",
            "user_id": 1,
            "scan_credits": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .register(&RegisterRequest {
            email: "a@b.com".into(),
            password: "x".into(),
            full_name: "A B".into(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn register_surfaces_server_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "detail": "Email already registered" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .register(&RegisterRequest {
            email: "a@b.com".into(),
            password: "x".into(),
            full_name: "A B".into(),
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Email already registered");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn login_sends_form_encoded_password_grant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=a%40b.com"))
        .and(body_string_contains("password=x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok1",
            "token_type": "bearer",
            "email": "a@b.com",
            "scan_credits": 5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let token = client.login("a@b.com", "x").await.unwrap();
    assert_eq!(token.access_token, "tok1");
    assert_eq!(token.scan_credits, Some(5));
}

#[tokio::test]
async fn login_failure_uses_generic_message_without_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.login("a@b.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Server returned 401: Invalid credentials");
    assert!(err.is_auth_rejection());
}

#[tokio::test]
async fn create_and_fetch_carry_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scans"))
        .and(header("authorization", "Bearer tok1"))
        .and(body_string_contains("\"target_url\":\"https://example.com\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "scan_id": 42,
            "status": "started",
            "message": "Scan started for https://example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/scans/42"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "scan_id": 42,
            "target_url": "https://example.com",
            "status": "completed",
            "risk_score": 8.1,
            "vulnerabilities_found": 1,
            "vulnerabilities": [{
                "vulnerability_type": "SQL Injection",
                "severity": "HIGH",
                "location": "/login",
                "description": "boolean blind",
                "cvss_score": 8.1
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client.create_scan("tok1", "https://example.com").await.unwrap();
    assert_eq!(created.scan_id, 42);
    assert_eq!(created.status, Some(ScanStatus::Started));

    let result = client.fetch_scan("tok1", created.scan_id).await.unwrap();
    assert_eq!(result.url, "https://example.com");
    assert_eq!(result.status, ScanStatus::Completed);
    assert_eq!(result.vulnerabilities[0].severity, Some(Severity::High));
}

#[tokio::test]
async fn direct_scan_unwraps_envelope_and_credits() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scan/start"))
        .and(header("authorization", "Bearer tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": {
                "url": "https://example.com",
                "status": "completed",
                "vulnerabilities": [
                    {"type": "Open Redirect", "risk": "Medium"}
                ]
            },
            "credits_left": 4
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.scan_direct("tok1", "https://example.com").await.unwrap();
    assert_eq!(result.credits_left, Some(4));
    assert_eq!(result.vulnerabilities.len(), 1);
    assert_eq!(result.vulnerabilities[0].effective_severity(), Severity::Medium);
}

#[tokio::test]
async fn create_scan_surfaces_credit_exhaustion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scans"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({ "detail": "No scan credits remaining" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.create_scan("tok1", "https://example.com").await.unwrap_err();
    assert_eq!(err.to_string(), "Server returned 403: No scan credits remaining");
}
