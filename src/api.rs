// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - API Client
 * Thin typed wrapper over the backend HTTP contract
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::{ClientError, ClientResult};
use crate::types::{
    ApiDetail, DirectScanResponse, RegisterRequest, ScanCreated, ScanResult, TokenResponse,
};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_POOL_IDLE_PER_HOST: usize = 4;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

const USER_AGENT: &str = concat!("vulnscan-client/", env!("CARGO_PKG_VERSION"));

/// Typed client for the VulnScan Pro backend. Both API generations
/// (the polling `/api/scans` pair and the direct `/api/scan/start`
/// endpoint) live behind this one surface.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url, timeout_secs: u64) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .pool_max_idle_per_host(DEFAULT_POOL_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Create an account. The success body is ignored; a non-2xx
    /// surfaces the server's `detail` when the body carries one.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        let url = self.endpoint("/api/auth/register");
        debug!(url = %url, email = %request.email, "Registering account");

        let response = self.client.post(&url).json(request).send().await?;
        Self::check(response, "Registration failed").await?;
        Ok(())
    }

    /// Exchange credentials for a bearer token. The endpoint follows
    /// the password-grant shape: form-urlencoded `username`/`password`,
    /// not JSON.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<TokenResponse> {
        let url = self.endpoint("/api/auth/token");
        debug!(url = %url, username = %email, "Requesting token");

        let response = self
            .client
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;

        let response = Self::check(response, "Invalid credentials").await?;
        Ok(response.json().await?)
    }

    /// Create a scan job (polling protocol).
    pub async fn create_scan(&self, token: &str, target_url: &str) -> ClientResult<ScanCreated> {
        let url = self.endpoint("/api/scans");
        debug!(url = %url, target = %target_url, "Creating scan");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "target_url": target_url }))
            .send()
            .await?;

        let response = Self::check(response, "Scan failed").await?;
        Ok(response.json().await?)
    }

    /// Fetch the current result document for a scan job.
    pub async fn fetch_scan(&self, token: &str, scan_id: u64) -> ClientResult<ScanResult> {
        let url = self.endpoint(&format!("/api/scans/{}", scan_id));
        debug!(url = %url, "Fetching scan result");

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let response = Self::check(response, "Failed to get scan results").await?;
        Ok(response.json().await?)
    }

    /// Run a scan through the direct endpoint, which blocks server-side
    /// and returns the finished result plus the remaining credits.
    pub async fn scan_direct(&self, token: &str, target_url: &str) -> ClientResult<ScanResult> {
        let url = self.endpoint("/api/scan/start");
        debug!(url = %url, target = %target_url, "Starting direct scan");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "target_url": target_url }))
            .send()
            .await?;

        let response = Self::check(response, "Scan failed").await?;
        let envelope: DirectScanResponse = response.json().await?;

        let mut result = envelope.result;
        result.credits_left = envelope.credits_left.or(result.credits_left);
        Ok(result)
    }

    /// Map a non-2xx response to `ClientError::Api`, pulling the
    /// `{detail}` message out of the body when it parses.
    async fn check(response: Response, fallback: &str) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ApiDetail>()
            .await
            .ok()
            .map(|body| body.detail);

        Err(ClientError::api(status.as_u16(), detail, fallback))
    }

    /// Probe `/health`; used by `vulnscan whoami --check`.
    pub async fn health(&self) -> ClientResult<bool> {
        let url = self.endpoint("/health");
        let response = self.client.get(&url).send().await?;
        Ok(response.status() == StatusCode::OK)
    }
}
