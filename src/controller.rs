// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - Application Controller
 * Auth and scan orchestration over the session store and API client
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::api::ApiClient;
use crate::config::{ClientConfig, ScanProtocol};
use crate::errors::{ClientError, ClientResult};
use crate::poll::{poll_scan, PollConfig};
use crate::session::SessionStore;
use crate::types::{RegisterRequest, ScanResult, Session};
use crate::view::ViewState;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSummary {
    pub view_state: ViewState,
    pub scan_credits: Option<u32>,
}

/// Owns the session store, the API client and the protocol selection.
/// All user-facing operations go through here; the store is the only
/// state that outlives a single invocation.
pub struct AppController<S: SessionStore> {
    store: S,
    client: ApiClient,
    protocol: ScanProtocol,
    poll: PollConfig,
    token_override: Option<String>,
}

impl<S: SessionStore> AppController<S> {
    pub fn new(client: ApiClient, store: S, protocol: ScanProtocol, poll: PollConfig) -> Self {
        Self {
            store,
            client,
            protocol,
            poll,
            token_override: None,
        }
    }

    pub fn from_config(config: &ClientConfig, store: S) -> ClientResult<Self> {
        let client = ApiClient::new(config.api_base.clone(), config.timeout_secs)?;
        Ok(Self::new(client, store, config.protocol, config.poll.clone())
            .with_token_override(config.token.clone()))
    }

    /// Use `token` for authenticated calls instead of the stored
    /// session. Set from `VULNSCAN_TOKEN` so CI jobs can scan without
    /// a login step or a session file.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        self.token_override = token;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> ClientResult<Session> {
        self.store.load()
    }

    /// Presentation state derived from the stored session.
    pub fn view_state(&self) -> ClientResult<ViewState> {
        Ok(ViewState::from_session(&self.store.load()?))
    }

    /// Create an account. Success does not log the user in; the server
    /// expects a separate token request.
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> ClientResult<()> {
        let email = email.trim();
        let full_name = full_name.trim();

        if email.is_empty() || password.is_empty() || full_name.is_empty() {
            return Err(ClientError::Validation(
                "Email, password and full name are all required".into(),
            ));
        }

        self.client
            .register(&RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                full_name: full_name.to_string(),
            })
            .await?;

        info!(email = %email, "Account registered");
        Ok(())
    }

    /// Exchange credentials for a token and persist the session. On
    /// failure the store is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginSummary> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Email and password are required".into()));
        }

        let response = self.client.login(email, password).await?;

        // Prefer the server's full name for display, fall back to the
        // email we logged in with.
        let display_name = response
            .full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.to_string());

        let session = Session::new(response.access_token.clone(), display_name);
        self.store.save(&session)?;

        info!(email = %email, "Logged in");
        Ok(LoginSummary {
            view_state: ViewState::from_session(&session),
            scan_credits: response.scan_credits,
        })
    }

    /// Clear the session unconditionally. Purely client-side: any
    /// server-side token invalidation is out of scope.
    pub fn logout(&self) -> ClientResult<ViewState> {
        self.store.clear()?;
        info!("Logged out");
        Ok(ViewState::LoggedOut)
    }

    /// Run a scan through the configured protocol. Validation failures
    /// and a missing session are rejected before any network call. An
    /// injected token takes precedence over the stored session.
    pub async fn start_scan(
        &self,
        target_url: &str,
        cancel: &CancellationToken,
    ) -> ClientResult<ScanResult> {
        let target_url = target_url.trim();
        if target_url.is_empty() {
            return Err(ClientError::Validation("Please enter a website URL".into()));
        }

        let token = match self.token_override.clone() {
            Some(token) => token,
            None => self.store.load()?.token.ok_or(ClientError::NotLoggedIn)?,
        };

        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        match self.protocol {
            ScanProtocol::Direct => {
                info!(target = %target_url, "Running direct scan");
                tokio::select! {
                    _ = cancel.cancelled() => Err(ClientError::Cancelled),
                    result = self.client.scan_direct(&token, target_url) => result,
                }
            }
            ScanProtocol::Polling => {
                info!(target = %target_url, "Creating scan job");
                let created = tokio::select! {
                    _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                    created = self.client.create_scan(&token, target_url) => created?,
                };

                info!(scan_id = created.scan_id, "Scan created, polling for completion");
                poll_scan(&self.client, &token, created.scan_id, &self.poll, cancel).await
            }
        }
    }
}
