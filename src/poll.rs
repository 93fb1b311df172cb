// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - Scan Polling
 * Bounded poll-until-terminal loop with exponential backoff
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::api::ApiClient;
use crate::errors::{ClientError, ClientResult};
use crate::types::ScanResult;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Poll configuration with exponential backoff and jitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Maximum number of result fetches before giving up
    pub max_attempts: u32,

    /// Backoff before the first fetch
    pub initial_backoff_ms: u64,

    /// Backoff ceiling
    pub max_backoff_ms: u64,

    /// Backoff multiplier (typically 2.0 for exponential)
    pub multiplier: f64,

    /// Jitter to avoid synchronized clients hammering the API
    pub jitter: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_backoff_ms: 500,
            max_backoff_ms: 10_000,
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl PollConfig {
    const JITTER_FACTOR: f64 = 0.25;

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Backoff before fetch number `attempt` (1-based).
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let base = self.initial_backoff_ms as f64 * self.multiplier.powi((attempt - 1) as i32);
        let capped = base.min(self.max_backoff_ms as f64);

        let range = capped * Self::JITTER_FACTOR;
        let with_jitter = if self.jitter && range > 0.0 {
            let mut rng = rand::rng();
            let jitter = rng.random_range(-range..range);
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(with_jitter as u64)
    }
}

/// Poll a scan job until it reaches a terminal status.
///
/// Backs off between fetches per `config` and gives up after
/// `max_attempts` fetches that all report a non-terminal status.
/// Cancellation (logout, Ctrl-C) aborts between suspension points and
/// drops whatever stale response was in flight.
pub async fn poll_scan(
    client: &ApiClient,
    token: &str,
    scan_id: u64,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> ClientResult<ScanResult> {
    let mut attempt = 0;

    while attempt < config.max_attempts {
        attempt += 1;

        let backoff = config.backoff_for(attempt);
        debug!(
            scan_id = scan_id,
            attempt = attempt,
            max_attempts = config.max_attempts,
            backoff_ms = backoff.as_millis() as u64,
            "Waiting before result fetch"
        );

        tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = tokio::time::sleep(backoff) => {}
        }

        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            fetched = client.fetch_scan(token, scan_id) => fetched?,
        };

        if result.status.is_terminal() {
            debug!(scan_id = scan_id, status = %result.status, attempt = attempt, "Scan reached terminal status");
            return Ok(result);
        }

        debug!(scan_id = scan_id, status = %result.status, "Scan still in progress");
    }

    warn!(scan_id = scan_id, attempts = config.max_attempts, "Poll budget exhausted");
    Err(ClientError::PollTimeout {
        scan_id,
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_exponentially_without_jitter() {
        let config = PollConfig::default().without_jitter();
        assert_eq!(config.backoff_for(1), Duration::from_millis(500));
        assert_eq!(config.backoff_for(2), Duration::from_millis(1000));
        assert_eq!(config.backoff_for(3), Duration::from_millis(2000));
    }

    #[test]
    fn backoff_is_capped() {
        let config = PollConfig::default().without_jitter();
        assert_eq!(config.backoff_for(30), Duration::from_millis(10_000));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let config = PollConfig::default();
        for attempt in 1..6 {
            let base = config.clone().without_jitter().backoff_for(attempt).as_millis() as f64;
            let jittered = config.backoff_for(attempt).as_millis() as f64;
            assert!(jittered >= base * (1.0 - PollConfig::JITTER_FACTOR) - 1.0);
            assert!(jittered <= base * (1.0 + PollConfig::JITTER_FACTOR) + 1.0);
        }
    }

    #[test]
    fn zero_attempt_has_no_backoff() {
        let config = PollConfig::default();
        assert_eq!(config.backoff_for(0), Duration::from_secs(0));
    }
}
