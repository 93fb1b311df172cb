// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - Client Error Types
 * Error handling with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::path::PathBuf;
use thiserror::Error;

/// Client error type covering every failure surface of the CLI
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected before any network call was made
    #[error("{0}")]
    Validation(String),

    /// An authenticated operation was attempted with no stored session
    #[error("You must be logged in to run a scan")]
    NotLoggedIn,

    /// The server rejected the request with a non-2xx status
    #[error("Server returned {status}: {detail}")]
    Api { status: u16, detail: String },

    /// Transport-level failure (DNS, TLS, connect, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Session file could not be read or written
    #[error("Session storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file or value is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Poll loop exhausted its attempt budget without a terminal status
    #[error("Scan {scan_id} did not finish after {attempts} polls")]
    PollTimeout { scan_id: u64, attempts: u32 },

    /// Operation was cancelled before a result arrived
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Non-2xx response with the server-supplied detail when the body
    /// carries one, else the caller's fallback message.
    pub fn api(status: u16, detail: Option<String>, fallback: &str) -> Self {
        ClientError::Api {
            status,
            detail: detail.unwrap_or_else(|| fallback.to_string()),
        }
    }

    /// True when the server rejected our bearer token (401), meaning
    /// the stored session is stale or revoked.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
