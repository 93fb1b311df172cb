// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::errors::{ClientError, ClientResult};
use crate::poll::PollConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Which generation of the scan endpoint to drive. The two protocols
/// never run together against one server; the configured one is the
/// only one exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanProtocol {
    /// Create a job on `/api/scans`, then poll `/api/scans/{id}`
    Polling,
    /// Single blocking POST to `/api/scan/start`
    Direct,
}

impl Default for ScanProtocol {
    fn default() -> Self {
        ScanProtocol::Polling
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: Url,
    pub timeout_secs: u64,
    pub protocol: ScanProtocol,
    pub poll: PollConfig,

    /// Bearer token injected via `VULNSCAN_TOKEN`, bypassing the
    /// session store. Env-only: never read from or written to the
    /// config file.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse("http://localhost:8000").expect("static URL"),
            timeout_secs: 30,
            protocol: ScanProtocol::default(),
            poll: PollConfig::default(),
            token: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration: explicit `--config` path, else the default
    /// file when present, else built-in defaults. `VULNSCAN_API_BASE`
    /// overrides the file either way; CLI flags override on top of
    /// this in the binary.
    pub fn load(explicit: Option<&Path>) -> ClientResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Ok(base) = std::env::var("VULNSCAN_API_BASE") {
            config.api_base = Url::parse(&base)
                .map_err(|e| ClientError::Config(format!("VULNSCAN_API_BASE: {}", e)))?;
        }

        // CI environments inject the token directly instead of going
        // through an interactive login.
        if let Ok(token) = std::env::var("VULNSCAN_TOKEN") {
            if !token.trim().is_empty() {
                config.token = Some(token);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Could not read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vulnscan").join("config.toml"))
    }

    pub fn validate(&self) -> ClientResult<()> {
        match self.api_base.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::Config(format!(
                    "API base must be http(s), got {}://",
                    other
                )))
            }
        }

        if self.api_base.host_str().is_none() {
            return Err(ClientError::Config("API base URL has no host".into()));
        }

        if self.timeout_secs == 0 {
            return Err(ClientError::Config("timeout_secs must be positive".into()));
        }

        if self.poll.max_attempts == 0 {
            return Err(ClientError::Config("poll.max_attempts must be positive".into()));
        }

        Ok(())
    }
}
