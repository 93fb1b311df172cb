// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Locally persisted authentication state. The token is opaque: it is
/// forwarded verbatim as a bearer credential and never inspected or
/// validated client-side. Expiry surfaces as a 401 on a later call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            display_name: Some(display_name.into()),
        }
    }

    /// A session counts as logged in only when a token is present; a
    /// display name without a token is meaningless leftover state.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Display name, only when the session is valid.
    pub fn label(&self) -> Option<&str> {
        if self.is_logged_in() {
            self.display_name.as_deref()
        } else {
            None
        }
    }
}

/// Vulnerability severity as reported by the backend. Case-insensitive
/// on the wire ("HIGH", "High" and "high" all parse), serialized
/// uppercase to match what the backend emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Lifecycle status of a scan job. `Completed` and `Failed` are
/// terminal; everything else means the poll loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Started,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Started => "started",
            ScanStatus::Running => "running",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "started" => Ok(ScanStatus::Started),
            "running" | "pending" => Ok(ScanStatus::Running),
            "completed" => Ok(ScanStatus::Completed),
            "failed" => Ok(ScanStatus::Failed),
            other => Err(format!("unknown scan status: {}", other)),
        }
    }
}

impl Serialize for ScanStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScanStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single finding in a scan result document. The two API generations
/// disagree on field names (`type` vs `vulnerability_type`) and the
/// direct endpoint carries only a simplified `risk` label instead of a
/// full severity, so both are optional-tolerant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(rename = "type", alias = "vulnerability_type")]
    pub vuln_type: String,

    #[serde(default)]
    pub severity: Option<Severity>,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, alias = "cvss_scored")]
    pub cvss_score: Option<f64>,

    /// Simplified severity label used by the direct scan endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

impl Vulnerability {
    /// Severity for display: the structured field when present, else
    /// the `risk` label when it parses, else Low.
    pub fn effective_severity(&self) -> Severity {
        self.severity
            .or_else(|| self.risk.as_deref().and_then(|r| r.parse().ok()))
            .unwrap_or(Severity::Low)
    }
}

/// Immutable snapshot of a scan returned by the server. Rendered once
/// on arrival, never merged with earlier results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(alias = "target_url")]
    pub url: String,

    pub status: ScanStatus,

    #[serde(default)]
    pub scan_id: Option<u64>,

    #[serde(default)]
    pub risk_score: Option<f64>,

    #[serde(default)]
    pub vulnerabilities_found: Option<u32>,

    /// Remaining scan credits; only the direct endpoint reports these.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits_left: Option<u32>,

    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

// Wire DTOs for the auth and scan endpoints.

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body of a successful token-issuance response. Only `access_token`
/// is guaranteed; the rest varies by backend revision.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub scan_credits: Option<u32>,
}

/// Response to a scan-creation request on the polling endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanCreated {
    pub scan_id: u64,
    #[serde(default)]
    pub status: Option<ScanStatus>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope returned by the direct (synchronous) scan endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectScanResponse {
    pub result: ScanResult,
    #[serde(default)]
    pub credits_left: Option<u32>,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDetail {
    pub detail: String,
}
