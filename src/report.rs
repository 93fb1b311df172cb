// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - Result Rendering
 * Pure view-model construction and terminal presentation
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::{ScanResult, ScanStatus, Severity};
use serde::Serialize;

/// Derive a discrete risk tier from the continuous 0-10 risk score.
pub fn risk_tier(score: f64) -> Severity {
    if score < 2.5 {
        Severity::Low
    } else if score < 5.0 {
        Severity::Medium
    } else if score < 7.5 {
        Severity::High
    } else {
        Severity::Critical
    }
}

/// Static remediation hint looked up by vulnerability type, with a
/// generic fallback for types the client does not recognize.
pub fn remediation_hint(vuln_type: &str) -> &'static str {
    let lowered = vuln_type.to_ascii_lowercase();

    if lowered.contains("sql injection") {
        "Use parameterized queries or an ORM; never interpolate user input into SQL."
    } else if lowered.contains("xss") || lowered.contains("cross-site scripting") {
        "Encode all user-controlled output and deploy a Content-Security-Policy header."
    } else if lowered.contains("security header") {
        "Add the missing security headers (CSP, X-Frame-Options, HSTS) at the web server or proxy."
    } else if lowered.contains("ssl") || lowered.contains("tls") || lowered.contains("certificate")
    {
        "Renew the certificate, disable weak cipher suites and enforce TLS 1.2 or newer."
    } else {
        "Review the affected component and apply vendor guidance for this finding."
    }
}

/// One rendered finding.
#[derive(Debug, Clone, Serialize)]
pub struct VulnCard {
    pub title: String,
    pub severity: Severity,
    pub location: String,
    pub description: String,
    pub cvss_score: Option<f64>,
    pub remediation: &'static str,
}

/// Structured report derived from a scan result. Pure data: no
/// terminal codes, no I/O, so presenters can be swapped and the logic
/// tested without a terminal.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub target: String,
    pub status: ScanStatus,
    pub scan_id: Option<u64>,
    pub risk_score: Option<f64>,
    pub risk_tier: Option<Severity>,
    pub vulnerabilities_found: u32,
    pub credits_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub cards: Vec<VulnCard>,
}

impl ReportView {
    pub fn from_result(result: &ScanResult) -> Self {
        let cards: Vec<VulnCard> = result
            .vulnerabilities
            .iter()
            .map(|vuln| VulnCard {
                title: vuln.vuln_type.clone(),
                severity: vuln.effective_severity(),
                location: vuln.location.clone(),
                description: vuln.description.clone(),
                cvss_score: vuln.cvss_score,
                remediation: remediation_hint(&vuln.vuln_type),
            })
            .collect();

        Self {
            target: result.url.clone(),
            status: result.status,
            scan_id: result.scan_id,
            risk_score: result.risk_score,
            risk_tier: result.risk_score.map(risk_tier),
            vulnerabilities_found: result
                .vulnerabilities_found
                .unwrap_or(cards.len() as u32),
            credits_left: result.credits_left,
            created_at: result.created_at.clone(),
            completed_at: result.completed_at.clone(),
            cards,
        }
    }

    pub fn no_findings(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Plain-text presenter for the terminal.
pub fn render_text(view: &ReportView) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    out.push_str(&format!("{}\n", rule));
    out.push_str("SCAN REPORT\n");
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("Target:             {}\n", view.target));
    out.push_str(&format!("Status:             {}\n", view.status));
    if let Some(scan_id) = view.scan_id {
        out.push_str(&format!("Scan ID:            {}\n", scan_id));
    }
    if let Some(score) = view.risk_score {
        let tier = view.risk_tier.map(|t| t.as_str()).unwrap_or("-");
        out.push_str(&format!("Risk score:         {:.1}/10 ({})\n", score, tier));
    }
    out.push_str(&format!("Vulnerabilities:    {}\n", view.vulnerabilities_found));
    if let Some(credits) = view.credits_left {
        out.push_str(&format!("Credits left:       {}\n", credits));
    }
    if let Some(created) = &view.created_at {
        out.push_str(&format!("Started:            {}\n", created));
    }
    if let Some(completed) = &view.completed_at {
        out.push_str(&format!("Completed:          {}\n", completed));
    }
    out.push_str(&format!("{}\n", rule));

    if view.no_findings() {
        out.push_str("\nNo vulnerabilities detected. Good job!\n");
        return out;
    }

    for (index, card) in view.cards.iter().enumerate() {
        out.push_str(&format!("\n[{}] {} - {}\n", index + 1, card.title, card.severity));
        if !card.location.is_empty() {
            out.push_str(&format!("    Location:    {}\n", card.location));
        }
        if !card.description.is_empty() {
            out.push_str(&format!("    Description: {}\n", card.description));
        }
        if let Some(cvss) = card.cvss_score {
            out.push_str(&format!("    CVSS score:  {}\n", cvss));
        }
        out.push_str(&format!("    Remediation: {}\n", card.remediation));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vulnerability;

    fn result_with(vulns: Vec<Vulnerability>) -> ScanResult {
        ScanResult {
            url: "https://example.com".into(),
            status: ScanStatus::Completed,
            scan_id: Some(1),
            risk_score: Some(3.0),
            vulnerabilities_found: None,
            credits_left: None,
            vulnerabilities: vulns,
            created_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn risk_tier_boundaries_are_exact() {
        assert_eq!(risk_tier(0.0), Severity::Low);
        assert_eq!(risk_tier(2.4999), Severity::Low);
        assert_eq!(risk_tier(2.5), Severity::Medium);
        assert_eq!(risk_tier(4.9999), Severity::Medium);
        assert_eq!(risk_tier(5.0), Severity::High);
        assert_eq!(risk_tier(7.4999), Severity::High);
        assert_eq!(risk_tier(7.5), Severity::Critical);
        assert_eq!(risk_tier(10.0), Severity::Critical);
    }

    #[test]
    fn remediation_matches_known_families() {
        assert!(remediation_hint("SQL Injection").contains("parameterized"));
        assert!(remediation_hint("SQL Injection (reflection)").contains("parameterized"));
        assert!(remediation_hint("Cross-site Scripting vulnerability(XSS)")
            .contains("Content-Security-Policy"));
        assert!(remediation_hint("Security Header Missing").contains("security headers"));
        assert!(remediation_hint("Weak SSL/TLS Cipher").contains("TLS 1.2"));
        assert!(remediation_hint("Invalid SSL Certificate").contains("certificate"));
    }

    #[test]
    fn remediation_falls_back_for_unknown_types() {
        assert!(remediation_hint("Quantum Entanglement Leak").contains("vendor guidance"));
    }

    #[test]
    fn empty_result_renders_success_panel() {
        let view = ReportView::from_result(&result_with(vec![]));
        assert!(view.no_findings());
        assert_eq!(view.vulnerabilities_found, 0);

        let text = render_text(&view);
        assert!(text.contains("No vulnerabilities detected"));
        assert!(!text.contains("Remediation:"));
    }

    #[test]
    fn findings_render_one_card_each() {
        let vuln: Vulnerability = serde_json::from_str(
            r#"{"type":"SQL Injection","severity":"High","location":"/login",
                "description":"boolean blind","cvss_score":7.2}"#,
        )
        .unwrap();
        let view = ReportView::from_result(&result_with(vec![vuln]));
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.vulnerabilities_found, 1);

        let text = render_text(&view);
        assert!(text.contains("SQL Injection - HIGH"));
        assert!(text.contains("CVSS score:  7.2"));
        assert!(text.contains("parameterized"));
        assert!(!text.contains("No vulnerabilities detected"));
    }

    #[test]
    fn timestamps_appear_in_summary_when_reported() {
        let mut result = result_with(vec![]);
        result.created_at = Some("2026-08-25T10:00:00Z".into());
        result.completed_at = Some("2026-08-25T10:00:41Z".into());

        let view = ReportView::from_result(&result);
        let text = render_text(&view);
        assert!(text.contains("Started:            2026-08-25T10:00:00Z"));
        assert!(text.contains("Completed:          2026-08-25T10:00:41Z"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["created_at"], "2026-08-25T10:00:00Z");
        assert_eq!(json["completed_at"], "2026-08-25T10:00:41Z");

        // A result that never reported timestamps renders without the
        // rows instead of printing placeholders.
        let bare = render_text(&ReportView::from_result(&result_with(vec![])));
        assert!(!bare.contains("Started:"));
        assert!(!bare.contains("Completed:"));
    }

    #[test]
    fn reported_count_wins_over_card_count() {
        let mut result = result_with(vec![]);
        result.vulnerabilities_found = Some(4);
        let view = ReportView::from_result(&result);
        assert_eq!(view.vulnerabilities_found, 4);
    }
}
