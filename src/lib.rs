// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnScan Pro - Client Library
 * Session management, API access and scan orchestration for the
 * VulnScan Pro scanning service.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod poll;
pub mod report;
pub mod session;
pub mod types;
pub mod view;
