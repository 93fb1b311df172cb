// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Logged-in / logged-out presentation state, a pure function of the
//! stored session. Re-evaluated at startup and after login/logout.

use crate::types::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    LoggedOut,
    LoggedIn { display_name: String },
}

impl ViewState {
    pub fn from_session(session: &Session) -> Self {
        match (&session.token, &session.display_name) {
            (Some(_), Some(name)) => ViewState::LoggedIn {
                display_name: name.clone(),
            },
            // A token with no stored name is still a valid login.
            (Some(_), None) => ViewState::LoggedIn {
                display_name: String::new(),
            },
            _ => ViewState::LoggedOut,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, ViewState::LoggedIn { .. })
    }
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewState::LoggedOut => write!(f, "Not logged in"),
            ViewState::LoggedIn { display_name } if display_name.is_empty() => {
                write!(f, "Logged in")
            }
            ViewState::LoggedIn { display_name } => write!(f, "Logged in as {}", display_name),
        }
    }
}
