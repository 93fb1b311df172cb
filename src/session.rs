// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Persistent session storage.
//!
//! The browser frontend kept the token in origin-scoped localStorage;
//! the CLI equivalent is one JSON file per API origin under the user
//! config directory. The store is a pure load/save/clear port so the
//! controller never touches ambient global state directly.

use crate::errors::{ClientError, ClientResult};
use crate::types::Session;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

pub trait SessionStore: Send + Sync {
    /// Current session; each field independently possibly absent.
    fn load(&self) -> ClientResult<Session>;

    /// Persist both fields. No validation of the token's contents.
    fn save(&self, session: &Session) -> ClientResult<()>;

    /// Remove both fields unconditionally.
    fn clear(&self) -> ClientResult<()>;
}

/// File-backed store, one file per API origin.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store scoped to the given API origin, e.g.
    /// `~/.config/vulnscan/sessions/api.vulnscan.example.json`.
    pub fn for_origin(api_base: &Url) -> ClientResult<Self> {
        let host = api_base
            .host_str()
            .ok_or_else(|| ClientError::Config(format!("API base URL has no host: {}", api_base)))?;

        let slug = match api_base.port() {
            Some(port) => format!("{}_{}", host, port),
            None => host.to_string(),
        };

        let dir = dirs::config_dir()
            .ok_or_else(|| ClientError::Config("Could not determine config directory".into()))?
            .join("vulnscan")
            .join("sessions");

        Ok(Self {
            path: dir.join(format!("{}.json", slug)),
        })
    }

    /// Store backed by an explicit file path.
    pub fn at_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_err(&self, source: std::io::Error) -> ClientError {
        ClientError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Session> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Session::default());
            }
            Err(err) => return Err(self.storage_err(err)),
        };

        // A corrupt session file means logged out, not a hard failure.
        match serde_json::from_str(&content) {
            Ok(session) => Ok(session),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Discarding unreadable session file");
                Ok(Session::default())
            }
        }
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_err(e))?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Config(format!("Could not serialize session: {}", e)))?;

        fs::write(&self.path, json).map_err(|e| self.storage_err(e))?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.storage_err(err)),
        }
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Session> {
        Ok(self.session.read().clone())
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        *self.session.write() = session.clone();
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.session.write() = Session::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        assert!(!store.load().unwrap().is_logged_in());

        store.save(&Session::new("tok1", "A B")).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("tok1"));
        assert_eq!(loaded.display_name.as_deref(), Some("A B"));

        store.clear().unwrap();
        let cleared = store.load().unwrap();
        assert_eq!(cleared.token, None);
        assert_eq!(cleared.display_name, None);
    }

    #[test]
    fn origin_scoping_includes_port() {
        let url = Url::parse("http://localhost:8000/api").unwrap();
        let store = FileSessionStore::for_origin(&url).unwrap();
        let name = store.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "localhost_8000.json");

        let url = Url::parse("https://scan.example.com").unwrap();
        let store = FileSessionStore::for_origin(&url).unwrap();
        let name = store.path().file_name().unwrap().to_str().unwrap();
        assert_eq!(name, "scan.example.com.json");
    }
}
