//! Durable session storage
//!
//! Persists the bearer token and the signed-in user as a single JSON file
//! under the platform data directory. Read once at startup, written on
//! login success, removed on logout. Malformed or invalid content is
//! rejected with a warning and treated as no session - stored data is never
//! trusted blindly.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::api::AuthSession;

const SESSION_FILE: &str = "session.json";

/// Handle to the on-disk session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at the platform data directory
    pub fn open_default() -> Result<Self> {
        let dir = if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "megachat") {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data dir {}", dir.display()))?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
        })
    }

    /// Open the store at an explicit path (used by tests)
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, if there is a usable one
    ///
    /// Missing file means no session. Unreadable, unparseable, or invalid
    /// content also means no session, logged at warn level.
    pub fn load(&self) -> Option<AuthSession> {
        if !self.path.exists() {
            return None;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read session file {}: {}", self.path.display(), e);
                return None;
            }
        };

        let session: AuthSession = match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Rejecting malformed session file: {}", e);
                return None;
            }
        };

        if session.token.is_empty() || !session.user.is_valid() {
            tracing::warn!("Rejecting stored session with empty token or invalid user");
            return None;
        }

        Some(session)
    }

    /// Persist the token and user
    pub fn save(&self, session: &AuthSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Remove both persisted entries
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}
