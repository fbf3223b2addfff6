//! Credential store — the single persisted `{user, token}` record.
//!
//! DESIGN
//! ======
//! One JSON file under one fixed key, nothing else. Reads never fail to the
//! caller: an absent, unreadable, or corrupt file is simply "no stored
//! session". Writes are best-effort (temp file + rename) and failures are
//! logged and swallowed — in-memory session state stays authoritative.
//!
//! Only [`crate::auth::session::AuthSession`] mutation methods write this
//! store; the transport layer reads it on every outgoing call.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::net::types::Identity;

/// Fixed key the session record is persisted under.
pub const STORAGE_KEY: &str = "fyp_auth";

/// The persisted session record.
///
/// `token` is nullable on disk for compatibility with older records; the
/// bootstrapper only installs a record that carries both halves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub user: Identity,
    pub token: Option<String>,
}

/// File-backed store for the single credential record.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at `dir`. The record lives at
    /// `<dir>/fyp_auth.json`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { path: dir.into().join(format!("{STORAGE_KEY}.json")) }
    }

    /// Path of the persisted record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted record. Absent, unreadable, or unparseable data
    /// all return `None` — never an error.
    #[must_use]
    pub fn read(&self) -> Option<StoredAuth> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "stored credentials unreadable, treating as absent");
                None
            }
        }
    }

    /// Persist `{user, token}`, overwriting any prior record.
    pub fn write(&self, user: &Identity, token: &str) {
        let record = StoredAuth { user: user.clone(), token: Some(token.to_owned()) };
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize credentials");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        // Write-then-rename so a crash mid-write cannot leave a truncated
        // record behind.
        let tmp = self.path.with_extension("json.tmp");
        let result = std::fs::write(&tmp, raw).and_then(|()| std::fs::rename(&tmp, &self.path));
        if let Err(e) = result {
            tracing::warn!(error = %e, path = %self.path.display(), "failed to persist credentials");
        }
    }

    /// Remove the persisted record. Clearing an empty store is not an error.
    pub fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "failed to clear stored credentials");
            }
        }
    }
}
