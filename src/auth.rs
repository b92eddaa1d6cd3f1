//! Local persistence for the admin bearer token.
//!
//! The dashboard keeps its session in a single value under a fixed key,
//! the file-backed equivalent of the browser's `localStorage['adminToken']`.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

#[derive(Serialize, Deserialize, Default)]
struct TokenFile {
    #[serde(rename = "adminToken", default)]
    admin_token: String,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing or unreadable file behaves like an absent key: callers get
    /// an empty token, attach it as an empty bearer, and let the server
    /// reject the request.
    pub fn load(&self) -> String {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<TokenFile>(&raw).ok())
            .map(|f| f.admin_token)
            .unwrap_or_default()
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(ApiError::TokenStore)?;
            }
        }
        let file = TokenFile {
            admin_token: token.to_string(),
        };
        let raw = serde_json::to_string_pretty(&file).map_err(|e| {
            ApiError::TokenStore(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        fs::write(&self.path, raw).map_err(ApiError::TokenStore)
    }

    /// Logout. Removing an already-absent file is not an error.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::TokenStore(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("adminToken.json"));
        store.save("jwt-abc123").unwrap();
        assert_eq!(store.load(), "jwt-abc123");
    }

    #[test]
    fn test_missing_file_is_empty_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nope.json"));
        assert_eq!(store.load(), "");
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested/state/adminToken.json"));
        store.save("t").unwrap();
        assert_eq!(store.load(), "t");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("adminToken.json"));
        store.save("t").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), "");
    }

    #[test]
    fn test_corrupt_file_is_empty_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adminToken.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(TokenStore::new(path).load(), "");
    }
}
