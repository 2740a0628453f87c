//! Passphrase gate and session marker.
//!
//! Authentication is deliberately primitive: a single static passphrase
//! compared in plain text, and a marker file whose presence means "logged
//! in". There are no accounts, no hashing, no expiry. The passphrase can be
//! overridden through the `FOREMAN_PASSPHRASE` environment variable.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{BoardError, Result, StorageResultExt};

/// Passphrase accepted when `FOREMAN_PASSPHRASE` is unset.
pub const DEFAULT_PASSPHRASE: &str = "foreman2025";

/// Environment variable overriding the accepted passphrase.
pub const PASSPHRASE_ENV: &str = "FOREMAN_PASSPHRASE";

/// Login state backed by a marker file.
pub struct Session {
    path: PathBuf,
}

impl Session {
    /// Create a session backed by the given marker path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a session at the default XDG state location
    /// (`$XDG_STATE_HOME/foreman/session`).
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Returns the default marker path following the XDG Base Directory
    /// specification.
    pub fn default_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("foreman")
            .place_state_file("session")
            .map_err(|e| BoardError::XdgDirectory(e.to_string()))
    }

    /// The marker path this session reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn accepted_passphrase() -> String {
        std::env::var(PASSPHRASE_ENV).unwrap_or_else(|_| DEFAULT_PASSPHRASE.to_string())
    }

    /// Check the passphrase and, on success, write the marker file.
    pub fn login(&self, passphrase: &str) -> Result<()> {
        if passphrase != Self::accepted_passphrase() {
            return Err(BoardError::IncorrectPassphrase);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).at_path(parent)?;
        }
        fs::write(&self.path, "authenticated\n").at_path(&self.path)?;
        debug!("session marker written to {}", self.path.display());
        Ok(())
    }

    /// Remove the marker file. Logging out while logged out is a no-op.
    pub fn logout(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BoardError::storage(&self.path, e)),
        }
    }

    /// Whether the marker file is present.
    pub fn is_authenticated(&self) -> bool {
        self.path.exists()
    }

    /// Error unless logged in. Gates every operation except login itself.
    pub fn require(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(BoardError::NotAuthenticated)
        }
    }
}
