//! Persistence of the selected city list.
//!
//! This module handles loading and saving the comma-joined city id list
//! in TOML format with platform-specific directory resolution. Storage
//! failures are never fatal: the dashboard degrades to session-only state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::APP_DATA_DIR;

/// On-disk document holding the persisted selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
struct HubsFile {
    /// Comma-joined city id list under the dashboard's storage key
    #[serde(rename = "global-clock-hubs", default)]
    hubs: String,
}

/// Key-value store for the persisted city selection.
///
/// # File Location
///
/// - Linux: `~/.config/GlobalClock/hubs.toml`
/// - macOS: `~/Library/Application Support/GlobalClock/hubs.toml`
/// - Windows: `%APPDATA%\GlobalClock\hubs.toml`
#[derive(Debug, Clone)]
pub struct HubStore {
    path: Option<PathBuf>,
}

impl HubStore {
    /// Opens the store at the platform default location.
    ///
    /// When no config directory can be resolved the store still works,
    /// it just never reads or writes anything.
    #[must_use]
    pub fn open() -> Self {
        Self {
            path: Self::default_path().ok(),
        }
    }

    /// Opens a store backed by an explicit file path (used by tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// A store with no backing file: every read misses, every write no-ops.
    #[must_use]
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Gets the platform-specific store file path.
    fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);
        Ok(config_dir.join("hubs.toml"))
    }

    /// Reads the persisted comma-joined city id list.
    ///
    /// Returns `None` when the file is missing, unreadable, or malformed;
    /// a broken store is treated the same as an empty one.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let content = fs::read_to_string(path).ok()?;
        let file: HubsFile = toml::from_str(&content).ok()?;
        if file.hubs.is_empty() {
            None
        } else {
            Some(file.hubs)
        }
    }

    /// Writes the comma-joined city id list using an atomic write.
    ///
    /// Uses the temp file + rename pattern so a crash mid-write never
    /// leaves a truncated store behind.
    ///
    /// # Errors
    ///
    /// Returns an error when the store directory or file cannot be written.
    /// Callers on the UI path ignore the error (persistence silently
    /// degrades); it is surfaced for tests and diagnostics.
    pub fn save(&self, ids: &str) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create store directory: {}",
                parent.display()
            ))?;
        }

        let file = HubsFile {
            hubs: ids.to_string(),
        };
        let content =
            toml::to_string_pretty(&file).context("Failed to serialize city selection")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp store file: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp store file to: {}",
            path.display()
        ))?;

        Ok(())
    }
}

impl Default for HubStore {
    fn default() -> Self {
        Self::open()
    }
}
