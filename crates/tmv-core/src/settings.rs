//! User settings and their persistence.
//!
//! Settings live in `<vault>/.tmv/settings.json` using camelCase keys:
//! ```json
//! {
//!   "enabled": true,
//!   "propertyName": "topic",
//!   "baseFolder": "",
//!   "useSubfolders": false,
//!   "subfolderProperty": "subtopic",
//!   "normalizeFolderNames": true,
//!   "createFolders": true
//! }
//! ```
//! Any field missing from the file falls back to its default.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TmvError};

/// Directory inside the vault holding topic-mover state.
pub const STATE_DIR: &str = ".tmv";

/// Settings file name inside [`STATE_DIR`].
pub const SETTINGS_FILE: &str = "settings.json";

/// The user-configurable options of the mover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch for automatic moving.
    pub enabled: bool,
    /// Frontmatter property naming the main folder.
    pub property_name: String,
    /// Optional folder all sorted notes go under.
    pub base_folder: String,
    /// Whether to nest by a second property.
    pub use_subfolders: bool,
    /// Frontmatter property naming the subfolder.
    pub subfolder_property: String,
    /// Lowercase and slugify folder names.
    pub normalize_folder_names: bool,
    /// Create missing target folders.
    pub create_folders: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            property_name: "topic".to_string(),
            base_folder: String::new(),
            use_subfolders: false,
            subfolder_property: "subtopic".to_string(),
            normalize_folder_names: true,
            create_folders: true,
        }
    }
}

/// One control of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Enabled,
    PropertyName,
    BaseFolder,
    UseSubfolders,
    SubfolderProperty,
    NormalizeFolderNames,
    CreateFolders,
}

impl SettingKey {
    pub const ALL: [SettingKey; 7] = [
        SettingKey::Enabled,
        SettingKey::PropertyName,
        SettingKey::BaseFolder,
        SettingKey::UseSubfolders,
        SettingKey::SubfolderProperty,
        SettingKey::NormalizeFolderNames,
        SettingKey::CreateFolders,
    ];

    /// Key as stored in the settings file.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::PropertyName => "propertyName",
            Self::BaseFolder => "baseFolder",
            Self::UseSubfolders => "useSubfolders",
            Self::SubfolderProperty => "subfolderProperty",
            Self::NormalizeFolderNames => "normalizeFolderNames",
            Self::CreateFolders => "createFolders",
        }
    }

    /// Short help text shown next to the control.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Enabled => "Turn automatic file moving on or off",
            Self::PropertyName => "Frontmatter property used for folder organization",
            Self::BaseFolder => "Folder all sorted notes go under (empty: vault root)",
            Self::UseSubfolders => "Nest notes by a second property (topic/subtopic)",
            Self::SubfolderProperty => "Frontmatter property used for the subfolder",
            Self::NormalizeFolderNames => "Lowercase folder names and strip special characters",
            Self::CreateFolders => "Create target folders that do not exist",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = TmvError;

    fn from_str(s: &str) -> Result<Self> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str().to_ascii_lowercase() == folded)
            .ok_or_else(|| TmvError::Settings(format!("unknown setting '{s}'")))
    }
}

fn parse_toggle(key: SettingKey, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(TmvError::Settings(format!(
            "'{key}' expects true or false, got '{other}'"
        ))),
    }
}

impl Settings {
    /// Update one control from its textual value.
    ///
    /// Text fields are stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TmvError::Settings`] if a toggle value is not a boolean.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<()> {
        match key {
            SettingKey::Enabled => self.enabled = parse_toggle(key, value)?,
            SettingKey::PropertyName => self.property_name = value.trim().to_string(),
            SettingKey::BaseFolder => self.base_folder = value.trim().to_string(),
            SettingKey::UseSubfolders => self.use_subfolders = parse_toggle(key, value)?,
            SettingKey::SubfolderProperty => self.subfolder_property = value.trim().to_string(),
            SettingKey::NormalizeFolderNames => {
                self.normalize_folder_names = parse_toggle(key, value)?;
            }
            SettingKey::CreateFolders => self.create_folders = parse_toggle(key, value)?,
        }
        Ok(())
    }

    /// Current value of one control, as text.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Enabled => self.enabled.to_string(),
            SettingKey::PropertyName => self.property_name.clone(),
            SettingKey::BaseFolder => self.base_folder.clone(),
            SettingKey::UseSubfolders => self.use_subfolders.to_string(),
            SettingKey::SubfolderProperty => self.subfolder_property.clone(),
            SettingKey::NormalizeFolderNames => self.normalize_folder_names.to_string(),
            SettingKey::CreateFolders => self.create_folders.to_string(),
        }
    }

    /// Controls shown in the panel, in order. The subfolder property is
    /// only shown while subfolders are on.
    #[must_use]
    pub fn controls(&self) -> Vec<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .filter(|key| *key != SettingKey::SubfolderProperty || self.use_subfolders)
            .collect()
    }
}

/// Loads and saves [`Settings`] for one vault.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store for the vault rooted at `vault_root`.
    #[must_use]
    pub fn new(vault_root: &Path) -> Self {
        Self {
            path: vault_root.join(STATE_DIR).join(SETTINGS_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load settings, merging whatever is persisted over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TmvError::Io`] if the file exists but cannot be read, and
    /// [`TmvError::Settings`] if it is not valid JSON.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_json::from_str(&raw)
            .map_err(|e| TmvError::Settings(format!("{}: {e}", self.path.display())))
    }

    /// Persist settings, creating the state directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`TmvError::Io`] on write failure.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| TmvError::Serialization(e.to_string()))?;
        fs::write(&self.path, json + "\n")?;
        Ok(())
    }
}
