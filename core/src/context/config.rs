//! The persisted settings document and its store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

pub const APP_NAME: &str = "vimewatch";
pub const SETTINGS_NAME: &str = "settings";

/// The whole on-disk document. Loaded and rewritten as a unit; a field
/// never changes on disk without every other field being carried along.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Boss name → respawn cooldown in minutes.
    #[serde(default = "default_boss_cooldowns")]
    pub bosses_cooldown: HashMap<String, u64>,

    /// Bosses excluded from notification firing. They stay tracked and
    /// listed.
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Seconds a desktop notification stays visible.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Mine name → refresh cooldown in seconds.
    #[serde(default = "default_mine_cooldowns")]
    pub mines_cooldown: HashMap<String, u64>,

    #[serde(default = "default_true")]
    pub colored: bool,

    /// Mines enrolled for refresh notifications. Enrollment is per-run:
    /// the list is emptied at every process start.
    #[serde(default)]
    pub mines_notifications: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bosses_cooldown: default_boss_cooldowns(),
            blacklist: Vec::new(),
            notification_duration: default_notification_duration(),
            mines_cooldown: default_mine_cooldowns(),
            colored: true,
            mines_notifications: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_notification_duration() -> u64 {
    3
}

fn default_boss_cooldowns() -> HashMap<String, u64> {
    [
        ("Королевский зомби", 20),
        ("Холуй", 45),
        ("Сточный слизень", 60),
        ("Фенрир", 90),
        ("Матка", 90),
        ("Всадники апокалипсиса", 150),
        ("Левиафан", 150),
        ("Коровка из Коровёнки", 150),
        ("Йети", 180),
        ("Житель края", 180),
    ]
    .into_iter()
    .map(|(name, minutes)| (name.to_string(), minutes))
    .collect()
}

fn default_mine_cooldowns() -> HashMap<String, u64> {
    [
        ("Железная жила", 300),
        ("Золотая жила", 600),
        ("Алмазная жила", 900),
    ]
    .into_iter()
    .map(|(name, seconds)| (name.to_string(), seconds))
    .collect()
}

/// Handle to the settings document on disk. Every mutation is a
/// whole-document read-modify-write; the loop is single-threaded, so two
/// of ours never overlap, but an external editor racing us between read
/// and write loses its update.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the platform configuration directory.
    pub fn open_default() -> Result<Self, ConfigError> {
        let path = confy::get_configuration_file_path(APP_NAME, SETTINGS_NAME)
            .map_err(ConfigError::ResolvePath)?;
        Ok(Self { path })
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings, ConfigError> {
        confy::load_path(&self.path).map_err(|source| ConfigError::Load {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        confy::store_path(&self.path, settings).map_err(|source| ConfigError::Store {
            path: self.path.clone(),
            source,
        })
    }

    /// Whole-document read-modify-write. The mutation is committed only
    /// once the rewritten document is on disk.
    pub fn update<F>(&self, mutate: F) -> Result<Settings, ConfigError>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.load()?;
        mutate(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }
}

/// The launcher keeps minigame logs under the user profile.
pub fn default_log_directory() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir()
            .unwrap_or_default()
            .join(".vimeworld")
            .join("minigames")
            .join("logs")
    }
    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir()
            .unwrap_or_default()
            .join(".vimeworld")
            .join("minigames")
            .join("logs")
    }
}
