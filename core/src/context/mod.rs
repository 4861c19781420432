//! Runtime settings context.
//!
//! The persisted document is the source of truth; [`WatchContext`] is
//! the derived in-memory view the extractor, command processor, and
//! scheduler all read. Commands mutate the document through the store,
//! then the scheduler reloads the whole view at a single point.

mod config;
mod error;

pub use config::{default_log_directory, Settings, SettingsStore, APP_NAME, SETTINGS_NAME};
pub use error::ConfigError;

use hashbrown::{HashMap, HashSet};

/// Derived, reloadable view of the settings document.
#[derive(Debug)]
pub struct WatchContext {
    store: SettingsStore,
    /// Boss name → cooldown in seconds (the document stores minutes).
    pub cooldowns: HashMap<String, u64>,
    pub blacklist: HashSet<String>,
    pub notification_duration: u64,
    /// Mine name → cooldown in seconds.
    pub mine_cooldowns: HashMap<String, u64>,
    /// Mines enrolled for refresh notifications this run.
    pub active_mines: Vec<String>,
    pub colored: bool,
}

impl WatchContext {
    pub fn load(store: SettingsStore) -> Result<Self, ConfigError> {
        let mut ctx = Self {
            store,
            cooldowns: HashMap::new(),
            blacklist: HashSet::new(),
            notification_duration: 0,
            mine_cooldowns: HashMap::new(),
            active_mines: Vec::new(),
            colored: false,
        };
        ctx.reload()?;
        Ok(ctx)
    }

    /// Re-derive every in-memory setting from the persisted document.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let settings = self.store.load()?;
        self.cooldowns = settings
            .bosses_cooldown
            .iter()
            .map(|(name, minutes)| (name.clone(), minutes * 60))
            .collect();
        self.blacklist = settings.blacklist.iter().cloned().collect();
        self.notification_duration = settings.notification_duration;
        self.mine_cooldowns = settings.mines_cooldown.into_iter().collect();
        self.active_mines = settings.mines_notifications;
        self.colored = settings.colored;
        Ok(())
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Mine enrollments do not survive a restart; the persisted list is
    /// emptied before the first tick.
    pub fn clear_mine_enrollments(&mut self) -> Result<(), ConfigError> {
        self.store
            .update(|settings| settings.mines_notifications.clear())?;
        self.active_mines.clear();
        Ok(())
    }
}
