use tracing::info;

use crate::context::{ConfigError, SettingsStore};
use crate::notify::{Notification, Notifier};
use crate::timers::RespawnRegistry;

use super::{Command, CommandKind};

/// Maximum age of a command's chat timestamp for it to be honored. An
/// older line is a replay, not an instruction.
pub const STALENESS_WINDOW_SECS: i64 = 120;

/// Apply one extracted command. Validation failures are reported through
/// the notifier and nothing is persisted; only a failure to reach the
/// settings document itself is an error. Returns true when the persisted
/// settings changed and the derived context must be reloaded.
pub fn apply(
    command: &Command,
    store: &SettingsStore,
    registry: &mut RespawnRegistry,
    notifier: &dyn Notifier,
) -> Result<bool, ConfigError> {
    info!(kind = ?command.kind, params = %command.params, "applying chat command");
    match command.kind {
        CommandKind::SetDuration => set_duration(&command.params, store, notifier),
        CommandKind::AddBoss => add_boss(&command.params, store, notifier),
        CommandKind::SkipBoss => skip_boss(&command.params, registry, notifier),
        CommandKind::BlacklistAdd => blacklist_add(&command.params, store, notifier),
        CommandKind::BlacklistRemove => blacklist_remove(&command.params, store, notifier),
        CommandKind::AddMine => add_mine(&command.params, store, notifier),
    }
}

fn set_duration(
    params: &str,
    store: &SettingsStore,
    notifier: &dyn Notifier,
) -> Result<bool, ConfigError> {
    let Ok(duration) = params.trim().parse::<u64>() else {
        notifier.show(&Notification::error(
            "Длительность оповещения должна быть числом (количество секунд)",
        ));
        return Ok(false);
    };
    store.update(|settings| settings.notification_duration = duration)?;
    notifier.show(&Notification::success("Длительность оповещения изменена"));
    Ok(true)
}

fn add_boss(
    params: &str,
    store: &SettingsStore,
    notifier: &dyn Notifier,
) -> Result<bool, ConfigError> {
    let Some((name, minutes)) = params.trim().rsplit_once(' ') else {
        notifier.show(&Notification::error("Укажите имя босса и кулдаун"));
        return Ok(false);
    };
    let Ok(minutes) = minutes.parse::<u64>() else {
        notifier.show(&Notification::error(
            "Кулдаун респавна босса должен быть числом (количество минут)",
        ));
        return Ok(false);
    };
    let name = name.trim().to_string();
    store.update(|settings| {
        settings.bosses_cooldown.insert(name, minutes);
    })?;
    notifier.show(&Notification::success("Босс добавлен"));
    Ok(true)
}

/// Skips only touch the in-memory schedule; the settings document is not
/// involved, so no reload is signaled even on success.
fn skip_boss(
    params: &str,
    registry: &mut RespawnRegistry,
    notifier: &dyn Notifier,
) -> Result<bool, ConfigError> {
    let names = split_names(params);
    if names.is_empty() {
        notifier.show(&Notification::error("Укажите имя босса"));
        return Ok(false);
    }
    match registry.skip(&names) {
        Ok(()) => notifier.show(&Notification::success("Босс пропущен")),
        Err(_) => notifier.show(&Notification::error("Указано некорректное имя босса")),
    }
    Ok(false)
}

fn blacklist_add(
    params: &str,
    store: &SettingsStore,
    notifier: &dyn Notifier,
) -> Result<bool, ConfigError> {
    let names = split_names(params);
    store.update(|settings| {
        settings
            .blacklist
            .extend(names.iter().map(|name| name.to_string()));
    })?;
    notifier.show(&Notification::success("Чёрный список обновлён"));
    Ok(true)
}

fn blacklist_remove(
    params: &str,
    store: &SettingsStore,
    notifier: &dyn Notifier,
) -> Result<bool, ConfigError> {
    let names = split_names(params);
    store.update(|settings| {
        settings
            .blacklist
            .retain(|name| !names.contains(&name.as_str()));
    })?;
    notifier.show(&Notification::success("Чёрный список обновлён"));
    Ok(true)
}

fn add_mine(
    params: &str,
    store: &SettingsStore,
    notifier: &dyn Notifier,
) -> Result<bool, ConfigError> {
    let name = params.trim();
    let settings = store.load()?;
    if !settings.mines_cooldown.contains_key(name) {
        notifier.show(&Notification::error("Неизвестная шахта"));
        return Ok(false);
    }
    if !settings.mines_notifications.iter().any(|m| m.as_str() == name) {
        let name = name.to_string();
        store.update(|settings| settings.mines_notifications.push(name))?;
    }
    notifier.show(&Notification::success("Шахта добавлена"));
    Ok(true)
}

fn split_names(params: &str) -> Vec<&str> {
    params
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}
