use chrono::{NaiveDate, NaiveDateTime};
use hashbrown::HashMap;

use super::*;
use crate::context::{Settings, SettingsStore};
use crate::notify::RecordingNotifier;
use crate::timers::RespawnRegistry;

fn temp_store() -> (tempfile::TempDir, SettingsStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::at(dir.path().join("settings.yml"));
    store.save(&Settings::default()).unwrap();
    (dir, store)
}

fn command(kind: CommandKind, params: &str) -> Command {
    Command {
        kind,
        params: params.to_string(),
    }
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn test_set_duration_persists() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();

    let changed = apply(
        &command(CommandKind::SetDuration, "10"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    assert!(changed);
    assert_eq!(store.load().unwrap().notification_duration, 10);
    assert_eq!(notifier.titled("Успешно!").len(), 1);
}

#[test]
fn test_set_duration_rejects_non_numeric() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();

    let changed = apply(
        &command(CommandKind::SetDuration, "долго"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    assert!(!changed);
    assert_eq!(store.load().unwrap().notification_duration, 3);
    assert_eq!(notifier.titled("Ooops...").len(), 1);
}

#[test]
fn test_round_trip_preserves_untouched_fields() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();
    let before = store.load().unwrap();

    apply(
        &command(CommandKind::SetDuration, "10"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    let after = store.load().unwrap();
    assert_eq!(after.notification_duration, 10);
    assert_eq!(after.bosses_cooldown, before.bosses_cooldown);
    assert_eq!(after.blacklist, before.blacklist);
    assert_eq!(after.mines_cooldown, before.mines_cooldown);
    assert_eq!(after.colored, before.colored);
}

#[test]
fn test_add_boss_upserts_cooldown_in_minutes() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();

    let changed = apply(
        &command(CommandKind::AddBoss, "Хранитель подводного мира 120"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    assert!(changed);
    assert_eq!(
        store
            .load()
            .unwrap()
            .bosses_cooldown
            .get("Хранитель подводного мира"),
        Some(&120)
    );
}

#[test]
fn test_add_boss_rejects_non_numeric_cooldown() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();

    let changed = apply(
        &command(CommandKind::AddBoss, "Хранитель сто"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    assert!(!changed);
    assert!(!store
        .load()
        .unwrap()
        .bosses_cooldown
        .contains_key("Хранитель"));
    assert_eq!(notifier.titled("Ooops...").len(), 1);
}

#[test]
fn test_skip_boss_removes_record_without_reload_signal() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();
    let mut cooldowns = HashMap::new();
    cooldowns.insert("Холуй".to_string(), 2700);
    registry
        .record_kill("Холуй", at(10, 0, 0), &cooldowns)
        .unwrap();

    let changed = apply(
        &command(CommandKind::SkipBoss, "Холуй"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    assert!(!changed);
    assert!(registry.is_empty());
    assert_eq!(notifier.titled("Успешно!").len(), 1);
}

#[test]
fn test_skip_boss_unknown_name_rejects_batch() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();
    let mut cooldowns = HashMap::new();
    cooldowns.insert("Холуй".to_string(), 2700);
    cooldowns.insert("Матка".to_string(), 5400);
    registry
        .record_kill("Холуй", at(10, 0, 0), &cooldowns)
        .unwrap();
    registry
        .record_kill("Матка", at(10, 0, 0), &cooldowns)
        .unwrap();

    apply(
        &command(CommandKind::SkipBoss, "Холуй, Призрак"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(notifier.titled("Ooops...").len(), 1);
}

#[test]
fn test_blacklist_add_and_remove() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();

    apply(
        &command(CommandKind::BlacklistAdd, "Йети, Левиафан"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();
    assert_eq!(
        store.load().unwrap().blacklist,
        vec!["Йети".to_string(), "Левиафан".to_string()]
    );

    apply(
        &command(CommandKind::BlacklistRemove, "Йети"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();
    assert_eq!(store.load().unwrap().blacklist, vec!["Левиафан".to_string()]);
}

#[test]
fn test_add_mine_requires_configured_cooldown() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();

    let changed = apply(
        &command(CommandKind::AddMine, "Лунная жила"),
        &store,
        &mut registry,
        &notifier,
    )
    .unwrap();

    assert!(!changed);
    assert!(store.load().unwrap().mines_notifications.is_empty());
    assert_eq!(notifier.titled("Ooops...").len(), 1);
}

#[test]
fn test_add_mine_enrolls_once() {
    let (_dir, store) = temp_store();
    let notifier = RecordingNotifier::default();
    let mut registry = RespawnRegistry::new();

    for _ in 0..2 {
        let changed = apply(
            &command(CommandKind::AddMine, "Железная жила"),
            &store,
            &mut registry,
            &notifier,
        )
        .unwrap();
        assert!(changed);
    }

    assert_eq!(
        store.load().unwrap().mines_notifications,
        vec!["Железная жила".to_string()]
    );
}
