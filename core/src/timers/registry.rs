use chrono::NaiveDateTime;
use hashbrown::{HashMap, HashSet};

use super::error::TimerError;

/// One row of the status listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub name: String,
    pub respawn_at: NaiveDateTime,
}

/// Respawn schedule: boss name → next expected spawn instant. Records
/// are only ever removed by an explicit skip; a boss that stays past its
/// instant keeps showing as due.
#[derive(Debug, Default)]
pub struct RespawnRegistry {
    respawns: HashMap<String, NaiveDateTime>,
}

impl RespawnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a kill. The boss must have a configured cooldown; a repeat
    /// kill overwrites the previous record (last kill wins).
    pub fn record_kill(
        &mut self,
        name: &str,
        at: NaiveDateTime,
        cooldowns: &HashMap<String, u64>,
    ) -> Result<NaiveDateTime, TimerError> {
        let secs = cooldowns
            .get(name)
            .copied()
            .ok_or_else(|| TimerError::UnknownBoss {
                name: name.to_string(),
            })?;
        let respawn = at + chrono::Duration::seconds(secs as i64);
        self.respawns.insert(name.to_string(), respawn);
        Ok(respawn)
    }

    pub fn is_due(&self, name: &str, now: NaiveDateTime) -> bool {
        self.respawns
            .get(name)
            .is_some_and(|respawn| now >= *respawn)
    }

    /// Remove the records for every listed boss. All-or-nothing: a
    /// single unknown name rejects the batch and leaves the registry
    /// untouched.
    pub fn skip(&mut self, names: &[&str]) -> Result<(), TimerError> {
        for name in names {
            if !self.respawns.contains_key(*name) {
                return Err(TimerError::NoRespawnRecord {
                    name: (*name).to_string(),
                });
            }
        }
        for name in names {
            self.respawns.remove(*name);
        }
        Ok(())
    }

    /// Due bosses eligible for a notification. Blacklisted bosses stay
    /// tracked but never fire.
    pub fn due(&self, now: NaiveDateTime, blacklist: &HashSet<String>) -> Vec<String> {
        let mut due: Vec<String> = self
            .respawns
            .iter()
            .filter(|(name, respawn)| now >= **respawn && !blacklist.contains(*name))
            .map(|(name, _)| name.clone())
            .collect();
        due.sort();
        due
    }

    /// The full schedule, soonest first. Includes blacklisted bosses.
    pub fn schedule(&self) -> Vec<ScheduleEntry> {
        let mut entries: Vec<ScheduleEntry> = self
            .respawns
            .iter()
            .map(|(name, respawn_at)| ScheduleEntry {
                name: name.clone(),
                respawn_at: *respawn_at,
            })
            .collect();
        entries.sort_by(|a, b| a.respawn_at.cmp(&b.respawn_at).then(a.name.cmp(&b.name)));
        entries
    }

    pub fn len(&self) -> usize {
        self.respawns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respawns.is_empty()
    }
}
