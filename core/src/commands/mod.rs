//! The in-game chat command vocabulary and its handlers.

mod processor;

#[cfg(test)]
mod processor_tests;

pub use processor::{apply, STALENESS_WINDOW_SECS};

use phf::phf_map;

/// Character a chat message must start a command with.
pub const COMMAND_PREFIX: char = '~';

/// Closed verb vocabulary. Anything else after the prefix is invalid.
static VERBS: phf::Map<&'static str, CommandKind> = phf_map! {
    "set-duration" => CommandKind::SetDuration,
    "add-boss" => CommandKind::AddBoss,
    "skip-boss" => CommandKind::SkipBoss,
    "blacklist-add" => CommandKind::BlacklistAdd,
    "blacklist-remove" => CommandKind::BlacklistRemove,
    "add-mine" => CommandKind::AddMine,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    SetDuration,
    AddBoss,
    SkipBoss,
    BlacklistAdd,
    BlacklistRemove,
    AddMine,
}

impl CommandKind {
    pub fn from_verb(verb: &str) -> Option<Self> {
        VERBS.get(verb).copied()
    }
}

/// A self-issued command extracted from the live log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub params: String,
}
