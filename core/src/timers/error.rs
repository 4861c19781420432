//! Error types for respawn bookkeeping

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("для босса {name} не задан кулдаун")]
    UnknownBoss { name: String },

    #[error("нет активной записи о респавне босса {name}")]
    NoRespawnRecord { name: String },
}
