//! The once-per-second orchestration engine.
//!
//! One [`Scheduler::tick`] drains new chat lines, routes extracted
//! events into the respawn registry and command processor, advances the
//! mine stopwatches, and every minute evaluates which bosses are due.
//! The front-end owns the interval loop and rendering; `tick` takes the
//! current instant as an argument so tests can drive simulated clocks.

mod engine;


pub use engine::{Scheduler, TickReport, BOSS_EVAL_EVERY, TICK_SECS};

use thiserror::Error;

use crate::chat_log::{ArchiveError, ReaderError};
use crate::context::ConfigError;

/// Fatal watcher errors. Anything here means a human has to intervene;
/// there are no retries.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
