//! Chat log access: incremental tailing of the live log, replay of
//! same-day compressed segments, and extraction of typed events from
//! raw chat lines.

mod archive;
mod error;
mod parser;
mod reader;

pub use archive::{read_archive_lines, same_day_archives};
pub use error::{ArchiveError, ReaderError};
pub use parser::LogParser;
pub use reader::LogReader;

use chrono::NaiveDateTime;

use crate::commands::Command;

/// Filename of the log the client is currently appending to.
pub const LIVE_LOG_NAME: &str = "latest.log";

/// Where a line came from. Commands are only honored on the live log;
/// archival replay updates the respawn schedule and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    Live,
    Archive,
}

/// One recognized chat event. Lines carrying nothing of interest
/// produce no event at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    BossKilled {
        name: String,
        at: NaiveDateTime,
    },
    CommandIssued {
        command: Command,
        at: NaiveDateTime,
    },
    /// The command prefix was present but the verb is not in the
    /// vocabulary.
    InvalidCommand {
        verb: String,
        at: NaiveDateTime,
    },
}
