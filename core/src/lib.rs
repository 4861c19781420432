pub mod chat_log;
pub mod commands;
pub mod context;
pub mod notify;
pub mod scheduler;
pub mod timers;

// Re-exports for convenience
pub use chat_log::{ChatEvent, LogParser, LogReader, LogSource, LIVE_LOG_NAME};
pub use commands::{Command, CommandKind};
pub use context::{Settings, SettingsStore, WatchContext};
pub use notify::{Notification, Notifier};
pub use scheduler::{Scheduler, TickReport, WatchError};
pub use timers::{MineBoard, RespawnRegistry, ScheduleEntry, TimerError};
