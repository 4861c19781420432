use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info};

use super::WatchError;
use crate::chat_log::{
    read_archive_lines, same_day_archives, ChatEvent, LogParser, LogReader, LogSource,
    LIVE_LOG_NAME,
};
use crate::commands::{self, STALENESS_WINDOW_SECS};
use crate::context::WatchContext;
use crate::notify::{Notification, Notifier};
use crate::timers::{MineBoard, RespawnRegistry, ScheduleEntry};

/// Seconds between ticks.
pub const TICK_SECS: u64 = 1;

/// Boss evaluation and the status listing run every Nth tick.
pub const BOSS_EVAL_EVERY: u64 = 60;

/// Daily server-event reminder instants (hour, minute), a few minutes
/// ahead of the events themselves.
const REMINDER_TIMES: [(u32, u32); 4] = [(5, 55), (11, 55), (17, 55), (23, 55)];
const REMINDER_TITLE: &str = "Ивент";
const REMINDER_MESSAGE: &str = "Скоро начнётся ивент на сервере";

/// What a tick produced for the front-end to render.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Present on boss-evaluation ticks: the full schedule, soonest
    /// first, blacklisted bosses included.
    pub schedule: Option<Vec<ScheduleEntry>>,
}

pub struct Scheduler {
    ctx: WatchContext,
    registry: RespawnRegistry,
    mines: MineBoard,
    parser: LogParser,
    reader: LogReader,
    notifier: Box<dyn Notifier>,
    player: String,
    ticks: u64,
    reminders_fired: [Option<NaiveDate>; REMINDER_TIMES.len()],
}

impl Scheduler {
    /// Catch up from today's compressed segments, then open the live log
    /// and learn the active account. Replay only seeds the respawn
    /// schedule: no notifications, no command side effects.
    pub async fn start(
        mut ctx: WatchContext,
        log_dir: &Path,
        notifier: Box<dyn Notifier>,
        now: NaiveDateTime,
    ) -> Result<Self, WatchError> {
        ctx.clear_mine_enrollments()?;

        let mut parser = LogParser::new(now.date());
        let mut registry = RespawnRegistry::new();

        let archives = same_day_archives(log_dir, now.date())?;
        for path in &archives {
            for line in read_archive_lines(path)? {
                if let Some(ChatEvent::BossKilled { name, at }) =
                    parser.parse_line(&line, LogSource::Archive)
                {
                    // catch-up is best-effort: kills of bosses nobody
                    // configured are not surfaced to the user here
                    if let Err(err) = registry.record_kill(&name, at, &ctx.cooldowns) {
                        debug!(%err, "archive replay skipped a kill");
                    }
                }
            }
        }
        info!(
            archives = archives.len(),
            tracked = registry.len(),
            "archive catch-up complete"
        );

        let mut reader = LogReader::open(&log_dir.join(LIVE_LOG_NAME)).await?;
        let player = reader.read_player_name().await?;
        info!(player = %player, "watching live log");
        parser.set_player(&player);

        // instants already past at startup must not fire retroactively
        let reminders_fired = REMINDER_TIMES.map(|(hour, minute)| {
            NaiveTime::from_hms_opt(hour, minute, 0)
                .filter(|instant| now.time() >= *instant)
                .map(|_| now.date())
        });

        Ok(Self {
            ctx,
            registry,
            mines: MineBoard::new(),
            parser,
            reader,
            notifier,
            player,
            ticks: 0,
            reminders_fired,
        })
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn context(&self) -> &WatchContext {
        &self.ctx
    }

    /// One iteration of the loop.
    pub async fn tick(&mut self, now: NaiveDateTime) -> Result<TickReport, WatchError> {
        self.ticks += 1;
        self.parser.set_date(now.date());
        self.check_reminders(now);

        for line in self.reader.drain_lines().await? {
            self.apply_line(&line, now)?;
        }

        for name in self
            .mines
            .advance(&self.ctx.active_mines, &self.ctx.mine_cooldowns)
        {
            self.notifier
                .show(&Notification::mine(&name, self.ctx.notification_duration));
        }

        let schedule = if (self.ticks - 1) % BOSS_EVAL_EVERY == 0 {
            Some(self.evaluate_bosses(now))
        } else {
            None
        };

        Ok(TickReport { schedule })
    }

    fn apply_line(&mut self, line: &str, now: NaiveDateTime) -> Result<(), WatchError> {
        match self.parser.parse_line(line, LogSource::Live) {
            Some(ChatEvent::BossKilled { name, at }) => {
                match self.registry.record_kill(&name, at, &self.ctx.cooldowns) {
                    Ok(respawn) => info!(boss = %name, %respawn, "kill recorded"),
                    Err(err) => self.notifier.show(&Notification::error(&err.to_string())),
                }
            }
            Some(ChatEvent::CommandIssued { command, at }) => {
                let age = now.signed_duration_since(at).num_seconds();
                if age > STALENESS_WINDOW_SECS {
                    debug!(kind = ?command.kind, age, "stale command ignored");
                    return Ok(());
                }
                let changed = commands::apply(
                    &command,
                    self.ctx.store(),
                    &mut self.registry,
                    self.notifier.as_ref(),
                )?;
                if changed {
                    self.ctx.reload()?;
                }
            }
            Some(ChatEvent::InvalidCommand { verb, .. }) => {
                debug!(%verb, "unrecognized command verb");
                self.notifier
                    .show(&Notification::error("Неправильная команда"));
            }
            None => {}
        }
        Ok(())
    }

    /// Fire a boss notification for everything due and not blacklisted,
    /// and hand back the full listing for display.
    fn evaluate_bosses(&mut self, now: NaiveDateTime) -> Vec<ScheduleEntry> {
        for name in self.registry.due(now, &self.ctx.blacklist) {
            self.notifier
                .show(&Notification::boss(&name, self.ctx.notification_duration));
        }
        self.registry.schedule()
    }

    /// At most one firing per instant per day, independent of the
    /// respawn schedule.
    fn check_reminders(&mut self, now: NaiveDateTime) {
        for (idx, (hour, minute)) in REMINDER_TIMES.iter().enumerate() {
            let Some(instant) = NaiveTime::from_hms_opt(*hour, *minute, 0) else {
                continue;
            };
            if now.time() >= instant && self.reminders_fired[idx] != Some(now.date()) {
                self.reminders_fired[idx] = Some(now.date());
                self.notifier.show(&Notification::new(
                    REMINDER_TITLE,
                    REMINDER_MESSAGE,
                    None,
                    self.ctx.notification_duration,
                ));
            }
        }
    }
}
