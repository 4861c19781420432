use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use memchr::{memchr, memmem};
use regex::Regex;

use super::{ChatEvent, LogSource};
use crate::commands::{Command, CommandKind, COMMAND_PREFIX};


// Boss defeat announcement from the chat system, e.g.
// `[13:05:59] [Client thread/INFO]: [CHAT] Холуй был повержен за 11 секунд`.
// The name class is restricted to one alphabet plus spaces so partial
// matches cannot bleed into surrounding text; the plural `Все ` qualifier
// is matched but not captured.
static KILL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\[(\d{2}:\d{2}:\d{2})\] \[Client thread/INFO\]: \[CHAT\] (?:Все )?([А-Яа-яЁё ]+?) был[аи]? повержен[ыа]?",
    )
    .expect("kill pattern is valid")
});

pub struct LogParser {
    date: NaiveDate,
    /// Compiled once the active player is known; chat carries every
    /// player's messages, so commands are matched against the sender.
    command_pattern: Option<Regex>,
}

impl LogParser {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            command_pattern: None,
        }
    }

    /// Commands are only extracted once the active account is known.
    pub fn set_player(&mut self, nick: &str) {
        let pattern = format!(
            r"^\[(\d{{2}}:\d{{2}}:\d{{2}})\] \[Client thread/INFO\]: \[CHAT\] .*{}.*[:>] ~([a-z-]+) ?(.*)$",
            regex::escape(nick)
        );
        self.command_pattern = Some(Regex::new(&pattern).expect("command pattern is valid"));
    }

    /// The log format has no date field; lines are stamped with whatever
    /// date the parser currently carries.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn parse_line(&self, line: &str, source: LogSource) -> Option<ChatEvent> {
        let bytes = line.as_bytes();

        if memmem::find(bytes, "повержен".as_bytes()).is_some() {
            if let Some(caps) = KILL_PATTERN.captures(line) {
                let at = self.timestamp(caps.get(1)?.as_str())?;
                let name = caps.get(2)?.as_str().to_string();
                return Some(ChatEvent::BossKilled { name, at });
            }
        }

        if source == LogSource::Live && memchr(COMMAND_PREFIX as u8, bytes).is_some() {
            if let Some(pattern) = &self.command_pattern {
                if let Some(caps) = pattern.captures(line) {
                    let at = self.timestamp(caps.get(1)?.as_str())?;
                    let verb = caps.get(2)?.as_str();
                    let params = caps.get(3)?.as_str().trim().to_string();
                    return Some(match CommandKind::from_verb(verb) {
                        Some(kind) => ChatEvent::CommandIssued {
                            command: Command { kind, params },
                            at,
                        },
                        None => ChatEvent::InvalidCommand {
                            verb: verb.to_string(),
                            at,
                        },
                    });
                }
            }
        }

        None
    }

    // parse HH:MM:SS and combine with the current calendar date. Lines
    // written shortly before midnight in a process that crosses it get
    // the new date; known limitation of the log format.
    fn timestamp(&self, segment: &str) -> Option<NaiveDateTime> {
        let time = NaiveTime::parse_from_str(segment, "%H:%M:%S").ok()?;
        Some(self.date.and_time(time))
    }
}
