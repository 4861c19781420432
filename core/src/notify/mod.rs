//! Desktop notification delivery.
//!
//! Thin adapters over the platform notification helper, selected once at
//! startup. Delivery is fire-and-forget: a backend that cannot reach its
//! helper degrades to console output instead of failing the loop.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::warn;

/// Icons shipped next to the executable.
pub const ICONS_DIR: &str = "icons";

const SUCCESS_TITLE: &str = "Успешно!";
const ERROR_TITLE: &str = "Ooops...";
const SUCCESS_DURATION_SECS: u64 = 3;
const ERROR_DURATION_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon: Option<PathBuf>,
    pub duration_secs: u64,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        icon: Option<PathBuf>,
        duration_secs: u64,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            icon,
            duration_secs,
        }
    }

    pub fn success(message: &str) -> Self {
        Self::new(
            SUCCESS_TITLE,
            message,
            Some(success_icon()),
            SUCCESS_DURATION_SECS,
        )
    }

    pub fn error(message: &str) -> Self {
        Self::new(ERROR_TITLE, message, Some(error_icon()), ERROR_DURATION_SECS)
    }

    pub fn boss(name: &str, duration_secs: u64) -> Self {
        Self::new("Босс", name, Some(boss_icon(name)), duration_secs)
    }

    pub fn mine(name: &str, duration_secs: u64) -> Self {
        Self::new(
            "Шахта",
            format!("{name} скоро обновится"),
            Some(success_icon()),
            duration_secs,
        )
    }
}

pub fn success_icon() -> PathBuf {
    Path::new(ICONS_DIR).join("success.ico")
}

pub fn error_icon() -> PathBuf {
    Path::new(ICONS_DIR).join("error.ico")
}

pub fn boss_icon(name: &str) -> PathBuf {
    Path::new(ICONS_DIR).join(format!("{name}.ico"))
}

/// Capability interface for transient desktop alerts. Implementations
/// must never propagate delivery failures to the caller.
pub trait Notifier {
    fn show(&self, note: &Notification);
}

/// Pick the backend for the current platform, once at startup.
pub fn platform_backend() -> Box<dyn Notifier> {
    #[cfg(target_os = "linux")]
    return Box::new(NotifySendBackend);
    #[cfg(target_os = "macos")]
    return Box::new(OsaScriptBackend);
    #[cfg(target_os = "windows")]
    return Box::new(ToastBackend);
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    Box::new(ConsoleBackend)
}

/// Fallback for unsupported platforms, and the degradation target when a
/// native helper cannot be spawned.
pub struct ConsoleBackend;

impl Notifier for ConsoleBackend {
    fn show(&self, note: &Notification) {
        println!("[{}] {}", note.title, note.message);
    }
}

#[cfg(target_os = "linux")]
pub struct NotifySendBackend;

#[cfg(target_os = "linux")]
impl Notifier for NotifySendBackend {
    fn show(&self, note: &Notification) {
        let mut cmd = Command::new("notify-send");
        cmd.arg("-t").arg((note.duration_secs * 1000).to_string());
        if let Some(icon) = &note.icon {
            cmd.arg("-i").arg(icon);
        }
        cmd.arg(&note.title).arg(&note.message);
        if let Err(err) = cmd.status() {
            warn!("notify-send unavailable ({err}), falling back to console");
            ConsoleBackend.show(note);
        }
    }
}

#[cfg(target_os = "macos")]
pub struct OsaScriptBackend;

#[cfg(target_os = "macos")]
impl Notifier for OsaScriptBackend {
    fn show(&self, note: &Notification) {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            note.message.replace('"', " "),
            note.title.replace('"', " ")
        );
        if let Err(err) = Command::new("osascript").arg("-e").arg(script).status() {
            warn!("osascript unavailable ({err}), falling back to console");
            ConsoleBackend.show(note);
        }
    }
}

#[cfg(target_os = "windows")]
pub struct ToastBackend;

#[cfg(target_os = "windows")]
impl Notifier for ToastBackend {
    fn show(&self, note: &Notification) {
        let script = format!(
            "[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] > $null; \
             $template = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent([Windows.UI.Notifications.ToastTemplateType]::ToastText02); \
             $texts = $template.GetElementsByTagName('text'); \
             $texts.Item(0).AppendChild($template.CreateTextNode('{title}')) > $null; \
             $texts.Item(1).AppendChild($template.CreateTextNode('{message}')) > $null; \
             [Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier('vimewatch').Show([Windows.UI.Notifications.ToastNotification]::new($template))",
            title = note.title.replace('\'', " "),
            message = note.message.replace('\'', " "),
        );
        let status = Command::new("powershell")
            .args(["-NoProfile", "-WindowStyle", "Hidden", "-Command", &script])
            .status();
        if let Err(err) = status {
            warn!("powershell unavailable ({err}), falling back to console");
            ConsoleBackend.show(note);
        }
    }
}

/// Test double that records everything it is asked to show.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    notes: std::rc::Rc<std::cell::RefCell<Vec<Notification>>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn notes(&self) -> Vec<Notification> {
        self.notes.borrow().clone()
    }

    pub fn titled(&self, title: &str) -> Vec<Notification> {
        self.notes
            .borrow()
            .iter()
            .filter(|note| note.title == title)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn show(&self, note: &Notification) {
        self.notes.borrow_mut().push(note.clone());
    }
}
