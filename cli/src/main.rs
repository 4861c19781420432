use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vimewatch_core::context::{default_log_directory, SettingsStore, WatchContext};
use vimewatch_core::notify::platform_backend;
use vimewatch_core::scheduler::{Scheduler, WatchError, TICK_SECS};

mod display;

#[derive(Parser)]
#[command(version, about = "Boss respawn and mine watcher for VimeWorld Prison")]
struct Cli {
    /// Game log directory (defaults to the launcher's location)
    #[arg(short, long)]
    log_dir: Option<PathBuf>,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), WatchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = match cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::open_default()?,
    };
    info!(settings = %store.path().display(), "loading settings");
    let ctx = WatchContext::load(store)?;
    let log_dir = cli.log_dir.unwrap_or_else(default_log_directory);

    let mut scheduler = Scheduler::start(
        ctx,
        &log_dir,
        platform_backend(),
        Local::now().naive_local(),
    )
    .await?;

    let mut interval = tokio::time::interval(Duration::from_secs(TICK_SECS));
    loop {
        interval.tick().await;
        let report = scheduler.tick(Local::now().naive_local()).await?;
        if let Some(schedule) = report.schedule {
            display::print_schedule(&schedule, scheduler.context().colored);
        }
    }
}
