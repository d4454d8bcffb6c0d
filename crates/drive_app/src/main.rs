//! NAS Drive - mock NAS drive file browser
//!
//! Main entry point for the interactive shell.

mod shell;

use anyhow::Result;
use clap::Parser;
use drive_core::AppConfig;
use drive_persist::{PersistentDrive, SnapshotFile};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nas_drive", version, about = "Browse a mock NAS drive from an interactive shell")]
struct Cli {
    /// Use an alternate snapshot file
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Discard the stored drive and start over from the demo dataset
    #[arg(long)]
    reset: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    drive_log::init()?;
    if let Err(e) = drive_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("NAS Drive starting...");

    let config = AppConfig::load().unwrap_or_default();
    let snapshot_path = cli.snapshot.unwrap_or_else(SnapshotFile::default_path);

    let drive = if cli.reset {
        PersistentDrive::reset(&config, &snapshot_path)?
    } else {
        match PersistentDrive::open_at(&config, &snapshot_path) {
            Ok(drive) => drive,
            Err(e) => {
                tracing::warn!("snapshot unreadable ({}), starting from the demo dataset", e);
                PersistentDrive::reset(&config, &snapshot_path)?
            }
        }
    };

    shell::run(drive, &config)
}
