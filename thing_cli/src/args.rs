use std::path::PathBuf;

use clap::Parser;

use thing_backup::BackupOptions;
use thingiverse_client::DEFAULT_BASE_URL;

/// Back up every thing a Thingiverse user has published.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Username whose designs are backed up
    pub username: String,

    /// Existing, writable folder receiving one subfolder per thing
    pub destination: PathBuf,

    /// Replace folders left by an earlier backup
    #[arg(long, env = "THING_BACKUP_OVERWRITE")]
    pub overwrite: bool,

    /// Site origin to crawl
    #[arg(long, env = "THINGIVERSE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Write the run report as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl Args {
    pub fn backup_options(&self) -> BackupOptions {
        BackupOptions {
            username: self.username.clone(),
            destination: self.destination.clone(),
            allow_override: self.overwrite,
        }
    }
}
