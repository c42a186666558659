use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::Error;

/// What happened during one backup run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackupReport {
    pub discovered: usize,
    pub backed_up: usize,
    /// Already present on disk and not overwritten.
    pub skipped: usize,
    pub failures: Vec<ThingFailure>,
    pub asset_failures: Vec<AssetFailure>,
    pub collisions: Vec<FolderCollision>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThingFailure {
    pub thing_id: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetFailure {
    pub thing_id: String,
    pub url: String,
    pub error: String,
}

/// Two things of the same run whose titles map to the same folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderCollision {
    pub folder: PathBuf,
    pub first_id: String,
    pub second_id: String,
}

impl ThingFailure {
    pub fn new(thing_id: &str, error: &Error) -> Self {
        ThingFailure {
            thing_id: thing_id.to_string(),
            error: error.to_string(),
        }
    }
}

impl AssetFailure {
    pub fn new(thing_id: &str, url: &str, error: &Error) -> Self {
        AssetFailure {
            thing_id: thing_id.to_string(),
            url: url.to_string(),
            error: error.to_string(),
        }
    }
}

impl BackupReport {
    pub fn new(discovered: usize) -> Self {
        BackupReport {
            discovered,
            ..Default::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.asset_failures.is_empty()
    }
}

impl Display for BackupReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} things discovered, {} backed up, {} skipped, {} failed, {} assets missing, {} folder collisions",
            self.discovered,
            self.backed_up,
            self.skipped,
            self.failures.len(),
            self.asset_failures.len(),
            self.collisions.len()
        )
    }
}
