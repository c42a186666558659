mod error;
mod harvest;

pub use error::{Error, Result};
pub use harvest::*;

use std::path::PathBuf;

/// A task to download one asset from a URL to a file.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub url: String,
    pub dir: PathBuf,
    pub filename: PathBuf,
}

impl DownloadTask {
    pub fn new(url: impl Into<String>, dir: impl Into<PathBuf>, filename: impl Into<PathBuf>) -> Self {
        DownloadTask {
            url: url.into(),
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    pub fn dest_path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// An asset that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub size: u64,
}
