use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Destination folder not exists or not writable: {0}")]
    InvalidDestination(PathBuf),
    #[error("Cannot fetch shapes: {0}")]
    Discovery(#[source] thingiverse_client::Error),
    #[error("Thing {0} has no usable title")]
    Untitled(String),
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Client error: {0}")]
    ClientError(#[from] thingiverse_client::Error),
    #[error("Download error: {0}")]
    DownloadError(#[from] thing_download::Error),
    #[error("Parsing error: {0}")]
    ParsingError(#[from] thing_util::ParsingError),
}
