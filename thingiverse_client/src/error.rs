use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid HTML: {0}")]
    InvalidHTML(String),
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Network Error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Download Error: {0}")]
    DownloadError(#[from] thing_download::Error),
    #[error("Cannot parse URL: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Parsing error: {0}")]
    ParsingError(#[from] thing_util::ParsingError),
}
