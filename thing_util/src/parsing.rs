use thiserror::Error;

use url::Url;

#[derive(Debug, Clone, Error)]
pub enum ParsingError {
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

type Result<T> = std::result::Result<T, ParsingError>;

/// Parse the filename from a URL, i.e. its last path segment.
pub fn parse_filename(url: &str) -> Result<String> {
    let url = Url::parse(url)?;
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or(ParsingError::InvalidUrl(url.to_string()))
}

/// Resolve a possibly relative `href` against the site origin.
pub fn resolve_url(base: &str, href: &str) -> Result<String> {
    let base = Url::parse(base)?;
    Ok(base.join(href)?.to_string())
}

/// Take whatever follows `marker` in `s`, e.g. the `1234` of `/thing:1234`.
pub fn parse_prefixed_id<'a>(s: &'a str, marker: &str) -> Option<&'a str> {
    let start = s.find(marker)? + marker.len();
    Some(&s[start..])
}
