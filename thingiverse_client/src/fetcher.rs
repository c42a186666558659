use async_trait::async_trait;

use thing_download::{DownloadTask, LocalFile};
use thing_util::parsing::resolve_url;

use crate::error::Result;

/// Network access used by the backup pipeline.
///
/// Nothing here panics on a bad response: failures come back as errors, and
/// the listing endpoint folds them into an empty body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Site origin, without a trailing slash.
    fn base_url(&self) -> &str;

    /// Plain GET of an HTML page.
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// One page of a user's listing. An empty string means there is nothing
    /// more to read, whether the page was empty or the request failed.
    async fn fetch_listing_page(&self, user_id: &str, page: u32) -> String;

    /// Whole body of an asset in one piece.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// Stream an asset into the task's destination file.
    async fn download_file(&self, task: &DownloadTask) -> Result<LocalFile>;

    fn designs_url(&self, username: &str) -> String {
        format!("{}/{}/designs", self.base_url(), username)
    }

    fn thing_url(&self, id: &str) -> String {
        format!("{}/thing:{}", self.base_url(), id)
    }

    /// Absolute URL of an asset referenced from a page.
    fn asset_url(&self, href: &str) -> Result<String> {
        Ok(resolve_url(self.base_url(), href)?)
    }
}
