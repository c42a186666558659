mod error;
mod fetcher;
mod parsing;
mod result;
mod selectors;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::{header, Client, Response};

use thing_download::{DownloadTask, LocalFile};

pub use crate::error::{Error, Result};
pub use crate::fetcher::Fetcher;
pub use crate::parsing::*;
pub use crate::result::*;

pub const DEFAULT_BASE_URL: &str = "http://www.thingiverse.com";
const LISTING_PATH: &str = "/ajax/user/designs";
const USER_AGENT: &str = concat!("thing_backup/", env!("CARGO_PKG_VERSION"));
const LOG_DIR_VAR: &str = "CLIENT_LOG_DIR";

#[derive(Debug, Clone)]
pub struct ThingiverseClient {
    base_url: String,
    client: reqwest::Client,
    log_dir: Option<PathBuf>,
}

impl ThingiverseClient {
    /// Client for `base_url`. Fetched pages are dumped to `CLIENT_LOG_DIR`
    /// when that variable is set.
    pub fn new(base_url: &str) -> Result<Self> {
        // Reject garbage early instead of failing on every request
        url::Url::parse(base_url)?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(ThingiverseClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            log_dir: std::env::var_os(LOG_DIR_VAR).map(PathBuf::from),
        })
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    async fn post_listing(&self, user_id: &str, page: u32) -> Result<String> {
        let url = format!("{}{}", self.base_url, LISTING_PATH);
        let page = page.to_string();
        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&[("id", user_id), ("page", page.as_str())])
            .send()
            .await?;
        let html = check_status(response)?.text().await?;
        self.log(&format!("designs_{}_{}", user_id, page), &html).await;
        Ok(html)
    }

    /// Dump a fetched page. Failing to write the dump never fails the fetch.
    async fn log(&self, name: &str, content: &str) {
        let Some(dir) = &self.log_dir else {
            return;
        };
        if let Err(e) = write_log(dir, name, content).await {
            tracing::warn!("Cannot dump page {} to {}: {}", name, dir.display(), e);
        }
    }
}

#[async_trait]
impl Fetcher for ThingiverseClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let html = check_status(response)?.text().await?;
        self.log(url, &html).await;
        Ok(html)
    }

    async fn fetch_listing_page(&self, user_id: &str, page: u32) -> String {
        match self.post_listing(user_id, page).await {
            Ok(html) => html,
            Err(e) => {
                tracing::debug!("Listing page {} of user {} unavailable: {}", page, user_id, e);
                String::new()
            }
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        Ok(check_status(response)?.bytes().await?.to_vec())
    }

    async fn download_file(&self, task: &DownloadTask) -> Result<LocalFile> {
        Ok(thing_download::download_file(&self.client, task).await?)
    }
}

/// The site answered, but not with the page.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Unavailable(format!("{} returned {}", response.url(), status)))
    }
}

async fn write_log(dir: &Path, name: &str, content: &str) -> std::io::Result<()> {
    use tokio::{fs::File, io::AsyncWriteExt};

    let name = name
        .rsplit('/')
        .next()
        .unwrap_or(name)
        .replace(|c: char| !c.is_ascii_alphanumeric() && c != '_', "_");
    let name = if name.is_empty() { "home".to_string() } else { name };
    let time = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filepath = dir.join(format!("thingiverse_{}_{}.html", name, time));
    let mut file = File::create(filepath).await?;
    file.write_all(content.as_bytes()).await?;
    Ok(())
}
