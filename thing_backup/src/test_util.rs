//! In-memory `Fetcher` for exercising the pipeline without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use thing_download::{DownloadTask, LocalFile};
use thingiverse_client::{Error, Fetcher, Result};

pub const BASE_URL: &str = "http://thingiverse.test";
pub const USER_ID: &str = "77";

#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    listing_pages: HashMap<u32, String>,
    listing_fallback: Option<String>,
    assets: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A user whose designs page resolves to `USER_ID`.
    pub fn with_user(self, username: &str) -> Self {
        let html = format!(
            r#"<html><head><link rel="alternate" href="{}/rss/user:{}"></head><body></body></html>"#,
            BASE_URL, USER_ID
        );
        let url = self.designs_url(username);
        self.with_page(&url, &html)
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_thing(self, id: &str, html: &str) -> Self {
        let url = self.thing_url(id);
        self.with_page(&url, html)
    }

    pub fn with_listing_page(mut self, page: u32, html: &str) -> Self {
        self.listing_pages.insert(page, html.to_string());
        self
    }

    /// Served for every listing page that was not set explicitly.
    pub fn with_listing_fallback(mut self, html: &str) -> Self {
        self.listing_fallback = Some(html.to_string());
        self
    }

    pub fn with_asset(mut self, url: &str, bytes: &[u8]) -> Self {
        self.assets.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn listing_requests(&self) -> usize {
        self.requests().iter().filter(|r| r.starts_with("listing:")).count()
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }

    fn asset(&self, url: &str) -> Result<Vec<u8>> {
        self.assets
            .get(url)
            .cloned()
            .ok_or(Error::Unavailable(url.to_string()))
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.record(format!("page:{}", url));
        self.pages.get(url).cloned().ok_or(Error::Unavailable(url.to_string()))
    }

    async fn fetch_listing_page(&self, user_id: &str, page: u32) -> String {
        self.record(format!("listing:{}:{}", user_id, page));
        if user_id != USER_ID {
            return String::new();
        }
        self.listing_pages
            .get(&page)
            .or(self.listing_fallback.as_ref())
            .cloned()
            .unwrap_or_default()
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.record(format!("bytes:{}", url));
        self.asset(url)
    }

    async fn download_file(&self, task: &DownloadTask) -> Result<LocalFile> {
        self.record(format!("download:{}", task.url));
        let bytes = self.asset(&task.url)?;
        Ok(thing_download::save_bytes(task, &bytes).await?)
    }
}

/// A listing page fragment with one card per `(id, name)`.
pub fn listing_html(things: &[(&str, &str)]) -> String {
    things
        .iter()
        .map(|(id, name)| {
            format!(
                r#"<div class="thing-card"><a class="thing-img-wrapper" href="/thing:{}"></a><span class="thing-name">{}</span></div>"#,
                id, name
            )
        })
        .collect()
}

/// A detail page carrying the given title, one file and two images (only one
/// of which is a large variant).
pub fn thing_html(title: &str, id: &str) -> String {
    format!(
        r#"<html><body>
        <div class="thing-header-data"><h1>{title}</h1>
            <h2><a href="/maker">maker</a><time datetime="2014-03-01T10:00:00+00:00"></time></h2>
        </div>
        <div class="thing-page-image"><img data-img="http://cdn.test/{id}_thumb_small.jpg"></div>
        <div class="thing-page-image"><img data-img="http://cdn.test/{id}_preview_large.jpg"></div>
        <div id="description">Desc {id}</div>
        <div id="instructions">Print {id}</div>
        <a class="thing-category" href="/categories/toys">Toys</a>
        <div class="tags"><a>a</a><a>b</a></div>
        <a rel="license">CC-BY</a>
        <div class="thing-file"><a href="/download:{id}"><span class="filename">part_{id}.stl</span></a></div>
        </body></html>"#
    )
}

/// A mock with everything `thing_html(title, id)` references.
pub fn with_full_thing(fetcher: MockFetcher, id: &str, title: &str) -> MockFetcher {
    fetcher
        .with_thing(id, &thing_html(title, id))
        .with_asset(&format!("{}/download:{}", BASE_URL, id), format!("stl {}", id).as_bytes())
        .with_asset(&format!("http://cdn.test/{}_preview_large.jpg", id), b"jpeg")
        .with_asset(&format!("http://cdn.test/{}_thumb_small.jpg", id), b"small")
}
