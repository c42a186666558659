use scraper::Html;

use thingiverse_client::{parse_thing_page, Fetcher, ThingDetail};

use crate::error::Result;

/// Fetch a thing's detail page and extract its metadata and assets.
///
/// An unreachable page is an error; the caller decides to skip the thing.
/// Missing fields on a reachable page are left empty.
pub async fn extract_thing(fetcher: &dyn Fetcher, id: &str) -> Result<ThingDetail> {
    let url = fetcher.thing_url(id);
    let html = fetcher.fetch_page(&url).await?;
    let detail = parse_thing_page(&Html::parse_document(&html), id, &url);
    tracing::debug!(
        "Extracted thing {} \"{}\" with {} files and {} images",
        id,
        detail.title,
        detail.files.len(),
        detail.images.len()
    );
    Ok(detail)
}
