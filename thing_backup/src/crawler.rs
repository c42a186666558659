use scraper::Html;

use thingiverse_client::{
    parse_listing_page, parse_user_id, Fetcher, ListingPageResult, ThingListing, ThingSummary,
};

use crate::error::{Error, Result};

/// Hard cap on the number of listing pages requested for one user.
pub const MAX_LISTING_PAGES: u32 = 100;

/// Discover every thing published by `username`, in listing order.
///
/// Fails only when the user's designs page cannot be fetched or does not
/// reveal a user ID. A user without things yields an empty listing.
pub async fn crawl_listing(fetcher: &dyn Fetcher, username: &str) -> Result<ThingListing> {
    // 1. Resolve the internal user ID
    let html = fetcher
        .fetch_page(&fetcher.designs_url(username))
        .await
        .map_err(Error::Discovery)?;
    let user_id = parse_user_id(&Html::parse_document(&html)).map_err(Error::Discovery)?;
    tracing::debug!("Resolved user {} to ID {}", username, user_id);

    // 2. Walk the listing until an empty page or the cap
    let mut listing = ThingListing::new();
    for page in 1..=MAX_LISTING_PAGES {
        let content = fetcher.fetch_listing_page(&user_id, page).await;
        if content.trim().is_empty() {
            tracing::debug!("Listing of user {} ends before page {}", user_id, page);
            break;
        }

        let result = parse_listing_page(&Html::parse_fragment(&content));
        let things = pair_listing_page(page, result);
        tracing::debug!("Found {} things on listing page {}", things.len(), page);
        listing.extend(things);
    }

    tracing::info!("Discovered {} things of user {}", listing.len(), username);
    Ok(listing)
}

/// Match thing IDs with names by position.
///
/// Both lists come from independent queries over the same cards. When their
/// lengths differ a warning is logged; IDs past the end of the names get an
/// empty name and surplus names are dropped. Links without a thing ID are
/// dropped after pairing, together with their name.
pub fn pair_listing_page(page: u32, result: ListingPageResult) -> Vec<ThingSummary> {
    let ListingPageResult { thing_ids, thing_names } = result;
    if thing_ids.len() != thing_names.len() {
        tracing::warn!(
            "Listing page {} has {} thing links but {} names, names may be misattributed",
            page,
            thing_ids.len(),
            thing_names.len()
        );
    }

    let mut names = thing_names.into_iter();
    thing_ids
        .into_iter()
        .filter_map(|id| {
            let name = names.next().unwrap_or_default();
            Some(ThingSummary { id: id?, name })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::*;

    #[tokio::test]
    async fn test_crawl_user_without_things() {
        let fetcher = MockFetcher::new().with_user("maker");
        let listing = crawl_listing(&fetcher, "maker").await.unwrap();

        assert!(listing.is_empty());
        assert_eq!(fetcher.listing_requests(), 1);
    }

    #[tokio::test]
    async fn test_crawl_stops_at_first_empty_page() {
        let fetcher = MockFetcher::new()
            .with_user("maker")
            .with_listing_page(1, &listing_html(&[("1", "One"), ("2", "Two")]))
            .with_listing_page(2, &listing_html(&[("3", "Three")]))
            .with_listing_page(3, &listing_html(&[("4", "Four")]))
            .with_listing_page(5, &listing_html(&[("5", "Unreachable")]));
        let listing = crawl_listing(&fetcher, "maker").await.unwrap();

        let ids = listing.iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(listing.get("3"), Some("Three"));
        assert_eq!(fetcher.listing_requests(), 4);
    }

    #[tokio::test]
    async fn test_crawl_stops_at_page_cap() {
        let fetcher = MockFetcher::new()
            .with_user("maker")
            .with_listing_fallback(&listing_html(&[("1", "Forever")]));
        let listing = crawl_listing(&fetcher, "maker").await.unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(fetcher.listing_requests(), MAX_LISTING_PAGES as usize);
        assert!(fetcher.requests().contains(&format!("listing:{}:{}", USER_ID, MAX_LISTING_PAGES)));
    }

    #[tokio::test]
    async fn test_crawl_duplicate_keeps_position_and_latest_name() {
        let fetcher = MockFetcher::new()
            .with_user("maker")
            .with_listing_page(1, &listing_html(&[("1", "Old"), ("2", "Two")]))
            .with_listing_page(2, &listing_html(&[("1", "New")]));
        let listing = crawl_listing(&fetcher, "maker").await.unwrap();

        let things = listing.iter().collect::<Vec<_>>();
        assert_eq!(
            things,
            vec![
                ThingSummary { id: "1".to_string(), name: "New".to_string() },
                ThingSummary { id: "2".to_string(), name: "Two".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_crawl_unreachable_user() {
        let fetcher = MockFetcher::new();
        let result = crawl_listing(&fetcher, "nobody").await;

        assert!(matches!(result, Err(Error::Discovery(_))));
        assert_eq!(fetcher.listing_requests(), 0);
    }

    #[tokio::test]
    async fn test_crawl_page_without_user_id() {
        let fetcher = MockFetcher::new().with_page(
            &format!("{}/maker/designs", BASE_URL),
            "<html><body>maintenance</body></html>",
        );
        let result = crawl_listing(&fetcher, "maker").await;

        assert!(matches!(result, Err(Error::Discovery(_))));
    }

    #[test]
    fn test_pair_listing_page_mismatch() {
        let more_ids = ListingPageResult {
            thing_ids: vec![Some("1".to_string()), Some("2".to_string()), Some("3".to_string())],
            thing_names: vec!["One".to_string(), "Two".to_string()],
        };
        let things = pair_listing_page(1, more_ids);
        assert_eq!(things.len(), 3);
        assert_eq!(things[1].name, "Two");
        assert_eq!(things[2].name, "");

        let more_names = ListingPageResult {
            thing_ids: vec![Some("1".to_string())],
            thing_names: vec!["One".to_string(), "Two".to_string()],
        };
        let things = pair_listing_page(1, more_names);
        assert_eq!(things, vec![ThingSummary { id: "1".to_string(), name: "One".to_string() }]);
    }

    #[test]
    fn test_pair_listing_page_skips_link_without_id() {
        let result = ListingPageResult {
            thing_ids: vec![Some("1".to_string()), None, Some("3".to_string())],
            thing_names: vec!["One".to_string(), "A Make".to_string(), "Three".to_string()],
        };
        let things = pair_listing_page(1, result);

        assert_eq!(
            things,
            vec![
                ThingSummary { id: "1".to_string(), name: "One".to_string() },
                ThingSummary { id: "3".to_string(), name: "Three".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_crawl_listing_with_foreign_card_keeps_names_aligned() {
        let page = r#"
            <a class="thing-img-wrapper" href="/thing:1"></a><span class="thing-name">One</span>
            <a class="thing-img-wrapper" href="/make:9"></a><span class="thing-name">A Make</span>
            <a class="thing-img-wrapper" href="/thing:3"></a><span class="thing-name">Three</span>
        "#;
        let fetcher = MockFetcher::new().with_user("maker").with_listing_page(1, page);
        let listing = crawl_listing(&fetcher, "maker").await.unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.get("1"), Some("One"));
        assert_eq!(listing.get("3"), Some("Three"));
    }
}
