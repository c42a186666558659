use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};

use thing_util::parsing::parse_prefixed_id;

use crate::error::{Error, Result};
use crate::result::*;

const USER_MARKER: &str = "user:";
const THING_MARKER: &str = "thing:";
const LARGE_IMAGE_MARKER: &str = "large";

fn text(e: ElementRef) -> String {
    e.text().collect::<String>().trim().to_string()
}

/// Singular fields always come from the last matching element. The pages
/// repeat some structures (navigation chrome, embedded cards) before the
/// authoritative one.
fn last<'a>(doc: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    doc.select(selector).last()
}

fn last_text(doc: &Html, selector: &Selector) -> String {
    last(doc, selector).map(text).unwrap_or_default()
}

fn last_html(doc: &Html, selector: &Selector) -> String {
    last(doc, selector).map(|e| e.inner_html()).unwrap_or_default()
}

fn last_attr(doc: &Html, selector: &Selector, attr: &str) -> String {
    last(doc, selector)
        .and_then(|e| e.value().attr(attr))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Find the internal user ID on a user's designs page, from the feed link
/// `.../user:<id>`. The last such link wins.
pub fn parse_user_id(doc: &Html) -> Result<String> {
    use super::selectors::designs::*;

    doc.select(&USER_FEED)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| parse_prefixed_id(href, USER_MARKER))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .last()
        .ok_or(Error::InvalidHTML("user id".to_string()))
}

/// Collect thing IDs and names of one listing page, each in document order.
/// Every card link takes one slot, so a link without a thing ID is `None`
/// and the names stay aligned. Pairing is left to the caller.
pub fn parse_listing_page(doc: &Html) -> ListingPageResult {
    use super::selectors::listing::*;

    let thing_ids = doc
        .select(&THING_LINK)
        .map(|e| {
            e.value()
                .attr("href")
                .and_then(|href| parse_prefixed_id(href, THING_MARKER))
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
        })
        .collect();
    let thing_names = doc.select(&THING_NAME).map(text).collect();

    ListingPageResult { thing_ids, thing_names }
}

pub fn parse_thing_page(doc: &Html, id: &str, url: &str) -> ThingDetail {
    use super::selectors::thing::*;

    fn parse_tags(doc: &Html) -> Vec<String> {
        doc.select(&TAGS).map(text).collect()
    }

    fn parse_images(doc: &Html) -> Vec<String> {
        doc.select(&IMAGES)
            .filter_map(|e| e.value().attr("data-img"))
            .filter(|src| !src.is_empty() && src.contains(LARGE_IMAGE_MARKER))
            .map(|src| src.to_string())
            .collect()
    }

    fn parse_files(doc: &Html) -> IndexMap<String, String> {
        let mut files = IndexMap::new();
        for e in doc.select(&FILES) {
            let Some(href) = e.value().attr("href") else {
                continue;
            };
            for filename in e.select(&FILENAME) {
                files.insert(href.to_string(), text(filename));
            }
        }
        files
    }

    ThingDetail {
        id: id.to_string(),
        url: url.to_string(),
        title: last_text(doc, &TITLE),
        username: last_text(doc, &CREATOR),
        user_link: last_attr(doc, &CREATOR, "href"),
        license: last_text(doc, &LICENSE),
        category: last_attr(doc, &CATEGORY, "href"),
        description: last_html(doc, &DESCRIPTION),
        instructions: last_html(doc, &INSTRUCTIONS),
        tags: parse_tags(doc),
        publish_date: last_attr(doc, &PUBLISH_DATE, "datetime"),
        images: parse_images(doc),
        files: parse_files(doc),
    }
}
