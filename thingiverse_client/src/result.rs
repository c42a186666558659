use indexmap::IndexMap;
use serde::Serialize;

/// One thing as it appears in a user's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThingSummary {
    pub id: String,
    pub name: String,
}

/// A user's things, keyed by ID in discovery order.
///
/// Re-inserting an ID replaces its name but keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThingListing(IndexMap<String, String>);

impl ThingListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, summary: ThingSummary) {
        self.0.insert(summary.id, summary.name);
    }

    pub fn extend(&mut self, summaries: impl IntoIterator<Item = ThingSummary>) {
        for summary in summaries {
            self.insert(summary);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = ThingSummary> + '_ {
        self.0.iter().map(|(id, name)| ThingSummary {
            id: id.clone(),
            name: name.clone(),
        })
    }
}

/// The raw content of one listing page.
#[derive(Debug, Clone, Default)]
pub struct ListingPageResult {
    /// One entry per card link; `None` where the link names no thing.
    pub thing_ids: Vec<Option<String>>,
    pub thing_names: Vec<String>,
}

/// Everything extracted from a thing's detail page.
///
/// `user_link` and `category` are kept as they appear in the page (relative
/// paths); turning them into persisted values is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThingDetail {
    pub id: String,
    pub url: String,
    pub title: String,
    pub username: String,
    pub user_link: String,
    pub license: String,
    pub category: String,
    pub description: String,
    pub instructions: String,
    pub tags: Vec<String>,
    pub publish_date: String,
    pub images: Vec<String>,
    /// Download href to display filename, in document order.
    pub files: IndexMap<String, String>,
}
