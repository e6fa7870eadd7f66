// src/ingest/types.rs
use async_trait::async_trait;
use std::fmt;

use crate::ingest::client::FeedClient;

/// Provenance of a link; picks the chat thread it is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Youtube,
    Medium,
    Blog,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Youtube => "youtube",
            Category::Medium => "medium",
            Category::Blog => "blog",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub link: String,          // canonical url, dedup key
    pub title: Option<String>, // None when the feed had no usable title
    pub category: Category,
}

impl Link {
    pub fn new(link: impl Into<String>, title: Option<String>, category: Category) -> Self {
        Self {
            link: link.into(),
            title: clean_title(title),
            category,
        }
    }
}

fn clean_title(title: Option<String>) -> Option<String> {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// One configured family of feeds (all YouTube channels, all Medium tags, ...).
///
/// `collect` never fails: a source that cannot be fetched or decoded is logged
/// and contributes nothing, the remaining sources are still processed.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    fn name(&self) -> &str;
    fn category(&self) -> Category;
    async fn collect(&self, client: &dyn FeedClient) -> Vec<Link>;
}
