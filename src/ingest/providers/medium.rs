// src/ingest/providers/medium.rs
use async_trait::async_trait;

use super::rss_items;
use crate::ingest::client::FeedClient;
use crate::ingest::types::{Category, Link, SourceProvider};

const FEED_BASE: &str = "https://medium.com/feed/tag/";

pub fn feed_url(tag: &str) -> String {
    format!("{FEED_BASE}{tag}")
}

/// Drops the query string so tracking variants of one article share a key.
pub fn canonical_article_link(link: &str) -> &str {
    link.split_once('?').map_or(link, |(base, _)| base)
}

/// Medium tag feeds (RSS).
pub struct MediumProvider {
    tags: Vec<String>,
}

impl MediumProvider {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl SourceProvider for MediumProvider {
    fn name(&self) -> &str {
        "medium"
    }

    fn category(&self) -> Category {
        Category::Medium
    }

    async fn collect(&self, client: &dyn FeedClient) -> Vec<Link> {
        let mut out = Vec::new();
        for tag in &self.tags {
            let tag = tag.trim();
            if tag.is_empty() {
                tracing::warn!(provider = self.name(), "skipping blank tag");
                continue;
            }

            let items = rss_items(client, self.name(), &feed_url(tag)).await;
            tracing::debug!(tag, items = items.len(), "medium tag collected");
            out.extend(items.into_iter().map(|it| {
                Link::new(canonical_article_link(&it.link), it.title, Category::Medium)
            }));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_is_dropped() {
        assert_eq!(
            canonical_article_link("https://medium.com/@x/post?source=rss"),
            "https://medium.com/@x/post"
        );
        assert_eq!(
            canonical_article_link("https://medium.com/@x/post?a=1?b=2"),
            "https://medium.com/@x/post"
        );
    }

    #[test]
    fn link_without_query_is_untouched() {
        assert_eq!(
            canonical_article_link("https://medium.com/@x/post"),
            "https://medium.com/@x/post"
        );
    }
}
