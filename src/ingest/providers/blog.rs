// src/ingest/providers/blog.rs
use async_trait::async_trait;
use serde::Deserialize;

use super::{atom_entries, rss_items};
use crate::ingest::client::FeedClient;
use crate::ingest::decode::FeedKind;
use crate::ingest::types::{Category, Link, SourceProvider};

/// A configured blog feed. `kind = "rss"` selects the RSS decoder, anything else Atom.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlogFeed {
    pub url: String,
    #[serde(default)]
    pub kind: String,
}

impl BlogFeed {
    pub fn new(url: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: kind.into(),
        }
    }

    pub fn feed_kind(&self) -> FeedKind {
        FeedKind::from_kind(&self.kind)
    }
}

/// Arbitrary blog feeds. Keys are taken verbatim, no canonicalization.
pub struct BlogProvider {
    blogs: Vec<BlogFeed>,
}

impl BlogProvider {
    pub fn new(blogs: Vec<BlogFeed>) -> Self {
        Self { blogs }
    }
}

#[async_trait]
impl SourceProvider for BlogProvider {
    fn name(&self) -> &str {
        "blog"
    }

    fn category(&self) -> Category {
        Category::Blog
    }

    async fn collect(&self, client: &dyn FeedClient) -> Vec<Link> {
        let mut out = Vec::new();
        for blog in &self.blogs {
            let url = blog.url.trim();
            if url.is_empty() {
                tracing::warn!(provider = self.name(), "skipping blog without url");
                continue;
            }

            let before = out.len();
            match blog.feed_kind() {
                FeedKind::Rss => {
                    let items = rss_items(client, self.name(), url).await;
                    out.extend(
                        items
                            .into_iter()
                            .map(|it| Link::new(it.link, it.title, Category::Blog)),
                    );
                }
                FeedKind::Atom => {
                    let entries = atom_entries(client, self.name(), url).await;
                    out.extend(
                        entries
                            .into_iter()
                            .map(|e| Link::new(e.id, e.title, Category::Blog)),
                    );
                }
            }
            tracing::debug!(url, items = out.len() - before, "blog collected");
        }
        out
    }
}
