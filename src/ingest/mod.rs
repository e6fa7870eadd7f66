// src/ingest/mod.rs
pub mod client;
pub mod decode;
pub mod providers;
pub mod types;

use indexmap::IndexMap;

use crate::ingest::client::FeedClient;
use crate::ingest::types::{Category, Link, SourceProvider};

/// Value side of the merged result set; the key is the canonical link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
    pub title: Option<String>,
    pub category: Category,
}

/// Merge links into one map keyed solely by link.
///
/// On collision the later link wins (title and category both replaced, no
/// field merge). This tie-break across categories is arbitrary. Keys keep the
/// position they were first seen at, so notification order is stable.
pub fn merge_links<I>(links: I) -> IndexMap<String, Discovered>
where
    I: IntoIterator<Item = Link>,
{
    let mut merged = IndexMap::new();
    for l in links {
        merged.insert(
            l.link,
            Discovered {
                title: l.title,
                category: l.category,
            },
        );
    }
    merged
}

/// Run every provider in order against one client and merge their output.
pub async fn collect_all(
    providers: &[Box<dyn SourceProvider>],
    client: &dyn FeedClient,
) -> IndexMap<String, Discovered> {
    let mut all = Vec::new();
    for p in providers {
        let links = p.collect(client).await;
        tracing::info!(
            provider = p.name(),
            category = %p.category(),
            links = links.len(),
            "provider done"
        );
        all.extend(links);
    }
    merge_links(all)
}
