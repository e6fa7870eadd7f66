// src/ingest/providers/mod.rs
pub mod blog;
pub mod medium;
pub mod youtube;

pub use blog::{BlogFeed, BlogProvider};
pub use medium::MediumProvider;
pub use youtube::YoutubeProvider;

use metrics::counter;

use crate::ingest::client::FeedClient;
use crate::ingest::decode::{decode_atom, decode_rss, AtomEntry, RssItem};

/// Fetch + decode one Atom source. Any failure yields no entries.
pub(crate) async fn atom_entries(
    client: &dyn FeedClient,
    provider: &str,
    url: &str,
) -> Vec<AtomEntry> {
    let Ok(body) = client.fetch(url).await else {
        return Vec::new();
    };
    match decode_atom(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(provider, url, error = %format!("{e:#}"), "atom decode failed");
            counter!("feed_decode_errors_total").increment(1);
            Vec::new()
        }
    }
}

/// Fetch + decode one RSS source. Any failure yields no items.
pub(crate) async fn rss_items(client: &dyn FeedClient, provider: &str, url: &str) -> Vec<RssItem> {
    let Ok(body) = client.fetch(url).await else {
        return Vec::new();
    };
    match decode_rss(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(provider, url, error = %format!("{e:#}"), "rss decode failed");
            counter!("feed_decode_errors_total").increment(1);
            Vec::new()
        }
    }
}
