// src/ingest/providers/youtube.rs
use async_trait::async_trait;

use super::atom_entries;
use crate::ingest::client::FeedClient;
use crate::ingest::types::{Category, Link, SourceProvider};

const FEED_BASE: &str = "https://www.youtube.com/feeds/videos.xml?channel_id=";
const WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
const VIDEO_ID_PREFIX: &str = "yt:video:";

pub fn feed_url(channel_id: &str) -> String {
    format!("{FEED_BASE}{channel_id}")
}

/// `yt:video:ABC123` -> `https://www.youtube.com/watch?v=ABC123`
pub fn canonical_video_link(entry_id: &str) -> String {
    let bare = entry_id.strip_prefix(VIDEO_ID_PREFIX).unwrap_or(entry_id);
    format!("{WATCH_BASE}{bare}")
}

/// Channel uploads feeds, one request per channel id.
pub struct YoutubeProvider {
    channels: Vec<String>,
}

impl YoutubeProvider {
    pub fn new(channels: Vec<String>) -> Self {
        Self { channels }
    }
}

#[async_trait]
impl SourceProvider for YoutubeProvider {
    fn name(&self) -> &str {
        "youtube"
    }

    fn category(&self) -> Category {
        Category::Youtube
    }

    async fn collect(&self, client: &dyn FeedClient) -> Vec<Link> {
        let mut out = Vec::new();
        for channel in &self.channels {
            let channel = channel.trim();
            if channel.is_empty() {
                tracing::warn!(provider = self.name(), "skipping blank channel id");
                continue;
            }

            let entries = atom_entries(client, self.name(), &feed_url(channel)).await;
            tracing::debug!(channel, entries = entries.len(), "youtube channel collected");
            out.extend(entries.into_iter().map(|e| {
                Link::new(canonical_video_link(&e.id), e.title, Category::Youtube)
            }));
        }
        out
    }
}
