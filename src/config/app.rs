// src/config/app.rs
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::ingest::providers::BlogFeed;
use crate::notify::Destinations;

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";

fn default_database_path() -> String {
    "links.db".to_string()
}
fn default_fetch_delay_ms() -> u64 {
    2_000
}
fn default_notify_delay_ms() -> u64 {
    3_000
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pacing {
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    #[serde(default = "default_notify_delay_ms")]
    pub notify_delay_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            fetch_delay_ms: default_fetch_delay_ms(),
            notify_delay_ms: default_notify_delay_ms(),
        }
    }
}

impl Pacing {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn notify_delay(&self) -> Duration {
        Duration::from_millis(self.notify_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// "ENV" means: read from TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    pub chat_id: String,
    /// Thread id per category.
    pub threads: Destinations,
    #[serde(default)]
    pub medium_tags: Vec<String>,
    #[serde(default)]
    pub youtube_channels: Vec<String>,
    #[serde(default)]
    pub blogs: Vec<BlogFeed>,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub pacing: Pacing,
    /// Replaces the built-in User-Agent pool when non-empty.
    #[serde(default)]
    pub user_agents: Vec<String>,
    #[serde(default)]
    pub telegram_api_base: Option<String>,
}

impl AppConfig {
    /// Resolve the "ENV" token, clean list entries and reject blank required fields.
    pub fn finalize(mut self) -> anyhow::Result<Self> {
        if self.bot_token.trim().eq_ignore_ascii_case("env") {
            self.bot_token = env::var(ENV_BOT_TOKEN)
                .map_err(|_| anyhow::anyhow!("Missing {ENV_BOT_TOKEN} env var"))?;
        }

        let required = [
            ("bot_token", &self.bot_token),
            ("chat_id", &self.chat_id),
            ("threads.youtube", &self.threads.youtube),
            ("threads.medium", &self.threads.medium),
            ("threads.blog", &self.threads.blog),
            ("database_path", &self.database_path),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                anyhow::bail!("config field `{name}` must not be empty");
            }
        }

        self.medium_tags = clean_list(self.medium_tags);
        self.youtube_channels = clean_list(self.youtube_channels);
        self.user_agents = clean_list(self.user_agents);
        self.blogs = clean_blogs(self.blogs);
        Ok(self)
    }
}

/// Trim, drop blanks, drop duplicates; keeps the configured order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}

fn clean_blogs(items: Vec<BlogFeed>) -> Vec<BlogFeed> {
    let mut out: Vec<BlogFeed> = Vec::with_capacity(items.len());
    for b in items {
        let feed = BlogFeed::new(b.url.trim(), b.kind.trim());
        if !feed.url.is_empty() && !out.iter().any(|o| o.url == feed.url) {
            out.push(feed);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_list_trims_and_dedups_in_order() {
        let v = clean_list(vec![
            " rust ".into(),
            "".into(),
            "go".into(),
            "rust".into(),
        ]);
        assert_eq!(v, vec!["rust".to_string(), "go".to_string()]);
    }

    #[test]
    fn blogs_without_url_are_dropped() {
        let v = clean_blogs(vec![
            BlogFeed::new(" https://b.test/feed ", "rss"),
            BlogFeed::new("  ", "rss"),
            BlogFeed::new("https://b.test/feed", "atom"),
        ]);
        assert_eq!(v, vec![BlogFeed::new("https://b.test/feed", "rss")]);
    }
}
