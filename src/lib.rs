// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod ingest;
pub mod telemetry;
pub mod notify;
pub mod pipeline;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::AppConfig;
pub use crate::ingest::types::{Category, Link, SourceProvider};
pub use crate::pipeline::{run_once, RunOptions, RunSummary};
pub use crate::store::{LinkStore, RecordOutcome};

use std::sync::Arc;

use crate::ingest::client::{HttpFeedClient, RandomUserAgents};
use crate::ingest::providers::{BlogProvider, MediumProvider, YoutubeProvider};
use crate::notify::TelegramNotifier;

/// Providers in merge order: YouTube, then Medium, then blogs (later wins on collisions).
pub fn providers_from_config(cfg: &AppConfig) -> Vec<Box<dyn SourceProvider>> {
    vec![
        Box::new(YoutubeProvider::new(cfg.youtube_channels.clone())),
        Box::new(MediumProvider::new(cfg.medium_tags.clone())),
        Box::new(BlogProvider::new(cfg.blogs.clone())),
    ]
}

/// Full production run: open the store first (fatal on failure), then fetch,
/// record and notify with the real HTTP client and Telegram notifier.
pub async fn run_with_config(cfg: &AppConfig, opts: RunOptions) -> anyhow::Result<RunSummary> {
    let store = LinkStore::open(&cfg.database_path).await?;

    let user_agents = Arc::new(RandomUserAgents::new(cfg.user_agents.clone()));
    let client = HttpFeedClient::new(user_agents).with_delay(cfg.pacing.fetch_delay());

    let mut notifier = TelegramNotifier::new(cfg.bot_token.clone(), cfg.chat_id.clone())
        .with_delay(cfg.pacing.notify_delay());
    if let Some(base) = &cfg.telegram_api_base {
        notifier = notifier.with_api_base(base.clone());
    }

    let providers = providers_from_config(cfg);
    let summary = run_once(
        &providers,
        &client,
        &store,
        &notifier,
        &cfg.threads,
        opts,
    )
    .await;

    store.close().await;
    summary
}
