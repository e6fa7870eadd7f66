// src/notify/telegram.rs
use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Request};
use std::time::Duration;

use super::Notifier;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default pause after every sendMessage call.
pub const DEFAULT_NOTIFY_DELAY: Duration = Duration::from_secs(3);

/// Telegram bot `sendMessage` over GET. No retries; the caller logs failures.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    api_base: String,
    client: Client,
    delay: Duration,
}

impl TelegramNotifier {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: Client::new(),
            delay: DEFAULT_NOTIFY_DELAY,
        }
    }

    /// Point at a self-hosted bot API server (or a local test server).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Build the GET request; query values are percent-encoded by reqwest.
    pub fn build_request(&self, thread_id: &str, text: &str) -> Result<Request> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        self.client
            .get(url)
            .query(&[
                ("parse_mode", "markdown"),
                ("chat_id", self.chat_id.as_str()),
                ("message_thread_id", thread_id),
                ("text", text),
            ])
            .build()
            .context("building telegram request")
    }

    async fn send_once(&self, thread_id: &str, text: &str) -> Result<()> {
        let req = self.build_request(thread_id, text)?;
        let rsp = self
            .client
            .execute(req)
            .await
            // reqwest errors carry the url, which embeds the bot token
            .map_err(|e| anyhow!("telegram request failed: {}", e.without_url()))?;

        let status = rsp.status();
        if !status.is_success() {
            return Err(anyhow!("telegram sendMessage status {status}"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, thread_id: &str, text: &str) -> Result<()> {
        let out = self.send_once(thread_id, text).await;
        tokio::time::sleep(self.delay).await;
        out
    }
}
