// src/ingest/client.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::counter;
use rand::seq::IndexedRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Default pause after every feed request.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_secs(2);

const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.80",
];

/// Raw feed download. Callers treat `Err` as "zero items from this source".
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Supplies the User-Agent header for each request.
pub trait UserAgentSource: Send + Sync {
    fn pick(&self) -> String;
}

/// Picks a random entry from a pool on every call.
#[derive(Debug, Clone)]
pub struct RandomUserAgents {
    pool: Vec<String>,
}

impl RandomUserAgents {
    /// An empty pool falls back to the built-in browser strings.
    pub fn new(pool: Vec<String>) -> Self {
        if pool.is_empty() {
            return Self::default();
        }
        Self { pool }
    }
}

impl Default for RandomUserAgents {
    fn default() -> Self {
        Self {
            pool: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UserAgentSource for RandomUserAgents {
    fn pick(&self) -> String {
        self.pool
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_USER_AGENTS[0].to_string())
    }
}

/// Always the same string; keeps requests reproducible in tests.
#[derive(Debug, Clone)]
pub struct FixedUserAgent(pub String);

impl UserAgentSource for FixedUserAgent {
    fn pick(&self) -> String {
        self.0.clone()
    }
}

pub struct HttpFeedClient {
    client: Client,
    user_agents: Arc<dyn UserAgentSource>,
    delay: Duration,
}

impl HttpFeedClient {
    pub fn new(user_agents: Arc<dyn UserAgentSource>) -> Self {
        Self {
            client: Client::new(),
            user_agents,
            delay: DEFAULT_FETCH_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let rsp = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agents.pick())
            .send()
            .await
            .context("feed request")?;

        let status = rsp.status();
        if !status.is_success() {
            return Err(anyhow!("feed status {status}"));
        }

        let body = rsp.bytes().await.context("feed body")?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        counter!("feed_fetch_total").increment(1);
        let out = self.get_bytes(url).await;
        match &out {
            Ok(body) => tracing::info!(url, bytes = body.len(), "fetched feed"),
            Err(e) => {
                tracing::warn!(url, error = %format!("{e:#}"), "feed fetch failed");
                counter!("feed_fetch_errors_total").increment(1);
            }
        }

        // Pace every attempt, failed ones included.
        tokio::time::sleep(self.delay).await;
        out.with_context(|| format!("fetching {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pick_comes_from_pool() {
        let pool = vec!["ua-a".to_string(), "ua-b".to_string()];
        let ua = RandomUserAgents::new(pool.clone());
        for _ in 0..20 {
            assert!(pool.contains(&ua.pick()));
        }
    }

    #[test]
    fn empty_pool_uses_builtin_agents() {
        let ua = RandomUserAgents::new(Vec::new());
        let picked = ua.pick();
        assert!(DEFAULT_USER_AGENTS.contains(&picked.as_str()));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error_and_still_paced() {
        let client = HttpFeedClient::new(Arc::new(FixedUserAgent("test-agent".into())))
            .with_delay(Duration::from_millis(50));
        let t0 = std::time::Instant::now();
        // Port 9 on localhost is "discard"; nothing listens there in CI.
        let res = client.fetch("http://127.0.0.1:9/feed.xml").await;
        assert!(res.is_err());
        assert!(t0.elapsed() >= Duration::from_millis(50));
    }
}
