// tests/common/mod.rs
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use linkwatch::ingest::client::FeedClient;
use linkwatch::notify::{Destinations, Notifier};

pub const YOUTUBE_XML: &str = include_str!("../fixtures/youtube_channel.xml");
pub const MEDIUM_XML: &str = include_str!("../fixtures/medium_tag.xml");
pub const BLOG_RSS_XML: &str = include_str!("../fixtures/blog_rss.xml");
pub const BLOG_ATOM_XML: &str = include_str!("../fixtures/blog_atom.xml");

/// Serves canned bodies by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct MockFeedClient {
    bodies: HashMap<String, Vec<u8>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockFeedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedClient for MockFeedClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("feed status 404 Not Found"))
    }
}

/// Remembers every (thread, text) it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, thread_id: &str, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((thread_id.to_string(), text.to_string()));
        if self.fail {
            return Err(anyhow!("telegram sendMessage status 500 Internal Server Error"));
        }
        Ok(())
    }
}

pub fn destinations() -> Destinations {
    Destinations {
        youtube: "yt-thread".into(),
        medium: "medium-thread".into(),
        blog: "blog-thread".into(),
    }
}

/// Serve one canned HTTP response on a local port; returns the base url
/// (`http://127.0.0.1:<port>`) and the raw request text.
pub async fn serve_once(response: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = sock.read(&mut buf).await.unwrap();
        let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
        sock.write_all(response.as_bytes()).await.unwrap();
        sock.shutdown().await.ok();
    });

    (format!("http://{addr}"), rx)
}
