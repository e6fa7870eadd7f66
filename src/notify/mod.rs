// src/notify/mod.rs
pub mod telegram;

pub use telegram::TelegramNotifier;

use anyhow::Result;
use serde::Deserialize;

use crate::ingest::types::Category;

/// Posts one rendered message to a chat thread.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, thread_id: &str, text: &str) -> Result<()>;
}

/// Thread id per category inside the configured chat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Destinations {
    pub youtube: String,
    pub medium: String,
    pub blog: String,
}

impl Destinations {
    pub fn for_category(&self, category: Category) -> &str {
        match category {
            Category::Youtube => &self.youtube,
            Category::Medium => &self.medium,
            Category::Blog => &self.blog,
        }
    }
}

/// Markdown link `[title](link)`, or the bare link when there is no title.
///
/// Square brackets in the title would end the link text early, so they are
/// swapped for parentheses. Other Markdown characters (`_`, `*`) are sent
/// as-is and Telegram may reject such messages with a 400.
pub fn render_message(title: Option<&str>, link: &str) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => {
            let t = t.replace('[', "(").replace(']', ")");
            format!("[{t}]({link})")
        }
        _ => link.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown_link() {
        assert_eq!(
            render_message(Some("Hello"), "https://a.test/1"),
            "[Hello](https://a.test/1)"
        );
    }

    #[test]
    fn bare_link_without_title() {
        assert_eq!(render_message(None, "https://a.test/1"), "https://a.test/1");
        assert_eq!(render_message(Some("  "), "https://a.test/1"), "https://a.test/1");
    }

    #[test]
    fn brackets_in_title_do_not_break_the_link() {
        assert_eq!(
            render_message(Some("[RFC] Async drop [part 2]"), "https://a.test/1"),
            "[(RFC) Async drop (part 2)](https://a.test/1)"
        );
    }

    #[test]
    fn routes_by_category() {
        let d = Destinations {
            youtube: "10".into(),
            medium: "20".into(),
            blog: "30".into(),
        };
        assert_eq!(d.for_category(Category::Youtube), "10");
        assert_eq!(d.for_category(Category::Medium), "20");
        assert_eq!(d.for_category(Category::Blog), "30");
    }
}
