// src/store.rs
//! SQLite link store.
//!
//! One table, one row per link ever posted. The primary key on `link` is the
//! authority on "already seen": the in-memory set loaded at the start of a run
//! is only a shortcut, a unique violation on insert means the same thing.

use anyhow::{Context, Result};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::Row;
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ingest::types::Link;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Inserted,
    AlreadyPresent,
}

pub struct LinkStore {
    pool: SqlitePool,
    // Older stores declare `title TEXT NOT NULL`; missing titles are written as "" there.
    title_not_null: AtomicBool,
}

impl LinkStore {
    /// Open (creating if needed) the store file and make sure the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Full);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .with_context(|| format!("opening link store {}", path.display()))?;

        let store = Self {
            pool,
            title_not_null: AtomicBool::new(false),
        };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Ephemeral store for tests. A single connection, so every query sees the same database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("opening in-memory link store")?;

        let store = Self {
            pool,
            title_not_null: AtomicBool::new(false),
        };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Idempotent. Stores created by the minimal historical layout (no `title`
    /// column) get the column added; their rows keep a NULL title.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                link TEXT PRIMARY KEY,
                title TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("creating links table")?;

        let columns: Vec<(String, i64)> =
            sqlx::query(r#"SELECT name, "notnull" FROM pragma_table_info('links')"#)
                .fetch_all(&self.pool)
                .await
                .context("reading links columns")?
                .iter()
                .map(|r| -> std::result::Result<(String, i64), sqlx::Error> {
                    Ok((r.try_get("name")?, r.try_get("notnull")?))
                })
                .collect::<std::result::Result<_, _>>()
                .context("decoding links columns")?;

        match columns.iter().find(|(name, _)| name == "title") {
            Some((_, not_null)) => {
                self.title_not_null.store(*not_null != 0, Ordering::Relaxed);
            }
            None => {
                tracing::info!("migrating links table: adding title column");
                sqlx::query("ALTER TABLE links ADD COLUMN title TEXT")
                    .execute(&self.pool)
                    .await
                    .context("adding title column")?;
            }
        }
        Ok(())
    }

    pub async fn load_known_links(&self) -> Result<HashSet<String>> {
        let rows = sqlx::query("SELECT link FROM links")
            .fetch_all(&self.pool)
            .await
            .context("loading known links")?;

        rows.iter()
            .map(|r| r.try_get::<String, _>("link"))
            .collect::<std::result::Result<HashSet<_>, _>>()
            .context("decoding known links")
    }

    pub async fn record_if_new(&self, link: &Link) -> Result<RecordOutcome> {
        let title = match link.title.as_deref() {
            None if self.title_not_null.load(Ordering::Relaxed) => Some(""),
            t => t,
        };
        let res = sqlx::query("INSERT INTO links (link, title) VALUES (?, ?)")
            .bind(&link.link)
            .bind(title)
            .execute(&self.pool)
            .await;

        match res {
            Ok(_) => Ok(RecordOutcome::Inserted),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(RecordOutcome::AlreadyPresent)
            }
            Err(e) => Err(e).with_context(|| format!("recording {}", link.link)),
        }
    }

    pub async fn count(&self) -> Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(&self.pool)
            .await
            .context("counting links")?;
        Ok(n)
    }

    pub async fn title_of(&self, link: &str) -> Result<Option<String>> {
        let title: Option<Option<String>> =
            sqlx::query_scalar("SELECT title FROM links WHERE link = ?")
                .bind(link)
                .fetch_optional(&self.pool)
                .await
                .context("reading title")?;
        Ok(title.flatten())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
