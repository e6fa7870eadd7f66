// src/pipeline.rs
//! One sequential run: collect -> merge -> dedup -> persist -> notify.

use anyhow::Result;
use metrics::{counter, gauge};

use crate::ingest::client::FeedClient;
use crate::ingest::types::{Link, SourceProvider};
use crate::notify::{render_message, Destinations, Notifier};
use crate::store::{LinkStore, RecordOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Record new links but never call the notifier.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,    // unique links after merge
    pub already_known: usize, // links the store had before this run
    pub recorded: usize,
    pub notified: usize,
    pub notify_failed: usize,
    pub record_failed: usize,
}

/// Execute one run against an already opened store.
///
/// Only store errors while loading the known set are fatal. Source failures,
/// per-item insert failures and notifier failures are logged and counted.
/// A link is handed to the notifier only after its insert succeeded.
pub async fn run_once(
    providers: &[Box<dyn SourceProvider>],
    client: &dyn FeedClient,
    store: &LinkStore,
    notifier: &dyn Notifier,
    destinations: &Destinations,
    opts: RunOptions,
) -> Result<RunSummary> {
    crate::telemetry::ensure_described();

    let merged = crate::ingest::collect_all(providers, client).await;
    let known = store.load_known_links().await?;

    let mut summary = RunSummary {
        discovered: merged.len(),
        already_known: known.len(),
        ..Default::default()
    };
    tracing::info!(
        discovered = summary.discovered,
        known = summary.already_known,
        "collected feeds"
    );

    for (url, found) in merged {
        if known.contains(&url) {
            continue;
        }

        let link = Link {
            link: url,
            title: found.title,
            category: found.category,
        };
        match store.record_if_new(&link).await {
            Ok(RecordOutcome::Inserted) => {}
            Ok(RecordOutcome::AlreadyPresent) => {
                tracing::debug!(link = %link.link, "already recorded by another writer");
                continue;
            }
            Err(e) => {
                tracing::error!(link = %link.link, error = %format!("{e:#}"), "record failed");
                summary.record_failed += 1;
                continue;
            }
        }
        summary.recorded += 1;
        counter!("links_recorded_total").increment(1);

        tracing::info!(
            link = %link.link,
            category = %link.category,
            title = link.title.as_deref().unwrap_or_default(),
            dry_run = opts.dry_run,
            "new link"
        );
        if opts.dry_run {
            continue;
        }

        let text = render_message(link.title.as_deref(), &link.link);
        let thread = destinations.for_category(link.category);
        match notifier.send(thread, &text).await {
            Ok(()) => {
                summary.notified += 1;
                counter!("links_notified_total").increment(1);
            }
            Err(e) => {
                tracing::error!(link = %link.link, error = %format!("{e:#}"), "notify failed");
                summary.notify_failed += 1;
                counter!("notify_failures_total").increment(1);
            }
        }
    }

    gauge!("pipeline_last_run_ts").set(chrono::Utc::now().timestamp() as f64);
    tracing::info!(
        recorded = summary.recorded,
        notified = summary.notified,
        notify_failed = summary.notify_failed,
        record_failed = summary.record_failed,
        "run finished"
    );
    Ok(summary)
}
