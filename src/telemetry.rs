// src/telemetry.rs
use metrics::{describe_counter, describe_gauge};
use once_cell::sync::OnceCell;

/// One-time registration so the series carry descriptions once a recorder is installed.
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_fetch_total", "Feed requests attempted.");
        describe_counter!(
            "feed_fetch_errors_total",
            "Feed requests that failed (transport, status or body)."
        );
        describe_counter!(
            "feed_decode_errors_total",
            "Fetched feeds that could not be decoded."
        );
        describe_counter!("links_recorded_total", "New links written to the store.");
        describe_counter!("links_notified_total", "Links posted to the chat.");
        describe_counter!(
            "notify_failures_total",
            "Chat notifications that failed; the link stays recorded."
        );
        describe_gauge!(
            "pipeline_last_run_ts",
            "Unix ts when the pipeline last completed."
        );
    });
}
