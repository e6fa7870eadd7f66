//! linkwatch — binary entrypoint.
//! Loads config, runs the feed pipeline once and exits.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use linkwatch::{config, RunOptions};

#[derive(Debug, Parser)]
#[command(name = "linkwatch", version, about = "Post new feed links to a Telegram chat")]
struct Cli {
    /// Just run: fetch and record new links, don't notify
    #[arg(short = 'j', long = "just")]
    just: bool,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkwatch=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = config::load_default()?;
    tracing::info!(
        youtube = cfg.youtube_channels.len(),
        medium = cfg.medium_tags.len(),
        blogs = cfg.blogs.len(),
        db = %cfg.database_path,
        dry_run = cli.just,
        "config loaded"
    );

    let summary = linkwatch::run_with_config(&cfg, RunOptions { dry_run: cli.just }).await?;
    tracing::info!(?summary, "done");
    Ok(())
}
