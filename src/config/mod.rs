// src/config/mod.rs
pub mod app;

pub use app::{AppConfig, Pacing};

use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "LINKWATCH_CONFIG";

const FALLBACK_PATHS: &[&str] = &["config/linkwatch.toml", "config.toml"];

/// Load config from an explicit path. TOML unless the extension is `.json`.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse(&content, &ext)
        .with_context(|| format!("parsing config {}", path.display()))?
        .finalize()
}

/// Load config using env var + fallbacks:
/// 1) $LINKWATCH_CONFIG (must exist)
/// 2) config/linkwatch.toml
/// 3) config.toml
pub fn load_default() -> Result<AppConfig> {
    load_from(&resolve_path()?)
}

pub fn resolve_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if !pb.exists() {
            bail!("{ENV_CONFIG_PATH} points to non-existent path {}", pb.display());
        }
        return Ok(pb);
    }
    FALLBACK_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .ok_or_else(|| anyhow!("no config found (set {ENV_CONFIG_PATH} or create config/linkwatch.toml)"))
}

fn parse(s: &str, ext: &str) -> Result<AppConfig> {
    if ext == "json" {
        return serde_json::from_str(s).context("invalid json config");
    }
    toml::from_str(s).context("invalid toml config")
}
