//! Registry configuration stored under `.token-lists/config.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::policy::AutoAccept;

/// Registry configuration (TOML).
///
/// Intended to be edited by humans. Missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListsConfig {
    /// Lists registered by `token-lists init`.
    pub default_list_urls: Vec<String>,

    /// Largest version bump accepted without `token-lists accept`.
    pub auto_accept: AutoAccept,

    /// Per-request timeout for HTTP sources, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            default_list_urls: Vec::new(),
            auto_accept: AutoAccept::Never,
            fetch_timeout_secs: 10,
        }
    }
}

impl ListsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            return Err(anyhow!("fetch_timeout_secs must be > 0"));
        }
        if let Some(url) = self.default_list_urls.iter().find(|url| url.trim().is_empty()) {
            return Err(anyhow!("default_list_urls contains an empty url: {:?}", url));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ListsConfig::default()`.
pub fn load_config(path: &Path) -> Result<ListsConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = ListsConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ListsConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ListsConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf, "toml.tmp")
}

/// Write `contents` to a sibling temp file, then rename over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &str, tmp_extension: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension(tmp_extension);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
