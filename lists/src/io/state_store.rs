//! Registry load/save helpers for `.token-lists/state.json`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::core::invariants::validate_invariants;
use crate::core::types::ListsState;
use crate::io::config::write_atomic;

/// Load and validate the registry. A missing file is an empty registry.
pub fn load_state(path: &Path) -> Result<ListsState> {
    if !path.exists() {
        debug!(path = %path.display(), "state missing, starting empty");
        return Ok(ListsState::new());
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read state {}", path.display()))?;
    let state: ListsState = serde_json::from_str(&contents)
        .with_context(|| format!("parse state {}", path.display()))?;
    let errors = validate_invariants(&state);
    if !errors.is_empty() {
        return Err(anyhow!("state invariants failed: {}", errors.join("; ")));
    }
    debug!(path = %path.display(), lists = state.by_url.len(), "state loaded");
    Ok(state)
}

/// Atomically write the registry as pretty JSON with a trailing newline.
pub fn write_state(path: &Path, state: &ListsState) -> Result<()> {
    debug!(path = %path.display(), lists = state.by_url.len(), "writing state");
    let mut buf = serde_json::to_string_pretty(state).context("serialize state")?;
    buf.push('\n');
    write_atomic(path, &buf, "json.tmp")
}
