//! Test-only helpers for building lists, entries, and scripted sources.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::core::types::{ListEntry, ListsState, TokenInfo, TokenList, Version};
use crate::io::source::ListSource;

/// Empty list at version 1.1.1.
pub fn stub_token_list() -> TokenList {
    TokenList {
        name: String::new(),
        timestamp: String::new(),
        version: Version::new(1, 1, 1),
        tokens: Vec::new(),
        logo_uri: None,
        keywords: Vec::new(),
    }
}

/// `stub_token_list` with the patch version bumped.
pub fn updated_stub_list() -> TokenList {
    let mut list = stub_token_list();
    list.version.patch += 1;
    list
}

pub fn list_with_version(version: Version) -> TokenList {
    TokenList {
        version,
        ..stub_token_list()
    }
}

/// Deterministic token; `name` is derived from `symbol`.
pub fn token(chain_id: u64, address: &str, symbol: &str) -> TokenInfo {
    TokenInfo {
        chain_id,
        address: address.to_string(),
        name: format!("{} token", symbol),
        decimals: 18,
        symbol: symbol.to_string(),
        logo_uri: None,
    }
}

/// Entry with no error.
pub fn entry(
    current: Option<TokenList>,
    pending_update: Option<TokenList>,
    loading_request_id: Option<&str>,
) -> ListEntry {
    ListEntry {
        error: None,
        current,
        pending_update,
        loading_request_id: loading_request_id.map(str::to_string),
    }
}

pub fn state_with(url: &str, entry: ListEntry) -> ListsState {
    let mut state = ListsState::new();
    state.by_url.insert(url.to_string(), entry);
    state
}

/// Write `list` as pretty JSON and return the path.
pub fn write_list_file(dir: &Path, file_name: &str, list: &TokenList) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let payload = serde_json::to_string_pretty(list).context("serialize list")?;
    fs::write(&path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Scripted response for [`ScriptedSource`].
#[derive(Debug, Clone)]
pub enum ScriptedFetch {
    List(TokenList),
    Fail(String),
}

/// Source that replays queued responses and records requested URLs.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: RefCell<VecDeque<ScriptedFetch>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<ScriptedFetch>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ListSource for ScriptedSource {
    fn fetch(&self, url: &str) -> Result<TokenList> {
        self.requests.borrow_mut().push(url.to_string());
        match self.responses.borrow_mut().pop_front() {
            Some(ScriptedFetch::List(list)) => Ok(list),
            Some(ScriptedFetch::Fail(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted response for {}", url)),
        }
    }
}

/// Scratch project directory for CLI and store tests.
pub struct TestDir {
    dir: tempfile::TempDir,
}

impl TestDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create tempdir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
