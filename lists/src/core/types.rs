//! Shared deterministic types for the token list registry.
//!
//! These types define the persisted registry shape. They carry no I/O and
//! serialize to stable JSON (ordered map keys, camelCase fields).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic version of a token list.
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A single token described by a list. Identity is `(chain_id, address)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub chain_id: u64,
    pub address: String,
    pub name: String,
    pub decimals: u8,
    pub symbol: String,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

impl TokenInfo {
    /// Identity key; addresses compare case-insensitively.
    pub fn key(&self) -> (u64, String) {
        (self.chain_id, self.address.to_ascii_lowercase())
    }
}

/// Versioned payload published at a list URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenList {
    pub name: String,
    pub timestamp: String,
    pub version: Version,
    pub tokens: Vec<TokenInfo>,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Per-URL fetch status plus the accepted and pending list content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    /// Message of the last fetch failure.
    pub error: Option<String>,
    /// Accepted list content.
    pub current: Option<TokenList>,
    /// Strictly newer version waiting for acceptance.
    pub pending_update: Option<TokenList>,
    /// Request id of the in-flight fetch.
    pub loading_request_id: Option<String>,
}

impl ListEntry {
    pub fn is_loading(&self) -> bool {
        self.loading_request_id.is_some()
    }
}

/// The whole registry, keyed by list URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsState {
    pub by_url: BTreeMap<String, ListEntry>,
}

impl ListsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&ListEntry> {
        self.by_url.get(url)
    }

    /// URLs in deterministic (lexicographic) order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.by_url.keys().map(String::as_str)
    }

    pub fn has_pending_updates(&self) -> bool {
        self.by_url.values().any(|entry| entry.pending_update.is_some())
    }
}
