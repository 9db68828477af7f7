//! Token-level differences between two list versions.

use std::collections::BTreeMap;

use crate::core::types::{TokenInfo, TokenList};

/// Tokens added, removed, or changed by an update, each sorted by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDiff {
    pub added: Vec<TokenInfo>,
    pub removed: Vec<TokenInfo>,
    /// Same `(chain_id, address)` but different metadata; holds the updated token.
    pub changed: Vec<TokenInfo>,
}

impl TokenDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare the tokens of `base` against those of `update`.
pub fn diff_token_lists(base: &TokenList, update: &TokenList) -> TokenDiff {
    let base_index = index_tokens(&base.tokens);
    let update_index = index_tokens(&update.tokens);

    let mut diff = TokenDiff::default();
    for (key, token) in &update_index {
        match base_index.get(key) {
            None => diff.added.push((*token).clone()),
            Some(old) if *old != *token => diff.changed.push((*token).clone()),
            Some(_) => {}
        }
    }
    for (key, token) in &base_index {
        if !update_index.contains_key(key) {
            diff.removed.push((*token).clone());
        }
    }
    diff
}

fn index_tokens(tokens: &[TokenInfo]) -> BTreeMap<(u64, String), &TokenInfo> {
    tokens.iter().map(|token| (token.key(), token)).collect()
}
