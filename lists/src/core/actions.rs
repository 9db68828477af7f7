//! Action vocabulary consumed by the list reducer.

use std::fmt;

use crate::core::types::TokenList;

/// A single state transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchPending {
        request_id: String,
        url: String,
    },
    FetchFulfilled {
        list: TokenList,
        request_id: String,
        url: String,
    },
    FetchRejected {
        error_message: String,
        request_id: String,
        url: String,
    },
    AddList {
        url: String,
    },
    AcceptListUpdate {
        url: String,
    },
    RemoveList {
        url: String,
    },
}

impl Action {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::FetchPending { .. } => "fetch_token_list/pending",
            Action::FetchFulfilled { .. } => "fetch_token_list/fulfilled",
            Action::FetchRejected { .. } => "fetch_token_list/rejected",
            Action::AddList { .. } => "add_list",
            Action::AcceptListUpdate { .. } => "accept_list_update",
            Action::RemoveList { .. } => "remove_list",
        }
    }

    /// URL of the entry this action targets.
    pub fn url(&self) -> &str {
        match self {
            Action::FetchPending { url, .. }
            | Action::FetchFulfilled { url, .. }
            | Action::FetchRejected { url, .. }
            | Action::AddList { url }
            | Action::AcceptListUpdate { url }
            | Action::RemoveList { url } => url,
        }
    }
}

/// Creators for the three phases of a list fetch.
pub mod fetch_token_list {
    use super::{Action, TokenList, fmt};

    pub fn pending(request_id: impl Into<String>, url: impl Into<String>) -> Action {
        Action::FetchPending {
            request_id: request_id.into(),
            url: url.into(),
        }
    }

    pub fn fulfilled(
        list: TokenList,
        request_id: impl Into<String>,
        url: impl Into<String>,
    ) -> Action {
        Action::FetchFulfilled {
            list,
            request_id: request_id.into(),
            url: url.into(),
        }
    }

    /// Only the error's display message is kept.
    pub fn rejected(
        error: impl fmt::Display,
        request_id: impl Into<String>,
        url: impl Into<String>,
    ) -> Action {
        Action::FetchRejected {
            error_message: error.to_string(),
            request_id: request_id.into(),
            url: url.into(),
        }
    }
}

pub fn add_list(url: impl Into<String>) -> Action {
    Action::AddList { url: url.into() }
}

pub fn accept_list_update(url: impl Into<String>) -> Action {
    Action::AcceptListUpdate { url: url.into() }
}

pub fn remove_list(url: impl Into<String>) -> Action {
    Action::RemoveList { url: url.into() }
}
