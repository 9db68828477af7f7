//! Pure state transitions for the token list registry.
//!
//! Every action is total: missing or mismatched state turns the action into a
//! no-op reported as [`Transition::Ignored`], never into an error.

use crate::core::actions::Action;
use crate::core::types::{ListEntry, ListsState, TokenList};
use crate::core::version::is_newer;

/// Outcome of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The registry changed.
    Applied,
    /// The registry is exactly as before.
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownUrl,
    AlreadyRegistered,
    /// Rejection arrived while no fetch was in flight.
    NotLoading,
    /// Response belongs to a request other than the in-flight one.
    RequestMismatch,
    /// Fulfilled list is not newer than `current` and nothing else changed.
    NotNewer,
    NoPendingUpdate,
}

impl IgnoreReason {
    pub fn as_str(self) -> &'static str {
        match self {
            IgnoreReason::UnknownUrl => "unknown url",
            IgnoreReason::AlreadyRegistered => "already registered",
            IgnoreReason::NotLoading => "not loading",
            IgnoreReason::RequestMismatch => "request id mismatch",
            IgnoreReason::NotNewer => "version not newer",
            IgnoreReason::NoPendingUpdate => "no pending update",
        }
    }
}

/// Compute the next registry without touching `state`.
pub fn reduce(state: &ListsState, action: &Action) -> ListsState {
    let mut next = state.clone();
    apply_action(&mut next, action);
    next
}

/// Apply `action` to `state` in place and report whether anything changed.
pub fn apply_action(state: &mut ListsState, action: &Action) -> Transition {
    match action {
        Action::FetchPending { request_id, url } => {
            let entry = state.by_url.entry(url.clone()).or_default();
            entry.loading_request_id = Some(request_id.clone());
            Transition::Applied
        }
        Action::FetchFulfilled {
            list,
            request_id,
            url,
        } => fulfill(state, list, request_id, url),
        Action::FetchRejected {
            error_message,
            request_id,
            url,
        } => {
            let Some(entry) = state.by_url.get_mut(url) else {
                return Transition::Ignored(IgnoreReason::UnknownUrl);
            };
            match entry.loading_request_id.as_deref() {
                None => Transition::Ignored(IgnoreReason::NotLoading),
                Some(loading) if loading != request_id.as_str() => {
                    Transition::Ignored(IgnoreReason::RequestMismatch)
                }
                Some(_) => {
                    entry.loading_request_id = None;
                    entry.error = Some(error_message.clone());
                    Transition::Applied
                }
            }
        }
        Action::AddList { url } => {
            if state.by_url.contains_key(url) {
                return Transition::Ignored(IgnoreReason::AlreadyRegistered);
            }
            state.by_url.insert(url.clone(), ListEntry::default());
            Transition::Applied
        }
        Action::AcceptListUpdate { url } => {
            let Some(entry) = state.by_url.get_mut(url) else {
                return Transition::Ignored(IgnoreReason::UnknownUrl);
            };
            match entry.pending_update.take() {
                Some(update) => {
                    entry.current = Some(update);
                    Transition::Applied
                }
                None => Transition::Ignored(IgnoreReason::NoPendingUpdate),
            }
        }
        Action::RemoveList { url } => match state.by_url.remove(url) {
            Some(_) => Transition::Applied,
            None => Transition::Ignored(IgnoreReason::UnknownUrl),
        },
    }
}

fn fulfill(state: &mut ListsState, list: &TokenList, request_id: &str, url: &str) -> Transition {
    let mut changed = !state.by_url.contains_key(url);
    let entry = state.by_url.entry(url.to_string()).or_default();

    match &entry.current {
        None => {
            entry.current = Some(list.clone());
            entry.pending_update = None;
            changed = true;
        }
        Some(current) if is_newer(current.version, list.version) => {
            entry.pending_update = Some(list.clone());
            changed = true;
        }
        Some(_) => {}
    }

    if entry.loading_request_id.as_deref() == Some(request_id) {
        entry.loading_request_id = None;
        changed = true;
    }
    if entry.error.take().is_some() {
        changed = true;
    }

    if changed {
        Transition::Applied
    } else {
        Transition::Ignored(IgnoreReason::NotNewer)
    }
}
