//! Orchestration of the pending -> fulfilled|rejected fetch lifecycle.

use tracing::{info, warn};

use crate::core::actions::{accept_list_update, fetch_token_list};
use crate::core::policy::{AcceptDecision, AutoAccept, auto_accept_decision};
use crate::core::version::{VersionUpgrade, is_newer};
use crate::io::source::ListSource;
use crate::store::Store;

/// What a single fetch did to the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// First list for this URL became `current`.
    Saved,
    /// Newer version waits for `accept`.
    UpdatePending(VersionUpgrade),
    /// Newer version was promoted to `current` by policy.
    AutoAccepted(VersionUpgrade),
    /// Fetched version is not newer than what is held.
    Unchanged,
    /// Source failed; the message was stored on the entry.
    Failed(String),
}

impl FetchOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

/// Fetch `url` through `source`, dispatching each lifecycle phase to `store`.
pub fn fetch_list(
    store: &mut Store,
    source: &dyn ListSource,
    url: &str,
    policy: AutoAccept,
) -> FetchOutcome {
    let request_id = store.next_request_id();
    let had_current = store
        .state()
        .get(url)
        .is_some_and(|entry| entry.current.is_some());

    store.dispatch(fetch_token_list::pending(request_id.as_str(), url));

    let list = match source.fetch(url) {
        Ok(list) => list,
        Err(err) => {
            let message = format!("{:#}", err);
            warn!(url, request_id = %request_id, error = %message, "list fetch failed");
            store.dispatch(fetch_token_list::rejected(&message, request_id.as_str(), url));
            return FetchOutcome::Failed(message);
        }
    };

    let fetched_version = list.version;
    store.dispatch(fetch_token_list::fulfilled(list, request_id.as_str(), url));

    if !had_current {
        info!(url, version = %fetched_version, "saved list");
        return FetchOutcome::Saved;
    }

    let Some(entry) = store.state().get(url) else {
        return FetchOutcome::Unchanged;
    };
    let is_update = entry
        .current
        .as_ref()
        .is_some_and(|current| is_newer(current.version, fetched_version));
    if !is_update {
        return FetchOutcome::Unchanged;
    }

    match auto_accept_decision(policy, entry) {
        AcceptDecision::Accept(upgrade) => {
            store.dispatch(accept_list_update(url));
            info!(url, version = %fetched_version, ?upgrade, "auto-accepted list update");
            FetchOutcome::AutoAccepted(upgrade)
        }
        AcceptDecision::Hold(upgrade) => {
            info!(url, version = %fetched_version, ?upgrade, "list update pending");
            FetchOutcome::UpdatePending(upgrade)
        }
        AcceptDecision::NoUpdate => FetchOutcome::Unchanged,
    }
}

/// Fetch every registered URL in key order.
pub fn fetch_all(
    store: &mut Store,
    source: &dyn ListSource,
    policy: AutoAccept,
) -> Vec<(String, FetchOutcome)> {
    let urls: Vec<String> = store.state().urls().map(str::to_string).collect();
    urls.into_iter()
        .map(|url| {
            let outcome = fetch_list(store, source, &url, policy);
            (url, outcome)
        })
        .collect()
}
