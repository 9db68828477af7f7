//! Single-threaded store that owns the registry and applies actions.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::core::actions::Action;
use crate::core::reducer::{Transition, apply_action};
use crate::core::types::ListsState;

/// Holds the registry and replaces it wholesale on every dispatch.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: ListsState,
    request_seq: u64,
}

impl Store {
    pub fn new(state: ListsState) -> Self {
        Self {
            state,
            request_seq: 0,
        }
    }

    pub fn state(&self) -> &ListsState {
        &self.state
    }

    pub fn into_state(self) -> ListsState {
        self.state
    }

    /// Apply one action to completion.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        let mut next = self.state.clone();
        let transition = apply_action(&mut next, &action);
        match transition {
            Transition::Applied => {
                debug!(action = action.name(), url = action.url(), "applied");
                self.state = next;
            }
            Transition::Ignored(reason) => {
                debug!(
                    action = action.name(),
                    url = action.url(),
                    reason = reason.as_str(),
                    "ignored"
                );
            }
        }
        transition
    }

    /// Fresh request id, unique within this store and across runs.
    pub fn next_request_id(&mut self) -> String {
        self.request_seq += 1;
        request_id_at(SystemTime::now(), self.request_seq)
    }
}

/// A clock before the unix epoch falls back to `req-0-<seq>`; those ids can
/// repeat across runs, so the fallback is logged.
fn request_id_at(now: SystemTime, seq: u64) -> String {
    let millis = match now.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis(),
        Err(err) => {
            warn!(
                error = %err,
                "system clock is before the unix epoch; request ids may repeat across runs"
            );
            0
        }
    };
    format!("req-{}-{}", millis, seq)
}
