//! Registry invariants checked when loading persisted state.

use crate::core::types::ListsState;
use crate::core::version::is_newer;

/// Check invariants the reducer maintains but a hand-edited file may break:
/// - URL keys are non-empty
/// - `loadingRequestId`, when set, is non-empty
/// - `pendingUpdate` requires a `current` list
/// - `pendingUpdate` is strictly newer than `current`
pub fn validate_invariants(state: &ListsState) -> Vec<String> {
    let mut errors = Vec::new();
    for (url, entry) in &state.by_url {
        if url.trim().is_empty() {
            errors.push("byUrl: empty url key".to_string());
        }
        if entry.loading_request_id.as_deref().is_some_and(str::is_empty) {
            errors.push(format!("{}: loadingRequestId must not be empty", url));
        }
        match (&entry.current, &entry.pending_update) {
            (None, Some(_)) => {
                errors.push(format!("{}: pendingUpdate without current list", url));
            }
            (Some(current), Some(update)) if !is_newer(current.version, update.version) => {
                errors.push(format!(
                    "{}: pendingUpdate {} is not newer than current {}",
                    url, update.version, current.version
                ));
            }
            _ => {}
        }
    }
    errors
}
