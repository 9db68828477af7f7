//! Auto-accept policy for freshly fetched list updates.

use serde::{Deserialize, Serialize};

use crate::core::diff::diff_token_lists;
use crate::core::types::ListEntry;
use crate::core::version::{VersionUpgrade, version_upgrade};

/// Largest upgrade accepted without an explicit `accept_list_update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoAccept {
    #[default]
    Never,
    Patch,
    Minor,
}

impl AutoAccept {
    fn allows(self, upgrade: VersionUpgrade) -> bool {
        let ceiling = match self {
            AutoAccept::Never => return false,
            AutoAccept::Patch => VersionUpgrade::Patch,
            AutoAccept::Minor => VersionUpgrade::Minor,
        };
        upgrade != VersionUpgrade::None && upgrade <= ceiling
    }
}

/// Decision for the pending update held by an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptDecision {
    /// Nothing pending.
    NoUpdate,
    Accept(VersionUpgrade),
    /// Needs an explicit acceptance.
    Hold(VersionUpgrade),
}

/// Decide whether the entry's pending update can be accepted automatically.
///
/// Updates that remove tokens are always held.
pub fn auto_accept_decision(policy: AutoAccept, entry: &ListEntry) -> AcceptDecision {
    let (Some(current), Some(update)) = (&entry.current, &entry.pending_update) else {
        return AcceptDecision::NoUpdate;
    };
    let upgrade = version_upgrade(current.version, update.version);
    if !policy.allows(upgrade) {
        return AcceptDecision::Hold(upgrade);
    }
    if !diff_token_lists(current, update).removed.is_empty() {
        return AcceptDecision::Hold(upgrade);
    }
    AcceptDecision::Accept(upgrade)
}
