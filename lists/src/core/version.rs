//! Classification of version changes between two token lists.

use serde::{Deserialize, Serialize};

use crate::core::types::Version;

/// Kind of change from a base version to an update.
///
/// Ordered by size so policies can compare against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionUpgrade {
    /// Update is equal to or older than the base.
    None,
    Patch,
    Minor,
    Major,
}

impl VersionUpgrade {
    pub fn as_str(self) -> &'static str {
        match self {
            VersionUpgrade::None => "none",
            VersionUpgrade::Patch => "patch",
            VersionUpgrade::Minor => "minor",
            VersionUpgrade::Major => "major",
        }
    }
}

/// Classify the move from `base` to `update`.
pub fn version_upgrade(base: Version, update: Version) -> VersionUpgrade {
    if update.major > base.major {
        return VersionUpgrade::Major;
    }
    if update.major < base.major {
        return VersionUpgrade::None;
    }
    if update.minor > base.minor {
        return VersionUpgrade::Minor;
    }
    if update.minor < base.minor {
        return VersionUpgrade::None;
    }
    if update.patch > base.patch {
        VersionUpgrade::Patch
    } else {
        VersionUpgrade::None
    }
}

/// True if `update` is strictly newer than `base`.
pub fn is_newer(base: Version, update: Version) -> bool {
    version_upgrade(base, update) != VersionUpgrade::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_component() {
        let base = Version::new(1, 1, 1);
        assert_eq!(version_upgrade(base, Version::new(1, 1, 2)), VersionUpgrade::Patch);
        assert_eq!(version_upgrade(base, Version::new(1, 2, 0)), VersionUpgrade::Minor);
        assert_eq!(version_upgrade(base, Version::new(2, 0, 0)), VersionUpgrade::Major);
    }

    /// Lower components never matter once a higher component went down.
    #[test]
    fn downgrades_and_equal_versions_are_none() {
        let base = Version::new(2, 3, 4);
        assert_eq!(version_upgrade(base, base), VersionUpgrade::None);
        assert_eq!(version_upgrade(base, Version::new(1, 9, 9)), VersionUpgrade::None);
        assert_eq!(version_upgrade(base, Version::new(2, 2, 9)), VersionUpgrade::None);
        assert_eq!(version_upgrade(base, Version::new(2, 3, 3)), VersionUpgrade::None);
    }

    #[test]
    fn as_str_matches_serialized_name() {
        for upgrade in [
            VersionUpgrade::None,
            VersionUpgrade::Patch,
            VersionUpgrade::Minor,
            VersionUpgrade::Major,
        ] {
            let json = serde_json::to_value(upgrade).expect("serialize");
            assert_eq!(json, serde_json::Value::from(upgrade.as_str()));
        }
    }

    #[test]
    fn is_newer_agrees_with_ordering() {
        let versions = [
            Version::new(0, 0, 1),
            Version::new(0, 1, 0),
            Version::new(1, 0, 0),
            Version::new(1, 0, 1),
        ];
        for base in versions {
            for update in versions {
                assert_eq!(is_newer(base, update), update > base, "{base} -> {update}");
            }
        }
    }
}
