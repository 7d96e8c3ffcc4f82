//! Drift classification types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::source::Source;

/// Why a tracked file differs from what the current definition produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftReason {
    /// The user edited a generated file.
    Modified,
    /// The file is untouched but the definition now produces different bytes.
    Outdated,
    /// The definition produces a file that is not on disk.
    New,
    /// A previously generated file is no longer produced but still on disk.
    Deleted,
}

impl DriftReason {
    pub const ALL: [DriftReason; 4] = [Self::Modified, Self::Outdated, Self::New, Self::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modified => "modified",
            Self::Outdated => "outdated",
            Self::New => "new",
            Self::Deleted => "deleted",
        }
    }

    /// Entries carrying this reason, in their original order.
    pub fn filter<'a>(&self, entries: &'a [DriftEntry]) -> Vec<&'a DriftEntry> {
        entries.iter().filter(|e| e.reason == *self).collect()
    }
}

impl fmt::Display for DriftReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One drifted file with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftEntry {
    pub path: String,
    pub reason: DriftReason,
    pub source: Source,
    pub generator: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, reason: DriftReason) -> DriftEntry {
        DriftEntry {
            path: path.into(),
            reason,
            source: Source::project(),
            generator: "files::test".into(),
        }
    }

    #[test]
    fn filter_selects_matching_reason() {
        let entries = vec![
            entry("a.txt", DriftReason::Modified),
            entry("b.txt", DriftReason::Deleted),
            entry("c.txt", DriftReason::Outdated),
            entry("d.txt", DriftReason::New),
            entry("e.txt", DriftReason::Modified),
        ];

        let modified: Vec<_> = DriftReason::Modified
            .filter(&entries)
            .iter()
            .map(|e| e.path.as_str())
            .collect();
        assert_eq!(modified, vec!["a.txt", "e.txt"]);
        assert_eq!(DriftReason::New.filter(&entries).len(), 1);
        assert!(DriftReason::Deleted.filter(&[]).is_empty());
    }

    #[test]
    fn reasons_render_lowercase() {
        let rendered: Vec<_> = DriftReason::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["modified", "outdated", "new", "deleted"]);
    }

    #[test]
    fn entry_serializes_for_json_output() {
        let value = serde_json::to_value(entry("package.json", DriftReason::Outdated)).unwrap();
        assert_eq!(value["reason"], "outdated");
        assert_eq!(value["source"], "project");
        assert_eq!(value["generator"], "files::test");
    }
}
